//! Threat assessment.
//!
//! Turns a snapshot into the set of cells that are unsafe this tick, a
//! coarse [`ThreatLevel`] used to gate combat, and a continuous threat
//! scalar used by position scoring. Output depends only on the snapshot,
//! the tables, the config and the tracker contents, so assessing the same
//! inputs twice gives identical results.
pub mod zones;

use std::collections::HashSet;

use game_content::ContentTables;
use game_core::{EntityId, Located, Position, TacticsConfig, WorldSnapshot};

use crate::trackers::EnemyTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum ThreatLevel {
    Safe,
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Medium and above call for the combat sub-decision.
    pub fn is_immediate(self) -> bool {
        self >= ThreatLevel::Medium
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThreatSource {
    Player(String),
    Npc(EntityId),
}

/// A nearby hostile the agent may have to fight or flee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threat {
    pub source: ThreatSource,
    pub position: Position,
    pub distance: u32,
}

impl Located for Threat {
    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Clone, Debug)]
pub struct ThreatAssessment {
    pub danger_zones: HashSet<Position>,
    pub level: ThreatLevel,
    /// Threat scalar at the agent's own cell.
    pub scalar: f64,
    /// Hostiles inside the close-range radii, nearest first.
    pub nearby: Vec<Threat>,
}

impl ThreatAssessment {
    pub fn is_dangerous(&self, cell: Position) -> bool {
        self.danger_zones.contains(&cell)
    }

    pub fn nearest(&self) -> Option<&Threat> {
        self.nearby.first()
    }
}

/// Computes [`ThreatAssessment`]s from snapshots.
pub struct ThreatAssessor<'a> {
    tables: &'a ContentTables,
    config: &'a TacticsConfig,
}

impl<'a> ThreatAssessor<'a> {
    pub fn new(tables: &'a ContentTables, config: &'a TacticsConfig) -> Self {
        Self { tables, config }
    }

    pub fn assess(&self, snapshot: &WorldSnapshot, tracker: Option<&EnemyTracker>) -> ThreatAssessment {
        let danger_zones = self.danger_zones(snapshot, tracker);
        let nearby = self.nearby_threats(snapshot);
        let level = self.level(snapshot, &nearby);
        let scalar = self.scalar_at(snapshot, snapshot.me().position);

        tracing::debug!(
            level = %level,
            danger_cells = danger_zones.len(),
            nearby = nearby.len(),
            scalar,
            "threat assessment"
        );

        ThreatAssessment {
            danger_zones,
            level,
            scalar,
            nearby,
        }
    }

    /// Unsafe cells from NPC corridors, player firing lines and player buffers.
    pub fn danger_zones(
        &self,
        snapshot: &WorldSnapshot,
        tracker: Option<&EnemyTracker>,
    ) -> HashSet<Position> {
        let map = snapshot.map();
        let me = snapshot.me().position;
        let mut cells = HashSet::new();

        for npc in snapshot.living_npcs() {
            let profile = self.tables.npc_profile(&npc.species);
            zones::project_npc(&mut cells, map, npc.position, profile, self.config.corridor_extension);
        }

        if let Some(tracker) = tracker {
            for enemy in tracker.remembered(snapshot) {
                let profile = self.tables.npc_profile(&enemy.species);
                zones::project_npc(&mut cells, map, enemy.position, profile, self.config.corridor_extension);
            }
        }

        for player in snapshot.living_players() {
            if player.distance_to(me) <= self.config.observation_range {
                zones::project_player(&mut cells, map, player.position, self.config.player_weapon_range);
            }
            zones::buffer_ring(&mut cells, map, player.position, self.config.player_buffer_radius);
        }

        cells
    }

    /// Continuous threat felt at `cell`.
    ///
    /// Sums NPC damage and enemy-player health, each divided by distance + 1.
    /// Entities outside their scan radius contribute nothing.
    pub fn scalar_at(&self, snapshot: &WorldSnapshot, cell: Position) -> f64 {
        let npc_threat: f64 = snapshot
            .living_npcs()
            .filter(|npc| npc.distance_to(cell) <= self.config.npc_scan_radius)
            .map(|npc| {
                let profile = self.tables.npc_profile(&npc.species);
                if profile.friendly {
                    0.0
                } else {
                    profile.damage / f64::from(npc.distance_to(cell) + 1)
                }
            })
            .sum();

        let player_threat: f64 = snapshot
            .living_players()
            .filter(|player| player.distance_to(cell) <= self.config.observation_range)
            .map(|player| {
                self.config.player_threat_weight * player.health_fraction()
                    / f64::from(player.distance_to(cell) + 1)
            })
            .sum();

        npc_threat + player_threat
    }

    fn nearby_threats(&self, snapshot: &WorldSnapshot) -> Vec<Threat> {
        let me = snapshot.me().position;

        let players = snapshot
            .living_players()
            .filter(|p| p.distance_to(me) <= self.config.player_threat_radius)
            .map(|p| Threat {
                source: ThreatSource::Player(p.name.clone()),
                position: p.position,
                distance: p.distance_to(me),
            });

        let npcs = snapshot
            .living_npcs()
            .filter(|n| !self.tables.npc_profile(&n.species).friendly)
            .filter(|n| n.distance_to(me) <= self.config.npc_threat_radius)
            .map(|n| Threat {
                source: ThreatSource::Npc(n.id.clone()),
                position: n.position,
                distance: n.distance_to(me),
            });

        let mut threats: Vec<Threat> = players.chain(npcs).collect();
        threats.sort_by_key(|t| (t.distance, t.position));
        threats
    }

    fn level(&self, snapshot: &WorldSnapshot, nearby: &[Threat]) -> ThreatLevel {
        let players = nearby
            .iter()
            .filter(|t| matches!(t.source, ThreatSource::Player(_)))
            .count();
        let npcs = nearby.len() - players;

        if players >= 2 || npcs >= 2 {
            ThreatLevel::High
        } else if players >= 1 || npcs >= 1 {
            ThreatLevel::Medium
        } else if !snapshot.agent_in_safe_zone() {
            ThreatLevel::Low
        } else {
            ThreatLevel::Safe
        }
    }
}
