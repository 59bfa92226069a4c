//! Route planning: what to avoid and where to step.
//!
//! The planner decides which cells are off limits for a given
//! [`AvoidPolicy`] and delegates the actual search to a [`PathSearch`].
//! A `None` route means "no safe path"; callers treat it as a failed tier
//! and move on.
pub mod search;

use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};

use game_core::{CardinalDirection, Path, Position, TacticsConfig, WorldSnapshot};

use crate::threat::ThreatAssessment;

pub use search::{GridSearch, PathSearch};

/// Which cells a route must stay clear of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvoidPolicy {
    /// Hard obstacles, danger zones, other players and their buffer, hazards
    /// and hostile NPC cells.
    Full,
    /// Hard obstacles only. Used to leave the shrinking zone at any cost.
    Minimal,
}

/// A planned path. An empty path means the agent already stands on the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: Path,
    pub target: Position,
}

impl Route {
    pub fn is_arrived(&self) -> bool {
        self.path.is_empty()
    }

    pub fn first_step(&self) -> Option<CardinalDirection> {
        self.path.first()
    }

    /// Route that stops one cell before its target. Used for targets the
    /// agent cannot stand on, such as containers.
    pub fn stop_short(&self) -> Route {
        let steps = self.path.steps();
        Route {
            path: Path::new(steps[..steps.len().saturating_sub(1)].to_vec()),
            target: self.target,
        }
    }

    /// Route truncated to its first step.
    pub fn prefix(&self) -> Route {
        Route {
            path: self.path.prefix(),
            target: self.target,
        }
    }
}

/// Safety multiplier for travelling from `start` to `target`.
///
/// Uses `min(dist(cell, start), dist(cell, target))` over danger cells as an
/// approximation of the distance between the danger and the travelled
/// segment. Scales linearly from `floor` up to 1.0 at `safe_distance`; no
/// danger at all gives 1.0.
pub fn path_safety(
    start: Position,
    target: Position,
    danger: &HashSet<Position>,
    safe_distance: f64,
    floor: f64,
) -> f64 {
    let closest = danger
        .iter()
        .map(|cell| cell.distance(start).min(cell.distance(target)))
        .min();
    match closest {
        None => 1.0,
        Some(d) => (f64::from(d) / safe_distance).clamp(floor, 1.0),
    }
}

/// Plans routes over one snapshot.
pub struct RoutePlanner<'a> {
    search: &'a dyn PathSearch,
    snapshot: &'a WorldSnapshot,
    full: HashSet<Position>,
    minimal: HashSet<Position>,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(
        search: &'a dyn PathSearch,
        snapshot: &'a WorldSnapshot,
        threats: &ThreatAssessment,
        config: &TacticsConfig,
    ) -> Self {
        let minimal = snapshot.hard_cells().clone();

        let mut full = minimal.clone();
        full.extend(threats.danger_zones.iter().copied());
        full.extend(snapshot.hazard_cells().iter().copied());
        for player in snapshot.living_players() {
            for r in 0..=config.player_buffer_radius {
                full.extend(player.position.ring(r));
            }
        }
        full.extend(snapshot.living_npcs().map(|npc| npc.position));

        Self {
            search,
            snapshot,
            full,
            minimal,
        }
    }

    pub fn avoid_set(&self, policy: AvoidPolicy) -> &HashSet<Position> {
        match policy {
            AvoidPolicy::Full => &self.full,
            AvoidPolicy::Minimal => &self.minimal,
        }
    }

    pub fn is_avoided(&self, cell: Position, policy: AvoidPolicy) -> bool {
        self.avoid_set(policy).contains(&cell)
    }

    /// Full route from the agent to `target`.
    pub fn plan(&self, target: Position, policy: AvoidPolicy) -> Option<Route> {
        let start = self.snapshot.me().position;
        let base = self.avoid_set(policy);

        let avoid = if base.contains(&start) || base.contains(&target) {
            let mut owned = base.clone();
            owned.remove(&start);
            owned.remove(&target);
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(base)
        };

        let path = self
            .search
            .shortest_path(self.snapshot.map(), &avoid, start, target)?;
        tracing::trace!(%target, ?policy, steps = path.len(), "route planned");
        Some(Route { path, target })
    }

    /// Every cell the agent can walk to under `policy`, its own cell included.
    pub fn reachable(&self, policy: AvoidPolicy) -> HashSet<Position> {
        let map = self.snapshot.map();
        let avoid = self.avoid_set(policy);
        let start = self.snapshot.me().position;

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in current.neighbors() {
                if map.contains(next) && !avoid.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Route reduced to its first step toward `target`.
    pub fn step_toward(&self, target: Position, policy: AvoidPolicy) -> Option<Route> {
        self.plan(target, policy).map(|route| route.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threat::ThreatLevel;
    use game_core::SnapshotBuilder;

    fn assessment(danger: impl IntoIterator<Item = Position>) -> ThreatAssessment {
        ThreatAssessment {
            danger_zones: danger.into_iter().collect(),
            level: ThreatLevel::Safe,
            scalar: 0.0,
            nearby: Vec::new(),
        }
    }

    #[test]
    fn full_policy_detours_around_danger() {
        let snapshot = SnapshotBuilder::new(10, Position::new(0, 0)).build();
        let threats = assessment([Position::new(1, 0), Position::new(1, 1)]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        let full = planner.plan(Position::new(2, 0), AvoidPolicy::Full).expect("route");
        let minimal = planner
            .plan(Position::new(2, 0), AvoidPolicy::Minimal)
            .expect("route");
        assert_eq!(minimal.path.len(), 2);
        assert_eq!(full.path.len(), 6);
    }

    #[test]
    fn start_and_target_are_never_avoided() {
        // The agent stands in a danger zone and walks onto a player's buffer.
        let snapshot = SnapshotBuilder::new(10, Position::new(0, 0))
            .player("rival", Position::new(3, 0), 100)
            .build();
        let threats = assessment([Position::new(0, 0)]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        assert!(planner.is_avoided(Position::new(0, 0), AvoidPolicy::Full));
        assert!(planner.is_avoided(Position::new(2, 0), AvoidPolicy::Full));
        let route = planner.plan(Position::new(1, 0), AvoidPolicy::Full).expect("route");
        assert_eq!(route.path.to_string(), "r");
    }

    #[test]
    fn walled_in_agent_has_no_route() {
        let me = Position::new(5, 5);
        let mut builder = SnapshotBuilder::new(10, me);
        for cell in me.neighbors() {
            builder = builder.wall(cell);
        }
        let snapshot = builder.build();
        let threats = assessment([]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        assert!(planner.plan(Position::new(0, 0), AvoidPolicy::Minimal).is_none());
        assert!(planner.step_toward(Position::new(0, 0), AvoidPolicy::Full).is_none());
    }

    #[test]
    fn stop_short_ends_next_to_a_hard_target() {
        let snapshot = SnapshotBuilder::new(10, Position::new(0, 0))
            .wall(Position::new(3, 0))
            .build();
        let threats = assessment([]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        let route = planner.plan(Position::new(3, 0), AvoidPolicy::Full).expect("route");
        let short = route.stop_short();
        assert_eq!(short.path.to_string(), "rr");
        assert_eq!(short.target, Position::new(3, 0));
        assert!(Route { path: Path::default(), target: Position::ORIGIN }.stop_short().is_arrived());
    }

    #[test]
    fn reachable_stops_at_walls() {
        let center = Position::new(5, 5);
        let mut builder = SnapshotBuilder::new(10, Position::new(0, 0));
        for cell in center.ring(1) {
            builder = builder.wall(cell);
        }
        let snapshot = builder.build();
        let threats = assessment([]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        let reachable = planner.reachable(AvoidPolicy::Minimal);
        assert!(reachable.contains(&Position::new(0, 0)));
        assert!(reachable.contains(&Position::new(9, 9)));
        assert!(!reachable.contains(&center));
        assert!(!reachable.contains(&Position::new(4, 4)));
        assert_eq!(reachable.len(), 100 - 9);
    }

    #[test]
    fn step_toward_keeps_only_the_first_step() {
        let snapshot = SnapshotBuilder::new(10, Position::new(0, 0)).build();
        let threats = assessment([]);
        let config = TacticsConfig::default();
        let planner = RoutePlanner::new(&GridSearch, &snapshot, &threats, &config);

        let step = planner
            .step_toward(Position::new(0, 5), AvoidPolicy::Full)
            .expect("route");
        assert_eq!(step.path.len(), 1);
        assert_eq!(step.first_step(), Some(CardinalDirection::North));
    }

    #[test]
    fn safety_is_monotonic_in_danger_distance() {
        let start = Position::new(0, 0);
        let target = Position::new(10, 0);
        let at = |cell: Position| {
            let danger: HashSet<Position> = [cell].into_iter().collect();
            path_safety(start, target, &danger, 5.0, 0.1)
        };

        assert_eq!(path_safety(start, target, &HashSet::new(), 5.0, 0.1), 1.0);
        assert_eq!(at(Position::new(10, 0)), 0.1);
        assert!(at(Position::new(10, 2)) < at(Position::new(10, 4)));
        assert_eq!(at(Position::new(10, 9)), 1.0);
    }
}
