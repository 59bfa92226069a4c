//! Tactical value of standing on a given cell.

use game_content::ContentTables;
use game_core::{Position, TacticsConfig, WorldSnapshot};

use crate::threat::ThreatAssessor;

/// Scores cells for strategic repositioning.
///
/// Rewards moderate cover (a few obstacles around, not a dead end) and
/// proximity to containers; penalises the threat scalar at the cell. A
/// bush is worth extra while something threatening is in range.
pub struct PositionScorer<'a> {
    tables: &'a ContentTables,
    config: &'a TacticsConfig,
}

impl<'a> PositionScorer<'a> {
    pub fn new(tables: &'a ContentTables, config: &'a TacticsConfig) -> Self {
        Self { tables, config }
    }

    pub fn score(&self, snapshot: &WorldSnapshot, cell: Position) -> f64 {
        let threat = ThreatAssessor::new(self.tables, self.config).scalar_at(snapshot, cell);
        self.score_with_threat(snapshot, cell, threat)
    }

    /// Same as [`score`](Self::score) with the threat scalar at `cell`
    /// already known.
    pub fn score_with_threat(&self, snapshot: &WorldSnapshot, cell: Position, threat: f64) -> f64 {
        let cover = if self.config.is_cover_count(snapshot.cover_count(cell)) {
            self.config.cover_bonus
        } else {
            0.0
        };

        let containers: f64 = snapshot
            .obstacles()
            .iter()
            .filter_map(|o| {
                self.tables
                    .container_value(o.id.as_str())
                    .map(|value| f64::from(value) / f64::from(o.position.distance(cell) + 1))
            })
            .sum::<f64>()
            * self.config.container_weight;

        let concealment = if threat > 0.0 && snapshot.is_concealed(cell) {
            self.config.bush_bonus
        } else {
            0.0
        };

        cover + containers + concealment - threat * self.config.reposition_threat_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ObstacleTags, SnapshotBuilder};

    #[test]
    fn cover_and_containers_raise_the_score() {
        let tables = ContentTables::builtin();
        let config = TacticsConfig::default();
        let scorer = PositionScorer::new(&tables, &config);

        let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
            .wall(Position::new(4, 5))
            .wall(Position::new(6, 5))
            .obstacle("CHEST", Position::new(15, 15), ObstacleTags::DESTRUCTIBLE)
            .build();

        let covered = scorer.score(&snapshot, Position::new(5, 5));
        let open = scorer.score(&snapshot, Position::new(5, 12));
        assert!(covered > open);

        let by_chest = scorer.score(&snapshot, Position::new(14, 13));
        assert!(by_chest > open);
    }

    #[test]
    fn bush_counts_only_while_watched() {
        let tables = ContentTables::builtin();
        let config = TacticsConfig::default();
        let scorer = PositionScorer::new(&tables, &config);
        let bush = Position::new(12, 10);
        let plain = Position::new(8, 10);

        let quiet = SnapshotBuilder::new(20, Position::new(10, 10))
            .obstacle("BUSH", bush, ObstacleTags::CAN_GO_THROUGH)
            .build();
        assert_eq!(scorer.score(&quiet, bush), scorer.score(&quiet, plain));

        let watched = SnapshotBuilder::new(20, Position::new(10, 10))
            .obstacle("BUSH", bush, ObstacleTags::CAN_GO_THROUGH)
            .player("rival", Position::new(10, 3), 100)
            .build();
        assert_eq!(
            scorer.score(&watched, bush) - scorer.score(&watched, plain),
            config.bush_bonus
        );
    }

    #[test]
    fn known_threat_matches_the_computed_one() {
        let tables = ContentTables::builtin();
        let config = TacticsConfig::default();
        let scorer = PositionScorer::new(&tables, &config);
        let cell = Position::new(6, 6);
        let snapshot = SnapshotBuilder::new(20, cell)
            .player("rival", Position::new(3, 3), 100)
            .build();

        let scalar = ThreatAssessor::new(&tables, &config).scalar_at(&snapshot, cell);
        assert!(scalar > 0.0);
        assert_eq!(scorer.score(&snapshot, cell), scorer.score_with_threat(&snapshot, cell, scalar));
        assert!(scorer.score_with_threat(&snapshot, cell, 0.0) > scorer.score(&snapshot, cell));
    }

    #[test]
    fn nearby_enemy_lowers_the_score() {
        let tables = ContentTables::builtin();
        let config = TacticsConfig::default();
        let scorer = PositionScorer::new(&tables, &config);

        let snapshot = SnapshotBuilder::new(20, Position::new(10, 10))
            .player("rival", Position::new(3, 3), 100)
            .build();

        assert!(
            scorer.score(&snapshot, Position::new(4, 3)) < scorer.score(&snapshot, Position::new(16, 16))
        );
    }
}
