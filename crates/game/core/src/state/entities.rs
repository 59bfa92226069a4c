//! Other actors visible on the map.

use super::common::{EntityId, Located, Position};
use super::status::StatusEffect;

/// Another player, as seen by the agent.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub position: Position,
    /// Health in `0..=100`; zero means dead.
    pub health: u32,
    pub effects: Vec<StatusEffect>,
}

impl PlayerView {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remaining health as a fraction in `0.0..=1.0`.
    pub fn health_fraction(&self) -> f64 {
        f64::from(self.health.min(100)) / 100.0
    }
}

impl Located for PlayerView {
    fn position(&self) -> Position {
        self.position
    }
}

/// A hostile or neutral NPC. Its threat profile is looked up by species.
#[derive(Clone, Debug, PartialEq)]
pub struct NpcView {
    pub id: EntityId,
    pub species: String,
    pub position: Position,
    pub alive: bool,
}

impl Located for NpcView {
    fn position(&self) -> Position {
        self.position
    }
}

/// A friendly NPC that heals players standing next to it.
#[derive(Clone, Debug, PartialEq)]
pub struct AllyView {
    pub id: EntityId,
    pub position: Position,
}

impl Located for AllyView {
    fn position(&self) -> Position {
        self.position
    }
}
