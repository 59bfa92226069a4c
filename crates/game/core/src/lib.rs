//! World model shared by the bot runtime and its tooling.
//!
//! `game-core` describes what the bot can see on a given tick: grid
//! coordinates, the entities and pickups on the map, the agent's inventory
//! and status effects, and the tunables the tactical layer reads. Every map
//! update is turned into a fresh [`WorldSnapshot`] which stays immutable for
//! the whole decision cycle.
pub mod config;
pub mod snapshot;
pub mod state;

pub use config::TacticsConfig;
#[cfg(feature = "serde")]
pub use snapshot::{IngestError, MapUpdate};
pub use snapshot::{AgentState, MapBounds, SafeZone, SnapshotBuilder, WorldSnapshot};
pub use state::{
    AllyView, Armor, ArmorSlot, CardinalDirection, EntityId, HealingItem, Inventory, Located,
    MAX_HEALING_ITEMS, NpcView, Obstacle, ObstacleTags, Path, Placed, PlayerView, Position,
    StatusEffect, Weapon, WeaponKind,
};
