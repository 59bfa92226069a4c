//! Entity, item and inventory types that make up a world snapshot.
//!
//! Everything here is plain data. Values are produced by the snapshot
//! ingestor (or the [`crate::SnapshotBuilder`] in tests) and only read
//! afterwards.
pub mod common;
pub mod entities;
pub mod inventory;
pub mod items;
pub mod status;

pub use common::{CardinalDirection, EntityId, Located, Path, Placed, Position};
pub use entities::{AllyView, NpcView, PlayerView};
pub use inventory::{Inventory, MAX_HEALING_ITEMS};
pub use items::{Armor, ArmorSlot, HealingItem, Obstacle, ObstacleTags, Weapon, WeaponKind};
pub use status::StatusEffect;
