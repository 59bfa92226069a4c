//! Static game content and loaders.
//!
//! This crate houses the lookup tables the tactical layer consults:
//! - NPC threat profiles by species
//! - Weapon specs (value and effective range band) by weapon id
//! - Healing values and container tiers by item id
//!
//! Built-in tables cover the known content. With the `loaders` feature the
//! tables can be extended from RON files and the [`game_core::TacticsConfig`]
//! read from TOML.

pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::{ContentTables, NpcProfile, RangeBand, WeaponSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, TablesLoader};
