//! Lookup tables keyed by server ids.
//!
//! Each table is a single map from id to spec with an explicit fallback,
//! so unknown ids always resolve to something usable.
mod items;
mod npc;
mod weapons;

use std::collections::HashMap;

use game_core::WeaponKind;

pub use npc::NpcProfile;
pub use weapons::{RangeBand, WeaponSpec};

/// All static lookup tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentTables {
    pub npcs: HashMap<String, NpcProfile>,
    pub default_npc: NpcProfile,
    pub weapons: HashMap<String, WeaponSpec>,
    pub healing: HashMap<String, u32>,
    pub default_healing: u32,
    pub containers: HashMap<String, u32>,
}

impl ContentTables {
    /// Tables describing the known game content.
    pub fn builtin() -> Self {
        Self {
            npcs: npc::builtin(),
            default_npc: NpcProfile::DEFAULT,
            weapons: weapons::builtin(),
            healing: items::builtin_healing(),
            default_healing: items::DEFAULT_HEALING,
            containers: items::builtin_containers(),
        }
    }

    /// Adds or replaces entries with the ones in `other`.
    pub fn extend(&mut self, other: ContentTables) {
        self.npcs.extend(other.npcs);
        self.weapons.extend(other.weapons);
        self.healing.extend(other.healing);
        self.containers.extend(other.containers);
    }

    /// Threat profile for a species, falling back to the default profile.
    pub fn npc_profile(&self, species: &str) -> &NpcProfile {
        self.npcs.get(species).unwrap_or(&self.default_npc)
    }

    /// Spec for a weapon id. Unknown ids get the default spec of `kind`.
    pub fn weapon_spec(&self, id: &str, kind: WeaponKind) -> WeaponSpec {
        self.weapons
            .get(id)
            .copied()
            .unwrap_or_else(|| WeaponSpec::default_for(kind))
    }

    /// Heal amount recorded for an item id.
    pub fn healing_value(&self, id: &str) -> u32 {
        self.healing.get(id).copied().unwrap_or(self.default_healing)
    }

    /// Tier value of a container, or `None` when `id` is not a container.
    pub fn container_value(&self, id: &str) -> Option<u32> {
        self.containers.get(id).copied()
    }
}

impl Default for ContentTables {
    fn default() -> Self {
        Self::builtin()
    }
}
