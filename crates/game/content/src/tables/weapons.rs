use std::collections::HashMap;

use game_core::WeaponKind;

/// Inclusive distance interval in which a weapon is effective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeBand {
    pub min: u32,
    pub max: u32,
}

impl RangeBand {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: u32) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    /// Desirability when deciding what to pick up. Bare hands rank lowest.
    pub value: f64,
    pub band: RangeBand,
}

impl WeaponSpec {
    const fn new(kind: WeaponKind, value: f64, min: u32, max: u32) -> Self {
        Self {
            kind,
            value,
            band: RangeBand::new(min, max),
        }
    }

    /// Spec assumed for an unknown weapon of the given kind.
    pub fn default_for(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Gun => Self::new(kind, 20.0, 2, 6),
            WeaponKind::Melee => Self::new(kind, 20.0, 1, 1),
            WeaponKind::Throwable => Self::new(kind, 20.0, 2, 4),
            WeaponKind::Special => Self::new(kind, 20.0, 1, 3),
        }
    }
}

pub(super) fn builtin() -> HashMap<String, WeaponSpec> {
    use WeaponKind::*;

    [
        ("SHOTGUN", WeaponSpec::new(Gun, 70.0, 1, 2)),
        ("RUBBER_GUN", WeaponSpec::new(Gun, 40.0, 2, 6)),
        ("CROSSBOW", WeaponSpec::new(Gun, 60.0, 2, 8)),
        ("SCEPTER", WeaponSpec::new(Gun, 50.0, 3, 12)),
        ("HAND", WeaponSpec::new(Melee, 10.0, 1, 1)),
        ("KNIFE", WeaponSpec::new(Melee, 30.0, 1, 1)),
        ("TREE_BRANCH", WeaponSpec::new(Melee, 20.0, 1, 1)),
        ("BONE", WeaponSpec::new(Melee, 30.0, 1, 2)),
        ("AXE", WeaponSpec::new(Melee, 40.0, 1, 3)),
        ("SEED", WeaponSpec::new(Throwable, 30.0, 2, 3)),
        ("BANANA", WeaponSpec::new(Throwable, 40.0, 2, 4)),
        ("METEORITE_FRAGMENT", WeaponSpec::new(Throwable, 40.0, 2, 6)),
        ("CRYSTAL", WeaponSpec::new(Throwable, 50.0, 2, 6)),
        ("MACE", WeaponSpec::new(Special, 100.0, 1, 3)),
        ("SMOKE", WeaponSpec::new(Special, 30.0, 1, 3)),
        ("SAHUR_BAT", WeaponSpec::new(Special, 60.0, 1, 5)),
        ("ROPE", WeaponSpec::new(Special, 90.0, 1, 6)),
        ("BELL", WeaponSpec::new(Special, 80.0, 1, 7)),
    ]
    .into_iter()
    .map(|(id, spec)| (id.to_owned(), spec))
    .collect()
}
