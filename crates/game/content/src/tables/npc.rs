use std::collections::HashMap;

/// How dangerous an NPC species is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcProfile {
    /// Cells the NPC can hit from where it stands.
    pub attack_range: u32,
    /// Cells the NPC can cover before we act again.
    pub speed: u32,
    pub damage: f64,
    /// Friendly species project no danger.
    pub friendly: bool,
}

impl NpcProfile {
    /// Used for any species missing from the table. Never "no threat".
    pub const DEFAULT: Self = Self {
        attack_range: 1,
        speed: 4,
        damage: 20.0,
        friendly: false,
    };

    const fn hostile(attack_range: u32, speed: u32, damage: f64) -> Self {
        Self {
            attack_range,
            speed,
            damage,
            friendly: false,
        }
    }
}

impl Default for NpcProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub(super) fn builtin() -> HashMap<String, NpcProfile> {
    [
        ("NATIVE", NpcProfile::hostile(1, 2, 10.0)),
        ("GHOST", NpcProfile::hostile(1, 3, 15.0)),
        ("LEOPARD", NpcProfile::hostile(1, 5, 25.0)),
        ("ANACONDA", NpcProfile::hostile(2, 2, 30.0)),
        ("RHINO", NpcProfile::hostile(1, 4, 40.0)),
        ("GOLEM", NpcProfile::hostile(2, 1, 50.0)),
        (
            "SPIRIT",
            NpcProfile {
                attack_range: 0,
                speed: 1,
                damage: 0.0,
                friendly: true,
            },
        ),
    ]
    .into_iter()
    .map(|(species, profile)| (species.to_owned(), profile))
    .collect()
}
