//! Items, armor and obstacles.

use bitflags::bitflags;

use super::common::{EntityId, Located, Position};
use super::status::StatusEffect;

/// Weapon slot category. Each category fills its own inventory slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Gun,
    Melee,
    Throwable,
    Special,
}

impl WeaponKind {
    /// Order in which weapons are tried when several can reach a target.
    pub const RANGED_FIRST: [WeaponKind; 4] = [
        WeaponKind::Gun,
        WeaponKind::Throwable,
        WeaponKind::Special,
        WeaponKind::Melee,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub id: EntityId,
    pub kind: WeaponKind,
    /// Score the server awards for picking the weapon up.
    pub pickup_points: u32,
}

impl Weapon {
    /// Default melee weapon every player starts with.
    pub const BARE_HANDS: &'static str = "HAND";

    pub fn new(id: impl Into<String>, kind: WeaponKind) -> Self {
        Self {
            id: EntityId::new(id),
            kind,
            pickup_points: 0,
        }
    }

    pub fn with_pickup_points(mut self, points: u32) -> Self {
        self.pickup_points = points;
        self
    }

    pub fn is_bare_hands(&self) -> bool {
        self.id.as_str() == Self::BARE_HANDS
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorSlot {
    #[strum(serialize = "HELMET")]
    Helmet,
    #[strum(serialize = "ARMOR", serialize = "BODY")]
    Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Armor {
    pub id: EntityId,
    pub slot: ArmorSlot,
    pub health_points: u32,
    /// Percentage of incoming damage absorbed.
    pub damage_reduction: u32,
}

impl Armor {
    pub fn new(
        id: impl Into<String>,
        slot: ArmorSlot,
        health_points: u32,
        damage_reduction: u32,
    ) -> Self {
        Self {
            id: EntityId::new(id),
            slot,
            health_points,
            damage_reduction,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealingItem {
    pub id: EntityId,
    /// Health restored on use. Zero when the server did not report it.
    pub heal_amount: u32,
    pub effect: Option<StatusEffect>,
}

impl HealingItem {
    pub fn new(id: impl Into<String>, heal_amount: u32) -> Self {
        Self {
            id: EntityId::new(id),
            heal_amount,
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn has_beneficial_effect(&self) -> bool {
        self.effect.is_some_and(StatusEffect::is_beneficial)
    }
}

bitflags! {
    /// Server-side tags describing how an obstacle interacts with players.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObstacleTags: u8 {
        const CAN_GO_THROUGH = 1 << 0;
        const CAN_SHOOT_THROUGH = 1 << 1;
        const DESTRUCTIBLE = 1 << 2;
        const TRAP = 1 << 3;
        const PULLABLE_ROPE = 1 << 4;
    }
}

impl ObstacleTags {
    /// Maps a server tag name to its flag. Unknown names map to `None`.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "CAN_GO_THROUGH" => Some(Self::CAN_GO_THROUGH),
            "CAN_SHOOT_THROUGH" => Some(Self::CAN_SHOOT_THROUGH),
            "DESTRUCTIBLE" => Some(Self::DESTRUCTIBLE),
            "TRAP" => Some(Self::TRAP),
            "PULLABLE_ROPE" => Some(Self::PULLABLE_ROPE),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub id: EntityId,
    pub position: Position,
    pub tags: ObstacleTags,
}

impl Obstacle {
    pub fn new(id: impl Into<String>, position: Position, tags: ObstacleTags) -> Self {
        Self {
            id: EntityId::new(id),
            position,
            tags,
        }
    }

    /// Blocks movement.
    pub fn is_hard(&self) -> bool {
        !self.tags.contains(ObstacleTags::CAN_GO_THROUGH)
    }

    /// Walkable but harmful (traps, peels).
    pub fn is_hazard(&self) -> bool {
        self.tags.contains(ObstacleTags::TRAP)
    }

    /// Walkable cover that hides whoever stands in it, such as a bush.
    pub fn is_concealing(&self) -> bool {
        self.tags.contains(ObstacleTags::CAN_GO_THROUGH)
            && !self
                .tags
                .intersects(ObstacleTags::TRAP | ObstacleTags::PULLABLE_ROPE)
    }
}

impl Located for Obstacle {
    fn position(&self) -> Position {
        self.position
    }
}
