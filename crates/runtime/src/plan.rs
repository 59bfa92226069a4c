//! The decision a cycle produces.

use game_core::{CardinalDirection, EntityId, Path, Position};

/// Decision tier that produced a plan. Declaration order is evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Tier {
    SafeZone,
    CriticalHealth,
    Combat,
    Equipment,
    Reposition,
    Explore,
    Recovery,
    Fallback,
}

impl Tier {
    /// Relative urgency, used for logging and plan comparison. Follows
    /// evaluation order, so the zone always outranks everything else.
    pub fn priority(self) -> u32 {
        match self {
            Tier::SafeZone => 1100,
            Tier::CriticalHealth => 1000,
            Tier::Combat => 900,
            Tier::Equipment => 600,
            Tier::Reposition => 300,
            Tier::Explore => 100,
            Tier::Recovery => 50,
            Tier::Fallback => 0,
        }
    }
}

/// Concrete action handed to the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Move(Path),
    AttackRanged(CardinalDirection),
    AttackMelee(CardinalDirection),
    Throw {
        direction: CardinalDirection,
        distance: u32,
    },
    UseSpecial(CardinalDirection),
    UseItem(EntityId),
    Pickup,
    Wait,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPlan {
    pub kind: ActionKind,
    /// Cell the plan is about (movement goal, pickup cell, attacked enemy).
    pub target: Option<Position>,
    pub tier: Tier,
    pub reason: &'static str,
}

impl ActionPlan {
    pub fn new(kind: ActionKind, tier: Tier, reason: &'static str) -> Self {
        Self {
            kind,
            target: None,
            tier,
            reason,
        }
    }

    pub fn wait(reason: &'static str) -> Self {
        Self::new(ActionKind::Wait, Tier::Fallback, reason)
    }

    pub fn with_target(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }

    pub fn priority(&self) -> u32 {
        self.tier.priority()
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, ActionKind::Move(_))
    }
}
