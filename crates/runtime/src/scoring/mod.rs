//! Resource and target scoring.
//!
//! Values are non-negative `f64`s. A candidate's *ranking* divides its value
//! by the travel distance and scales it by the path safety factor, so a
//! valuable item far away or next to danger can lose to a modest one close by.
//! Scoring is pure: reachability is the route planner's job.
pub mod position;

use std::collections::HashSet;

use game_content::ContentTables;
use game_core::{
    Armor, HealingItem, Inventory, Located, Obstacle, Placed, Position, TacticsConfig, Weapon,
    WorldSnapshot,
};

use crate::route::path_safety;

pub use position::PositionScorer;

/// A target together with its ranking score.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranked<'s> {
    pub candidate: Candidate<'s>,
    pub score: f64,
}

/// Something on the map worth walking to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate<'s> {
    Weapon(&'s Placed<Weapon>),
    Armor(&'s Placed<Armor>),
    Healing(&'s Placed<HealingItem>),
    Container(&'s Obstacle),
}

impl Candidate<'_> {
    pub fn position(&self) -> Position {
        match self {
            Candidate::Weapon(w) => w.position,
            Candidate::Armor(a) => a.position,
            Candidate::Healing(h) => h.position,
            Candidate::Container(c) => c.position,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Candidate::Weapon(w) => w.item.id.as_str(),
            Candidate::Armor(a) => a.item.id.as_str(),
            Candidate::Healing(h) => h.item.id.as_str(),
            Candidate::Container(c) => c.id.as_str(),
        }
    }
}

pub struct ResourceScorer<'a> {
    tables: &'a ContentTables,
    config: &'a TacticsConfig,
}

impl<'a> ResourceScorer<'a> {
    pub fn new(tables: &'a ContentTables, config: &'a TacticsConfig) -> Self {
        Self { tables, config }
    }

    fn weapon_base(&self, weapon: &Weapon) -> f64 {
        self.tables.weapon_spec(weapon.id.as_str(), weapon.kind).value
    }

    /// Table value plus a share of pickup points, boosted when the slot is empty.
    pub fn weapon_value(&self, weapon: &Weapon, inventory: &Inventory) -> f64 {
        let mut value =
            self.weapon_base(weapon) + f64::from(weapon.pickup_points) * self.config.pickup_point_weight;
        if !inventory.has_weapon(weapon.kind) {
            value *= self.config.empty_slot_multiplier;
        }
        value
    }

    /// Whether picking `weapon` up would improve its slot.
    pub fn is_weapon_upgrade(&self, weapon: &Weapon, inventory: &Inventory) -> bool {
        if weapon.is_bare_hands() {
            return false;
        }
        match inventory.weapon(weapon.kind) {
            Some(held) if !held.is_bare_hands() => self.weapon_base(weapon) > self.weapon_base(held),
            _ => true,
        }
    }

    fn armor_base(&self, armor: &Armor) -> f64 {
        f64::from(armor.health_points)
            + f64::from(armor.damage_reduction) * self.config.armor_reduction_weight
    }

    /// Health points plus heavily weighted damage reduction; doubled for a first piece.
    pub fn armor_value(&self, armor: &Armor, inventory: &Inventory) -> f64 {
        let value = self.armor_base(armor);
        match inventory.armor(armor.slot) {
            None => value * self.config.armor_first_piece_multiplier,
            Some(_) => value,
        }
    }

    pub fn is_armor_upgrade(&self, armor: &Armor, inventory: &Inventory) -> bool {
        inventory
            .armor(armor.slot)
            .is_none_or(|held| self.armor_base(armor) > self.armor_base(held))
    }

    /// Heal amount, boosted when effective health is low or the item
    /// carries a buff.
    pub fn healing_value(&self, item: &HealingItem, snapshot: &WorldSnapshot) -> f64 {
        let heal = if item.heal_amount > 0 {
            item.heal_amount
        } else {
            self.tables.healing_value(item.id.as_str())
        };
        let mut value = f64::from(heal);
        let health = snapshot
            .me()
            .effective_health(self.config.debuff_health_penalty);
        if health < self.config.low_health_threshold {
            value *= self.config.low_health_heal_multiplier;
        }
        if item.has_beneficial_effect() {
            value *= self.config.beneficial_effect_multiplier;
        }
        value
    }

    /// Tier value when `obstacle` is a container.
    pub fn container_value(&self, obstacle: &Obstacle) -> Option<f64> {
        self.tables
            .container_value(obstacle.id.as_str())
            .map(f64::from)
    }

    pub fn value(&self, candidate: Candidate<'_>, snapshot: &WorldSnapshot) -> f64 {
        let inventory = snapshot.inventory();
        match candidate {
            Candidate::Weapon(w) => self.weapon_value(&w.item, inventory),
            Candidate::Armor(a) => self.armor_value(&a.item, inventory),
            Candidate::Healing(h) => self.healing_value(&h.item, snapshot),
            Candidate::Container(c) => self.container_value(c).unwrap_or(0.0),
        }
    }

    /// `value / (distance + 1) * safety`.
    pub fn rank(
        &self,
        value: f64,
        start: Position,
        target: Position,
        danger: &HashSet<Position>,
    ) -> f64 {
        let distance = f64::from(start.distance(target));
        value / (distance + 1.0)
            * path_safety(
                start,
                target,
                danger,
                self.config.safety_distance,
                self.config.safety_floor,
            )
    }

    /// Ranks `candidates` from the agent's cell, best first.
    ///
    /// Ties keep their input order.
    pub fn rank_all<'s>(
        &self,
        snapshot: &WorldSnapshot,
        danger: &HashSet<Position>,
        candidates: impl IntoIterator<Item = Candidate<'s>>,
    ) -> Vec<Ranked<'s>> {
        let me = snapshot.me().position();
        let mut ranked: Vec<Ranked<'s>> = candidates
            .into_iter()
            .map(|candidate| Ranked {
                score: self.rank(self.value(candidate, snapshot), me, candidate.position(), danger),
                candidate,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}
