use arrayvec::ArrayVec;

use super::items::{Armor, ArmorSlot, HealingItem, Weapon, WeaponKind};

/// Number of healing items a player can carry at once.
pub const MAX_HEALING_ITEMS: usize = 4;

/// Equipment and consumables currently held by the agent.
///
/// One weapon per [`WeaponKind`], one armor piece per [`ArmorSlot`], and a
/// bounded stack of healing items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    gun: Option<Weapon>,
    melee: Option<Weapon>,
    throwable: Option<Weapon>,
    special: Option<Weapon>,
    helmet: Option<Armor>,
    body: Option<Armor>,
    healing: ArrayVec<HealingItem, MAX_HEALING_ITEMS>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `weapon` into the slot of its kind, returning what was there.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon_slot_mut(weapon.kind).replace(weapon)
    }

    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        let slot = match armor.slot {
            ArmorSlot::Helmet => &mut self.helmet,
            ArmorSlot::Body => &mut self.body,
        };
        slot.replace(armor)
    }

    /// Adds a healing item. Returns the item back when the stack is full.
    pub fn add_healing(&mut self, item: HealingItem) -> Result<(), HealingItem> {
        self.healing.try_push(item).map_err(|err| err.element())
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        match kind {
            WeaponKind::Gun => self.gun.as_ref(),
            WeaponKind::Melee => self.melee.as_ref(),
            WeaponKind::Throwable => self.throwable.as_ref(),
            WeaponKind::Special => self.special.as_ref(),
        }
    }

    /// True when a real weapon of `kind` is held. Bare hands do not count.
    pub fn has_weapon(&self, kind: WeaponKind) -> bool {
        self.weapon(kind).is_some_and(|w| !w.is_bare_hands())
    }

    /// True when any weapon besides bare hands is held.
    pub fn is_armed(&self) -> bool {
        WeaponKind::RANGED_FIRST
            .iter()
            .any(|kind| self.has_weapon(*kind))
    }

    /// Held weapons in ranged-first order.
    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        WeaponKind::RANGED_FIRST
            .into_iter()
            .filter_map(|kind| self.weapon(kind))
    }

    pub fn armor(&self, slot: ArmorSlot) -> Option<&Armor> {
        match slot {
            ArmorSlot::Helmet => self.helmet.as_ref(),
            ArmorSlot::Body => self.body.as_ref(),
        }
    }

    pub fn healing_items(&self) -> &[HealingItem] {
        &self.healing
    }

    pub fn healing_is_full(&self) -> bool {
        self.healing.is_full()
    }

    fn weapon_slot_mut(&mut self, kind: WeaponKind) -> &mut Option<Weapon> {
        match kind {
            WeaponKind::Gun => &mut self.gun,
            WeaponKind::Melee => &mut self.melee,
            WeaponKind::Throwable => &mut self.throwable,
            WeaponKind::Special => &mut self.special,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hands_do_not_count_as_armed() {
        let mut inventory = Inventory::new();
        inventory.equip_weapon(Weapon::new(Weapon::BARE_HANDS, WeaponKind::Melee));
        assert!(!inventory.is_armed());
        assert!(!inventory.has_weapon(WeaponKind::Melee));

        inventory.equip_weapon(Weapon::new("CROSSBOW", WeaponKind::Gun));
        assert!(inventory.is_armed());
        let ids: Vec<_> = inventory.weapons().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["CROSSBOW", "HAND"]);
    }

    #[test]
    fn healing_stack_is_bounded() {
        let mut inventory = Inventory::new();
        for _ in 0..MAX_HEALING_ITEMS {
            assert!(inventory.add_healing(HealingItem::new("GOD_LEAF", 10)).is_ok());
        }
        assert!(inventory.healing_is_full());
        let rejected = inventory.add_healing(HealingItem::new("ELIXIR", 5));
        assert_eq!(rejected.map_err(|item| item.heal_amount), Err(5));
    }
}
