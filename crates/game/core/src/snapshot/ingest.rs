//! Snapshot ingestion from the server's map-update payload.
//!
//! [`MapUpdate`] mirrors the JSON the game server pushes on every tick.
//! [`WorldSnapshot::ingest`] validates it and turns it into the typed model.

use serde::Deserialize;

use super::{SnapshotBuilder, WorldSnapshot};
use crate::state::{
    Armor, ArmorSlot, HealingItem, Inventory, MAX_HEALING_ITEMS, NpcView, ObstacleTags, Position,
    StatusEffect, Weapon, WeaponKind,
};

/// Reasons a map update cannot produce a usable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("map size must be positive")]
    InvalidMapSize,

    #[error("player {0} is not present in the map update")]
    MissingPlayer(String),

    #[error("player {0} is dead")]
    DeadPlayer(String),
}

fn full_health() -> u32 {
    100
}

fn alive() -> bool {
    true
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapUpdate {
    pub map_size: u32,
    /// Safe-zone radius around the map center.
    pub safe_zone: u32,
    /// Name of the player this bot controls.
    pub current_player: String,
    pub players: Vec<RawPlayer>,
    pub npcs: Vec<RawNpc>,
    pub allies: Vec<RawAlly>,
    pub obstacles: Vec<RawObstacle>,
    pub weapons: Vec<RawWeapon>,
    pub armors: Vec<RawArmor>,
    pub healing_items: Vec<RawHealing>,
    pub inventory: RawInventory,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default = "full_health")]
    pub health: u32,
    #[serde(default)]
    pub effects: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNpc {
    pub id: String,
    /// Falls back to `id` when absent; the server often uses the species as id.
    #[serde(default)]
    pub species: Option<String>,
    pub x: i32,
    pub y: i32,
    #[serde(default = "alive")]
    pub alive: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlly {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObstacle {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeapon {
    pub id: String,
    /// `GUN`, `MELEE`, `THROWABLE` or `SPECIAL`.
    pub kind: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub pickup_points: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArmor {
    pub id: String,
    /// `HELMET` or `ARMOR`.
    pub kind: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub health_point: u32,
    #[serde(default)]
    pub damage_reduce: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHealing {
    pub id: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub heal_hp: u32,
    #[serde(default)]
    pub effect: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeaponRef {
    pub id: String,
    #[serde(default)]
    pub pickup_points: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInventory {
    pub gun: Option<RawWeaponRef>,
    pub melee: Option<RawWeaponRef>,
    pub throwable: Option<RawWeaponRef>,
    pub special: Option<RawWeaponRef>,
    pub helmet: Option<RawArmor>,
    pub armor: Option<RawArmor>,
    pub healing_items: Vec<RawHealing>,
}

/// Unknown values are logged and yield `None`; the caller drops the entity.
fn parse_enum<T: std::str::FromStr>(field: &'static str, id: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::warn!(field, id, value, "unknown enum value, entity skipped");
    }
    parsed
}

/// Unknown effect names are skipped; the server adds effects over time.
fn parse_effects(names: &[String]) -> Vec<StatusEffect> {
    names.iter().filter_map(|name| name.parse().ok()).collect()
}

fn parse_armor(raw: &RawArmor) -> Option<Armor> {
    let slot: ArmorSlot = parse_enum("armor kind", &raw.id, &raw.kind)?;
    Some(Armor::new(
        raw.id.clone(),
        slot,
        raw.health_point,
        raw.damage_reduce,
    ))
}

fn parse_healing(raw: &RawHealing) -> HealingItem {
    let item = HealingItem::new(raw.id.clone(), raw.heal_hp);
    match raw.effect.as_deref().and_then(|e| e.parse().ok()) {
        Some(effect) => item.with_effect(effect),
        None => item,
    }
}

fn parse_inventory(raw: &RawInventory) -> Inventory {
    let mut inventory = Inventory::new();
    let held = [
        (&raw.gun, WeaponKind::Gun),
        (&raw.melee, WeaponKind::Melee),
        (&raw.throwable, WeaponKind::Throwable),
        (&raw.special, WeaponKind::Special),
    ];
    for (weapon, kind) in held {
        if let Some(weapon) = weapon {
            inventory.equip_weapon(
                Weapon::new(weapon.id.clone(), kind).with_pickup_points(weapon.pickup_points),
            );
        }
    }
    for armor in [&raw.helmet, &raw.armor].into_iter().flatten() {
        if let Some(armor) = parse_armor(armor) {
            inventory.equip_armor(armor);
        }
    }

    // Strongest heals first so an overfull bag keeps the most useful ones.
    let mut healing: Vec<&RawHealing> = raw.healing_items.iter().collect();
    healing.sort_by(|a, b| b.heal_hp.cmp(&a.heal_hp));
    for item in healing {
        if let Err(dropped) = inventory.add_healing(parse_healing(item)) {
            tracing::warn!(
                item = %dropped.id,
                capacity = MAX_HEALING_ITEMS,
                "healing inventory full, item dropped"
            );
        }
    }
    inventory
}

impl WorldSnapshot {
    /// Builds a snapshot from a raw map update.
    ///
    /// Fails when the map size is zero or the controlled player is missing or
    /// dead; the caller skips the decision cycle in that case. Ground items
    /// with an unrecognised kind are dropped rather than failing the update.
    pub fn ingest(update: &MapUpdate) -> Result<WorldSnapshot, IngestError> {
        if update.map_size == 0 {
            return Err(IngestError::InvalidMapSize);
        }

        let me = update
            .players
            .iter()
            .find(|p| p.name == update.current_player)
            .ok_or_else(|| IngestError::MissingPlayer(update.current_player.clone()))?;
        if me.health == 0 {
            return Err(IngestError::DeadPlayer(me.name.clone()));
        }

        let mut builder = SnapshotBuilder::new(update.map_size, Position::new(me.x, me.y))
            .name(me.name.clone())
            .health(me.health.min(100))
            .safe_zone_radius(update.safe_zone)
            .inventory(parse_inventory(&update.inventory));
        for effect in parse_effects(&me.effects) {
            builder = builder.effect(effect);
        }

        for player in update.players.iter().filter(|p| p.name != me.name) {
            builder = builder.player(player.name.clone(), Position::new(player.x, player.y), player.health);
        }

        for npc in &update.npcs {
            builder = builder.npc_view(NpcView {
                id: npc.id.clone().into(),
                species: npc.species.clone().unwrap_or_else(|| npc.id.clone()),
                position: Position::new(npc.x, npc.y),
                alive: npc.alive,
            });
        }

        for ally in &update.allies {
            builder = builder.ally(ally.id.clone(), Position::new(ally.x, ally.y));
        }

        for obstacle in &update.obstacles {
            let tags = obstacle
                .tags
                .iter()
                .filter_map(|tag| ObstacleTags::from_tag_name(tag))
                .fold(ObstacleTags::empty(), |acc, tag| acc | tag);
            builder = builder.obstacle(obstacle.id.clone(), Position::new(obstacle.x, obstacle.y), tags);
        }

        for weapon in &update.weapons {
            let Some(kind) = parse_enum::<WeaponKind>("weapon kind", &weapon.id, &weapon.kind) else {
                continue;
            };
            builder = builder.weapon(
                Weapon::new(weapon.id.clone(), kind).with_pickup_points(weapon.pickup_points),
                Position::new(weapon.x, weapon.y),
            );
        }

        for raw in &update.armors {
            if let Some(armor) = parse_armor(raw) {
                builder = builder.armor(armor, Position::new(raw.x, raw.y));
            }
        }

        for item in &update.healing_items {
            builder = builder.healing(parse_healing(item), Position::new(item.x, item.y));
        }

        Ok(builder.build())
    }
}
