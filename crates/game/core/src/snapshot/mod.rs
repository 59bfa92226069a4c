//! Read-only view of the world for one decision cycle.
//!
//! A [`WorldSnapshot`] is built once per map update, either by the ingestor
//! ([`WorldSnapshot::ingest`]) or by [`SnapshotBuilder`], and never mutated
//! afterwards. All fields are private; components only get shared borrows.
mod builder;
#[cfg(feature = "serde")]
mod ingest;

use std::collections::HashSet;

pub use builder::SnapshotBuilder;
#[cfg(feature = "serde")]
pub use ingest::{
    IngestError, MapUpdate, RawAlly, RawArmor, RawHealing, RawInventory, RawNpc, RawObstacle,
    RawPlayer, RawWeapon, RawWeaponRef,
};

use crate::state::{
    AllyView, Armor, HealingItem, Inventory, Located, NpcView, Obstacle, Placed, PlayerView,
    Position, StatusEffect, Weapon,
};

/// Square map `[0, size) x [0, size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapBounds {
    pub size: u32,
}

impl MapBounds {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn contains(&self, position: Position) -> bool {
        let size = self.size as i64;
        (0..size).contains(&(position.x as i64)) && (0..size).contains(&(position.y as i64))
    }

    pub fn center(&self) -> Position {
        let half = (self.size / 2) as i32;
        Position::new(half, half)
    }

    /// Closest in-bounds cell.
    pub fn clamp(&self, position: Position) -> Position {
        let max = self.size.saturating_sub(1) as i32;
        Position::new(position.x.clamp(0, max), position.y.clamp(0, max))
    }

    /// Every cell of the map, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }
}

/// The shrinking playable region, centered on the map center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafeZone {
    pub center: Position,
    pub radius: u32,
}

impl SafeZone {
    pub fn new(center: Position, radius: u32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.center.distance(position) <= self.radius
    }
}

/// The agent's own state.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub name: String,
    pub position: Position,
    pub health: u32,
    pub effects: Vec<StatusEffect>,
}

impl AgentState {
    /// Health after subtracting `penalty` for every active debuff.
    pub fn effective_health(&self, penalty: u32) -> u32 {
        let debuffs = self.effects.iter().filter(|e| e.is_debuff()).count() as u32;
        self.health.saturating_sub(debuffs * penalty)
    }
}

impl Located for AgentState {
    fn position(&self) -> Position {
        self.position
    }
}

/// Everything the agent knows about the world on the current tick.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    map: MapBounds,
    safe_zone: SafeZone,
    me: AgentState,
    inventory: Inventory,
    players: Vec<PlayerView>,
    npcs: Vec<NpcView>,
    allies: Vec<AllyView>,
    obstacles: Vec<Obstacle>,
    weapons: Vec<Placed<Weapon>>,
    armors: Vec<Placed<Armor>>,
    healing_items: Vec<Placed<HealingItem>>,
    hard_cells: HashSet<Position>,
    hazard_cells: HashSet<Position>,
    concealed_cells: HashSet<Position>,
}

impl WorldSnapshot {
    pub fn builder(map_size: u32, position: Position) -> SnapshotBuilder {
        SnapshotBuilder::new(map_size, position)
    }

    pub fn map(&self) -> MapBounds {
        self.map
    }

    pub fn safe_zone(&self) -> SafeZone {
        self.safe_zone
    }

    pub fn me(&self) -> &AgentState {
        &self.me
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Other players, dead ones included.
    pub fn players(&self) -> &[PlayerView] {
        &self.players
    }

    pub fn living_players(&self) -> impl Iterator<Item = &PlayerView> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn npcs(&self) -> &[NpcView] {
        &self.npcs
    }

    pub fn living_npcs(&self) -> impl Iterator<Item = &NpcView> {
        self.npcs.iter().filter(|n| n.alive)
    }

    pub fn allies(&self) -> &[AllyView] {
        &self.allies
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn weapons(&self) -> &[Placed<Weapon>] {
        &self.weapons
    }

    pub fn armors(&self) -> &[Placed<Armor>] {
        &self.armors
    }

    pub fn healing_items(&self) -> &[Placed<HealingItem>] {
        &self.healing_items
    }

    /// Cells holding an obstacle that blocks movement.
    pub fn hard_cells(&self) -> &HashSet<Position> {
        &self.hard_cells
    }

    /// Walkable cells that hurt (traps).
    pub fn hazard_cells(&self) -> &HashSet<Position> {
        &self.hazard_cells
    }

    /// Standing in a bush or other concealing obstacle.
    pub fn is_concealed(&self, position: Position) -> bool {
        self.concealed_cells.contains(&position)
    }

    /// Out of bounds or occupied by a hard obstacle.
    pub fn is_blocked(&self, position: Position) -> bool {
        !self.map.contains(position) || self.hard_cells.contains(&position)
    }

    pub fn is_player_at(&self, position: Position) -> bool {
        self.living_players().any(|p| p.position == position)
    }

    pub fn agent_in_safe_zone(&self) -> bool {
        self.safe_zone.contains(self.me.position)
    }

    /// Number of hard obstacles among the eight surrounding cells.
    /// Map edges do not count.
    pub fn cover_count(&self, position: Position) -> u32 {
        position
            .surrounding()
            .filter(|cell| self.hard_cells.contains(cell))
            .count() as u32
    }
}
