use std::collections::HashSet;

use super::{AgentState, MapBounds, SafeZone, WorldSnapshot};
use crate::state::{
    AllyView, Armor, EntityId, HealingItem, Inventory, NpcView, Obstacle, ObstacleTags, Placed,
    PlayerView, Position, StatusEffect, Weapon,
};

/// Assembles a [`WorldSnapshot`].
///
/// Entities placed outside the map are dropped by [`SnapshotBuilder::build`].
/// The safe zone defaults to one covering the whole map.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    map: MapBounds,
    safe_zone_radius: u32,
    me: AgentState,
    inventory: Inventory,
    players: Vec<PlayerView>,
    npcs: Vec<NpcView>,
    allies: Vec<AllyView>,
    obstacles: Vec<Obstacle>,
    weapons: Vec<Placed<Weapon>>,
    armors: Vec<Placed<Armor>>,
    healing_items: Vec<Placed<HealingItem>>,
}

impl SnapshotBuilder {
    pub fn new(map_size: u32, position: Position) -> Self {
        Self {
            map: MapBounds::new(map_size),
            safe_zone_radius: map_size,
            me: AgentState {
                name: String::from("me"),
                position,
                health: 100,
                effects: Vec::new(),
            },
            inventory: Inventory::new(),
            players: Vec::new(),
            npcs: Vec::new(),
            allies: Vec::new(),
            obstacles: Vec::new(),
            weapons: Vec::new(),
            armors: Vec::new(),
            healing_items: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.me.name = name.into();
        self
    }

    pub fn health(mut self, health: u32) -> Self {
        self.me.health = health;
        self
    }

    pub fn effect(mut self, effect: StatusEffect) -> Self {
        self.me.effects.push(effect);
        self
    }

    pub fn safe_zone_radius(mut self, radius: u32) -> Self {
        self.safe_zone_radius = radius;
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn player(mut self, name: impl Into<String>, position: Position, health: u32) -> Self {
        self.players.push(PlayerView {
            name: name.into(),
            position,
            health,
            effects: Vec::new(),
        });
        self
    }

    pub fn npc(mut self, id: impl Into<String>, species: impl Into<String>, position: Position) -> Self {
        self.npcs.push(NpcView {
            id: EntityId::new(id),
            species: species.into(),
            position,
            alive: true,
        });
        self
    }

    pub fn npc_view(mut self, npc: NpcView) -> Self {
        self.npcs.push(npc);
        self
    }

    pub fn ally(mut self, id: impl Into<String>, position: Position) -> Self {
        self.allies.push(AllyView {
            id: EntityId::new(id),
            position,
        });
        self
    }

    pub fn obstacle(mut self, id: impl Into<String>, position: Position, tags: ObstacleTags) -> Self {
        self.obstacles.push(Obstacle::new(id, position, tags));
        self
    }

    /// A plain wall: blocks movement and shots.
    pub fn wall(self, position: Position) -> Self {
        self.obstacle("WALL", position, ObstacleTags::empty())
    }

    pub fn weapon(mut self, weapon: Weapon, position: Position) -> Self {
        self.weapons.push(Placed::new(weapon, position));
        self
    }

    pub fn armor(mut self, armor: Armor, position: Position) -> Self {
        self.armors.push(Placed::new(armor, position));
        self
    }

    pub fn healing(mut self, item: HealingItem, position: Position) -> Self {
        self.healing_items.push(Placed::new(item, position));
        self
    }

    pub fn build(self) -> WorldSnapshot {
        let map = self.map;
        let inside = |p: Position| map.contains(p);

        let obstacles: Vec<Obstacle> = self
            .obstacles
            .into_iter()
            .filter(|o| inside(o.position))
            .collect();
        let hard_cells: HashSet<Position> = obstacles
            .iter()
            .filter(|o| o.is_hard())
            .map(|o| o.position)
            .collect();
        let hazard_cells: HashSet<Position> = obstacles
            .iter()
            .filter(|o| o.is_hazard())
            .map(|o| o.position)
            .collect();
        let concealed_cells: HashSet<Position> = obstacles
            .iter()
            .filter(|o| o.is_concealing())
            .map(|o| o.position)
            .collect();

        WorldSnapshot {
            map,
            safe_zone: SafeZone::new(map.center(), self.safe_zone_radius),
            me: self.me,
            inventory: self.inventory,
            players: self.players.into_iter().filter(|p| inside(p.position)).collect(),
            npcs: self.npcs.into_iter().filter(|n| inside(n.position)).collect(),
            allies: self.allies.into_iter().filter(|a| inside(a.position)).collect(),
            obstacles,
            weapons: self.weapons.into_iter().filter(|w| inside(w.position)).collect(),
            armors: self.armors.into_iter().filter(|a| inside(a.position)).collect(),
            healing_items: self
                .healing_items
                .into_iter()
                .filter(|h| inside(h.position))
                .collect(),
            hard_cells,
            hazard_cells,
            concealed_cells,
        }
    }
}
