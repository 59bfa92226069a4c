//! Danger-zone projections.

use std::collections::HashSet;

use game_content::NpcProfile;
use game_core::{CardinalDirection, MapBounds, Position};

/// Marks the cells an NPC could reach and hit before the next tick.
///
/// The NPC's heading is unknown, so the corridor is laid along both axes:
/// `speed + extension` cells either way along the axis, `attack_range`
/// cells either side across it.
pub fn project_npc(
    cells: &mut HashSet<Position>,
    map: MapBounds,
    origin: Position,
    profile: &NpcProfile,
    extension: u32,
) {
    if profile.friendly {
        return;
    }
    let along = (profile.speed + extension) as i32;
    let across = profile.attack_range as i32;

    for a in -along..=along {
        for b in -across..=across {
            for cell in [
                Position::new(origin.x + a, origin.y + b),
                Position::new(origin.x + b, origin.y + a),
            ] {
                if map.contains(cell) {
                    cells.insert(cell);
                }
            }
        }
    }
}

/// Marks the four cardinal lines an enemy player could shoot along.
pub fn project_player(cells: &mut HashSet<Position>, map: MapBounds, origin: Position, range: u32) {
    for direction in CardinalDirection::ALL {
        for k in 1..=range as i32 {
            let cell = origin.offset(direction, k);
            if !map.contains(cell) {
                break;
            }
            cells.insert(cell);
        }
    }
}

/// Marks a square of `radius` around a player, the player's own cell included.
pub fn buffer_ring(cells: &mut HashSet<Position>, map: MapBounds, origin: Position, radius: u32) {
    for r in 0..=radius {
        cells.extend(origin.ring(r).filter(|cell| map.contains(*cell)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(attack_range: u32, speed: u32) -> NpcProfile {
        NpcProfile {
            attack_range,
            speed,
            damage: 10.0,
            friendly: false,
        }
    }

    #[test]
    fn default_corridor_spans_nine_cells_plus_extension() {
        let mut cells = HashSet::new();
        let origin = Position::new(20, 20);
        project_npc(&mut cells, MapBounds::new(50), origin, &profile(0, 4), 0);

        // Two crossing lines of nine cells sharing the center.
        assert_eq!(cells.len(), 17);

        let mut extended = HashSet::new();
        project_npc(&mut extended, MapBounds::new(50), origin, &profile(0, 4), 1);
        assert!(extended.contains(&Position::new(25, 20)));
        assert!(extended.contains(&Position::new(20, 15)));
        assert!(!extended.contains(&Position::new(26, 20)));
    }

    #[test]
    fn corridor_is_clipped_to_the_map() {
        let mut cells = HashSet::new();
        project_npc(&mut cells, MapBounds::new(5), Position::ORIGIN, &profile(1, 4), 1);
        assert!(cells.iter().all(|cell| MapBounds::new(5).contains(*cell)));
        assert!(cells.contains(&Position::new(4, 1)));
    }

    #[test]
    fn friendly_species_project_nothing() {
        let mut cells = HashSet::new();
        let spirit = NpcProfile {
            friendly: true,
            ..profile(3, 3)
        };
        project_npc(&mut cells, MapBounds::new(20), Position::new(5, 5), &spirit, 1);
        assert!(cells.is_empty());
    }

    #[test]
    fn player_lines_stop_at_the_map_edge() {
        let mut cells = HashSet::new();
        project_player(&mut cells, MapBounds::new(10), Position::new(1, 5), 3);
        assert_eq!(cells.len(), 3 + 3 + 3 + 1);
        assert!(!cells.contains(&Position::new(1, 5)));
    }
}
