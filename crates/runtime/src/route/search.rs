//! Shortest-path search seam.

use std::collections::{HashMap, HashSet, VecDeque};

use game_core::{CardinalDirection, MapBounds, Path, Position};

/// Grid shortest-path primitive.
///
/// The game SDK ships its own; [`GridSearch`] is a breadth-first stand-in
/// with the same contract: a 4-connected path from `start` to `target`
/// that never enters a cell of `avoid` and never leaves the map, or `None`.
/// `start == target` yields an empty path.
pub trait PathSearch {
    fn shortest_path(
        &self,
        map: MapBounds,
        avoid: &HashSet<Position>,
        start: Position,
        target: Position,
    ) -> Option<Path>;
}

/// Breadth-first search over the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridSearch;

impl PathSearch for GridSearch {
    fn shortest_path(
        &self,
        map: MapBounds,
        avoid: &HashSet<Position>,
        start: Position,
        target: Position,
    ) -> Option<Path> {
        if start == target {
            return Some(Path::default());
        }
        if !map.contains(start) || !map.contains(target) || avoid.contains(&target) {
            return None;
        }

        let mut came_from: HashMap<Position, (Position, CardinalDirection)> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == target {
                break;
            }
            for direction in CardinalDirection::ALL {
                let next = current.step(direction);
                if !map.contains(next) || avoid.contains(&next) || !visited.insert(next) {
                    continue;
                }
                came_from.insert(next, (current, direction));
                queue.push_back(next);
            }
        }

        let mut steps = Vec::new();
        let mut current = target;
        while current != start {
            let (previous, direction) = came_from.get(&current).copied()?;
            steps.push(direction);
            current = previous;
        }
        steps.reverse();
        Some(Path::new(steps))
    }
}
