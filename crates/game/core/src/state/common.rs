use std::fmt;

/// Identifier of an entity as reported by the game server.
///
/// Players are identified by name, NPCs and items by their server id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete grid position expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid distance used by every tactical computation (Manhattan).
    pub fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Ring distance, used only to enumerate square rings around a cell.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn step(self, direction: CardinalDirection) -> Self {
        self.offset(direction, 1)
    }

    pub fn offset(self, direction: CardinalDirection, cells: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * cells, self.y + dy * cells)
    }

    /// The four orthogonally adjacent cells.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        CardinalDirection::ALL.into_iter().map(move |dir| self.step(dir))
    }

    /// The eight cells surrounding this one.
    pub fn surrounding(self) -> impl Iterator<Item = Position> {
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }

    /// Cells at exactly `radius` ring distance, in row-major order.
    pub fn ring(self, radius: u32) -> impl Iterator<Item = Position> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(move |&(dx, dy)| dx.abs() == r || dy.abs() == r)
            .map(move |(dx, dy)| Position::new(self.x + dx, self.y + dy))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four grid directions.
///
/// North increases `y`, matching the server's `u` path step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::East,
        }
    }

    /// Character used by the server's path strings.
    pub fn as_char(self) -> char {
        match self {
            CardinalDirection::North => 'u',
            CardinalDirection::South => 'd',
            CardinalDirection::East => 'r',
            CardinalDirection::West => 'l',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'u' => Some(CardinalDirection::North),
            'd' => Some(CardinalDirection::South),
            'r' => Some(CardinalDirection::East),
            'l' => Some(CardinalDirection::West),
            _ => None,
        }
    }

    /// Direction that best points from `from` to `to`.
    ///
    /// The axis with the larger absolute delta wins; ties go to the
    /// horizontal axis. Returns `None` when both cells coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        let direction = if dx.abs() >= dy.abs() {
            if dx > 0 {
                CardinalDirection::East
            } else {
                CardinalDirection::West
            }
        } else if dy > 0 {
            CardinalDirection::North
        } else {
            CardinalDirection::South
        };
        Some(direction)
    }
}

/// Sequence of unit steps, rendered in the server's path-string form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(pub Vec<CardinalDirection>);

impl Path {
    pub fn new(steps: Vec<CardinalDirection>) -> Self {
        Self(steps)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<CardinalDirection> {
        self.0.first().copied()
    }

    pub fn steps(&self) -> &[CardinalDirection] {
        &self.0
    }

    /// Path containing only the first step of this one.
    pub fn prefix(&self) -> Path {
        Path(self.0.iter().take(1).copied().collect())
    }

    /// Cell reached after following every step from `start`.
    pub fn end(&self, start: Position) -> Position {
        self.0.iter().fold(start, |pos, dir| pos.step(*dir))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            write!(f, "{}", step.as_char())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Path {
    type Err = char;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| CardinalDirection::from_char(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

/// Anything that occupies a grid cell.
pub trait Located {
    fn position(&self) -> Position;

    fn distance_to(&self, target: Position) -> u32 {
        self.position().distance(target)
    }
}

impl Located for Position {
    fn position(&self) -> Position {
        *self
    }
}

/// An item lying on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed<T> {
    pub item: T,
    pub position: Position,
}

impl<T> Placed<T> {
    pub fn new(item: T, position: Position) -> Self {
        Self { item, position }
    }
}

impl<T> Located for Placed<T> {
    fn position(&self) -> Position {
        self.position
    }
}
