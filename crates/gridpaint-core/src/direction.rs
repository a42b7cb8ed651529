use serde::{Deserialize, Serialize};

/// Cardinal directions, clockwise from north.
///
/// The discriminants are the blueprint encoding: `0`, `2`, `4` and `6`.
/// Serialized as that number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    #[default]
    North = 0,
    East = 2,
    South = 4,
    West = 6,
}

/// A number that is not one of the four cardinal direction encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction {0}, expected one of 0, 2, 4, 6")]
pub struct InvalidDirection(pub u8);

impl Direction {
    /// All four cardinal directions in clockwise order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Parse the blueprint encoding. Only `0`, `2`, `4` and `6` are valid.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Direction::North),
            2 => Some(Direction::East),
            4 => Some(Direction::South),
            6 => Some(Direction::West),
            _ => None,
        }
    }

    /// The blueprint encoding of this direction.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The reciprocal direction (`index + 4` modulo 8).
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Whether this direction lies on the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Unit cell offset in screen coordinates (y grows southward).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Lowercase name as used in data files.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::from_index(value).ok_or(InvalidDirection(value))
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which end of an underground pair an entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionType {
    #[default]
    Input,
    Output,
}

impl DirectionType {
    /// The other end of the pair.
    pub fn flipped(self) -> Self {
        match self {
            DirectionType::Input => DirectionType::Output,
            DirectionType::Output => DirectionType::Input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_accepts_cardinals_only() {
        assert_eq!(Direction::from_index(0), Some(Direction::North));
        assert_eq!(Direction::from_index(2), Some(Direction::East));
        assert_eq!(Direction::from_index(4), Some(Direction::South));
        assert_eq!(Direction::from_index(6), Some(Direction::West));
        for i in [1, 3, 5, 7, 8, 255] {
            assert_eq!(Direction::from_index(i), None);
        }
    }

    #[test]
    fn opposite_is_plus_four() {
        for dir in Direction::all() {
            assert_eq!(dir.opposite().index(), (dir.index() + 4) % 8);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn rotate_cw_twice_is_opposite() {
        for dir in Direction::all() {
            assert_eq!(dir.rotate_cw().rotate_cw(), dir.opposite());
        }
    }

    #[test]
    fn names() {
        let names: Vec<_> = Direction::all().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["north", "east", "south", "west"]);
        assert_eq!(Direction::West.to_string(), "west");
    }

    #[test]
    fn offsets_are_screen_space() {
        assert_eq!(Direction::North.offset(), (0, -1));
        assert_eq!(Direction::South.offset(), (0, 1));
        assert!(Direction::East.is_horizontal());
        assert!(!Direction::North.is_horizontal());
    }

    #[test]
    fn try_from_reports_invalid_value() {
        assert_eq!(Direction::try_from(3u8), Err(InvalidDirection(3)));
        assert_eq!(Direction::try_from(6u8), Ok(Direction::West));
    }

    #[test]
    fn direction_type_flips() {
        assert_eq!(DirectionType::default(), DirectionType::Input);
        assert_eq!(DirectionType::Input.flipped(), DirectionType::Output);
        assert_eq!(DirectionType::Output.flipped(), DirectionType::Input);
    }
}
