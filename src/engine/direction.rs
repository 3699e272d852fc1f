use std::str::FromStr;

use crate::error::Error;

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Maps a drag vector to the direction of its dominant axis. Screen coordinates are assumed,
    /// so a positive `dy` points down. Returns None for a zero-length drag.
    pub fn from_swipe(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, 0) => None,
            (dx, dy) if dx.abs() > dy.abs() && dx > 0 => Some(Self::Right),
            (dx, dy) if dx.abs() > dy.abs() => Some(Self::Left),
            (_, dy) if dy > 0 => Some(Self::Down),
            _ => Some(Self::Up),
        }
    }

    /// Lines run along rows for horizontal moves and along columns for vertical ones.
    pub(crate) fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Right and Down lines are read from the far edge so collapsing always packs toward index 0.
    pub(crate) fn is_reversed(&self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// Wire code used by hosts that hand over raw input: 0=up, 1=down, 2=left, 3=right.
impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}
