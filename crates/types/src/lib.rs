//! Shared types and constants for the board engine and its drivers.
//!
//! Everything here is plain data (serde derives only), so the engine, the
//! terminal view and the input mapping can all agree on one vocabulary.
//!
//! # Coordinates
//!
//! Cells are addressed as `(x, y)`: `x` grows left to right, `y` grows top to
//! bottom. Row 0 is the top of the grid, where new pieces spawn.
//!
//! # Examples
//!
//! ```
//! use tetris_board_types::{Command, Direction, ShapeKind};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Direction::Down.delta(), (0, 1));
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::Move(Direction::Left)));
//! ```

use serde::Serialize;

/// Board width used when none is given (10 columns).
pub const DEFAULT_WIDTH: u8 = 10;

/// Board height used when none is given (20 rows).
pub const DEFAULT_HEIGHT: u8 = 20;

/// Narrowest accepted board; the horizontal I piece needs four columns.
pub const MIN_WIDTH: u8 = 4;

/// Shortest accepted board; the vertical I piece needs four rows.
pub const MIN_HEIGHT: u8 = 4;

/// Widest accepted board.
pub const MAX_WIDTH: u8 = 40;

/// Tallest accepted board.
pub const MAX_HEIGHT: u8 = 100;

/// Seed used by `Board::new` so that default construction is reproducible.
pub const DEFAULT_SEED: u32 = 1;

/// Interval between gravity ticks in the reference render loop (milliseconds).
pub const DEFAULT_TICK_MS: u32 = 100;

/// Points for clearing N rows in a single lock (index = N).
///
/// - 0 rows: 0
/// - 1 row: 40
/// - 2 rows: 100
/// - 3 rows: 300
/// - 4 rows: 1200
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino kinds.
///
/// - **I**: straight bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All kinds in a fixed order (the order a fresh bag starts from).
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse a kind from its letter (case-insensitive).
    ///
    /// ```
    /// use tetris_board_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("I"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("o"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("square"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Lowercase letter for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }

    /// Stable numeric tag (1..=7) used in structural snapshots; 0 means empty.
    pub fn code(&self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::T => 3,
            ShapeKind::S => 4,
            ShapeKind::Z => 5,
            ShapeKind::J => 6,
            ShapeKind::L => 7,
        }
    }

    /// Inverse of [`ShapeKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ShapeKind::I),
            2 => Some(ShapeKind::O),
            3 => Some(ShapeKind::T),
            4 => Some(ShapeKind::S),
            5 => Some(ShapeKind::Z),
            6 => Some(ShapeKind::J),
            7 => Some(ShapeKind::L),
            _ => None,
        }
    }
}

/// One-cell movement directions accepted by `move_shape`.
///
/// Discriminants match the numeric encoding used by the render loop
/// (`0` = left, `1` = right, `2` = down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Down = 2,
}

impl Direction {
    /// All directions, indexed by their discriminant.
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Down];

    /// Offset `(dx, dy)` for a one-cell step in this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Decode the numeric direction used by the render loop.
    ///
    /// ```
    /// use tetris_board_types::Direction;
    ///
    /// assert_eq!(Direction::from_index(2), Some(Direction::Down));
    /// assert_eq!(Direction::from_index(3), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Discrete commands a driver can issue against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the active piece one cell; a blocked `Down` locks it.
    Move(Direction),
    /// Advance to the next orientation.
    Rotate,
    /// Drop straight down until the piece locks.
    HardDrop,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive).
    ///
    /// ```
    /// use tetris_board_types::{Command, Direction};
    ///
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("MOVEDOWN"), Some(Command::Move(Direction::Down)));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::Move(Direction::Left)),
            "moveright" => Some(Command::Move(Direction::Right)),
            "movedown" => Some(Command::Move(Direction::Down)),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// camelCase name of this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move(Direction::Left) => "moveLeft",
            Command::Move(Direction::Right) => "moveRight",
            Command::Move(Direction::Down) => "moveDown",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
        }
    }
}

/// A grid cell: `None` is empty, `Some(kind)` is a locked cell of that kind.
pub type Cell = Option<ShapeKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_codes_roundtrip_and_skip_zero() {
        for kind in ShapeKind::ALL {
            assert_ne!(kind.code(), 0);
            assert_eq!(ShapeKind::from_code(kind.code()), Some(kind));
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_code(0), None);
        assert_eq!(ShapeKind::from_code(8), None);
    }

    #[test]
    fn direction_indices_follow_discriminants() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(*dir as usize, i);
            assert_eq!(Direction::from_index(i as u8), Some(*dir));
        }
    }

    #[test]
    fn command_names_roundtrip() {
        for cmd in [
            Command::Move(Direction::Left),
            Command::Move(Direction::Right),
            Command::Move(Direction::Down),
            Command::Rotate,
            Command::HardDrop,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn line_scores_increase_with_rows() {
        assert_eq!(LINE_SCORES[0], 0);
        for pair in LINE_SCORES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn dimension_limits_are_ordered() {
        assert!(MIN_WIDTH <= DEFAULT_WIDTH && DEFAULT_WIDTH <= MAX_WIDTH);
        assert!(MIN_HEIGHT <= DEFAULT_HEIGHT && DEFAULT_HEIGHT <= MAX_HEIGHT);
    }
}
