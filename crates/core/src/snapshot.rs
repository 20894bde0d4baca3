//! Structural snapshots of an engine, for views and serialization.

use serde::Serialize;

use crate::board::Piece;
use crate::types::ShapeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub orientation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute cell positions of the active piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        Piece::from(*self).cells()
    }
}

impl From<ActiveSnapshot> for Piece {
    fn from(value: ActiveSnapshot) -> Self {
        Piece {
            kind: value.kind,
            orientation: value.orientation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Point-in-time copy of everything a display needs.
///
/// `cells` holds locked cells only, one `u8` per cell: 0 for empty, otherwise
/// [`ShapeKind::code`]. The active piece is reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub next: ShapeKind,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl BoardSnapshot {
    /// Locked cells with the active piece merged in.
    pub fn overlay(&self) -> Vec<Vec<u8>> {
        let mut rows = self.cells.clone();
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell = active.kind.code();
                }
            }
        }
        rows
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
