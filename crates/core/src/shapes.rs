//! Shapes module - orientation tables for the seven tetrominoes
//!
//! Each kind owns a fixed table of orientations; each orientation lists the
//! offsets of its four cells inside the kind's bounding box. Rotation walks
//! the table cyclically, so O has a single state, I/S/Z alternate between two
//! and T/J/L cycle through four.

use crate::types::ShapeKind;

/// Offset of a single cell relative to the piece anchor
pub type Offset = (i8, i8);

/// Four cell offsets of one orientation
pub type Shape = [Offset; 4];

const I_SHAPES: [Shape; 2] = [
    // horizontal, on row 1 of the 4x4 box
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // vertical, column 2
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_SHAPES: [Shape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_SHAPES: [Shape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [Shape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: [Shape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: [Shape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [Shape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Anchor shifts tried in order by the kick rotation policy.
///
/// The first entry is the unshifted rotation, so a kick search never prefers
/// a shifted placement over an in-place one.
pub const KICK_OFFSETS: [Offset; 6] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0), (0, -1)];

/// Orientation table for a kind. Index 0 is the spawn orientation.
pub fn orientations(kind: ShapeKind) -> &'static [Shape] {
    match kind {
        ShapeKind::I => &I_SHAPES,
        ShapeKind::O => &O_SHAPES,
        ShapeKind::T => &T_SHAPES,
        ShapeKind::S => &S_SHAPES,
        ShapeKind::Z => &Z_SHAPES,
        ShapeKind::J => &J_SHAPES,
        ShapeKind::L => &L_SHAPES,
    }
}

pub fn orientation_count(kind: ShapeKind) -> u8 {
    orientations(kind).len() as u8
}

/// Cell offsets for `kind` in `orientation` (taken modulo the table size).
pub fn shape(kind: ShapeKind, orientation: u8) -> Shape {
    let table = orientations(kind);
    table[orientation as usize % table.len()]
}

/// The orientation after one rotation step.
pub fn next_orientation(kind: ShapeKind, orientation: u8) -> u8 {
    (orientation + 1) % orientation_count(kind)
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of a shape's offsets.
pub fn bounds(shape: &Shape) -> (i8, i8, i8, i8) {
    shape.iter().fold(
        (i8::MAX, i8::MAX, i8::MIN, i8::MIN),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    )
}

/// Spawn anchor for `kind` on a grid `width` columns wide.
///
/// The spawn orientation is centred horizontally (leaning left on odd slack)
/// and its topmost cells sit on row 0.
pub fn spawn_anchor(kind: ShapeKind, width: u8) -> (i8, i8) {
    let (min_x, min_y, max_x, _) = bounds(&shape(kind, 0));
    let span = (max_x - min_x + 1) as i16;
    let x = (width as i16 - span) / 2 - min_x as i16;
    (x as i8, -min_y)
}
