//! Error type for the few failures the engine can report.
//!
//! Only construction can fail. Blocked moves, locks and Game Over are ordinary
//! gameplay outcomes and are returned as plain values by the engine.

use std::fmt;

use crate::types::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height outside `MIN_*..=MAX_*`.
    InvalidDimensions { width: usize, height: usize },
    /// A seeded grid does not match the configured dimensions.
    GridShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid board dimensions {width}x{height} (allowed {MIN_WIDTH}..={MAX_WIDTH} by {MIN_HEIGHT}..={MAX_HEIGHT})"
            ),
            Self::GridShapeMismatch { expected, actual } => write!(
                f,
                "grid is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for BoardError {}
