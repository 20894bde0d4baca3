//! Terminal input mapping.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Timing and
//! repeat handling stay with the driver; the engine only ever sees commands.

pub mod map;

pub use tetris_board_types as types;

pub use map::{handle_key_event, should_quit};
