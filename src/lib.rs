//! Falling-block board engine (workspace facade crate).
//!
//! The engine and its terminal front end live in dedicated crates under
//! `crates/`; this package re-exports them as `tetris_board::{core, input,
//! term, types}` and adds the run configuration and the render-loop driver.

pub mod config;
pub mod driver;

pub use tetris_board_core as core;
pub use tetris_board_input as input;
pub use tetris_board_term as term;
pub use tetris_board_types as types;
