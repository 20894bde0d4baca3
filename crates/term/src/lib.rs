//! Terminal rendering for the board engine.
//!
//! Rendering is split in two: [`view`] turns a `BoardSnapshot` into a
//! framebuffer without any I/O, and [`renderer`] flushes framebuffers to a
//! real terminal, redrawing only the runs that changed.

pub mod fb;
pub mod renderer;
pub mod view;

pub use tetris_board_core as core;
pub use tetris_board_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{BoardView, Viewport};
