//! Core engine - a deterministic falling-block simulation
//!
//! This crate contains the game rules and the board state machine. It has no
//! dependencies on terminals, timers or input devices: callers issue discrete
//! commands and gravity ticks and read back snapshots.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size occupancy grid, collision test, row clearing
//! - [`shapes`]: orientation tables and spawn placement for the seven kinds
//! - [`rng`]: LCG plus bag/uniform shape queue with non-consuming peek
//! - [`scoring`]: line-clear reward schedule
//! - [`board`]: the engine tying it all together
//! - [`snapshot`]: structural copies of an engine for views and serialization
//!
//! # Example
//!
//! ```
//! use tetris_board_core::Board;
//! use tetris_board_core::types::Direction;
//!
//! let mut board = Board::new(10, 20).unwrap();
//! board.move_shape(Direction::Left);
//! board.rotate();
//! while board.tick() {
//!     if board.pieces() > 3 {
//!         break;
//!     }
//! }
//! assert_eq!(board.get_score(), 0);
//! print!("{}", board.render());
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use tetris_board_types as types;

pub use board::{Board, BoardConfig, LockEvent, Motion, Piece, RotationPolicy};
pub use error::BoardError;
pub use grid::Grid;
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::line_clear_points;
pub use shapes::{orientation_count, orientations, shape, spawn_anchor, Shape};
pub use snapshot::{ActiveSnapshot, BoardSnapshot};
