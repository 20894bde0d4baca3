//! Driver - the render loop around one engine
//!
//! The engine knows nothing about time or devices. The driver owns a board,
//! applies commands as they arrive, issues one gravity tick per frame and
//! swaps in a fresh board whenever a tick reports Game Over.

use anyhow::Result;
use tracing::info;

use crate::core::{Board, BoardConfig, BoardSnapshot, SimpleRng};
use crate::types::{Command, Direction};

/// State produced by one frame, captured before any restart.
#[derive(Debug, Clone)]
pub struct Frame {
    pub text: String,
    pub snapshot: BoardSnapshot,
    /// This frame's tick ended the game; the driver has already restarted.
    pub game_over: bool,
}

pub struct Driver {
    config: BoardConfig,
    board: Board,
    /// Source of random moves when autoplaying.
    autoplay: Option<SimpleRng>,
    /// Boards started so far, the current one included.
    games: u32,
    frames: u64,
}

impl Driver {
    pub fn new(config: BoardConfig, autoplay: bool) -> Result<Self> {
        let board = Board::with_config(config)?;
        Ok(Self {
            config,
            board,
            autoplay: autoplay.then(|| SimpleRng::new(config.seed ^ 0x9e37_79b9)),
            games: 1,
            frames: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply a command immediately. Returns whether the board changed.
    ///
    /// A hard drop can end the game; the board is replaced right away in
    /// that case, just as after a tick.
    pub fn command(&mut self, command: Command) -> Result<bool> {
        let changed = self.board.apply(command);
        if self.board.is_game_over() {
            self.restart()?;
        }
        Ok(changed)
    }

    /// Advance one frame: an autoplay move (if enabled), then one tick.
    pub fn frame(&mut self) -> Result<Frame> {
        if let Some(rng) = self.autoplay.as_mut() {
            let direction = Direction::ALL[rng.next_range(Direction::ALL.len() as u32) as usize];
            self.board.move_shape(direction);
        }

        let running = self.board.tick();
        self.frames += 1;

        let frame = Frame {
            text: self.board.render(),
            snapshot: self.board.snapshot(),
            game_over: !running,
        };
        if !running {
            self.restart()?;
        }
        Ok(frame)
    }

    fn restart(&mut self) -> Result<()> {
        info!(
            game = self.games,
            score = self.board.get_score(),
            lines = self.board.lines(),
            pieces = self.board.pieces(),
            "game over, starting a new board"
        );
        let config = self.config.with_seed(self.config.seed.wrapping_add(self.games));
        self.board = Board::with_config(config)?;
        self.games += 1;
        Ok(())
    }
}
