//! Board module - the falling-block engine
//!
//! A [`Board`] owns the grid of locked cells, the single active piece, the
//! upcoming-shape queue and the score. Callers drive it with discrete
//! commands ([`Board::move_shape`], [`Board::rotate`]) and discrete gravity
//! steps ([`Board::tick`]); it has no notion of time or input devices.
//!
//! Locking is one transition: write the piece into the grid, clear full rows,
//! score the clear, spawn the next piece (or enter Game Over). No command can
//! observe the board halfway through it.

use std::fmt;

use tracing::{debug, info, trace};

use crate::error::BoardError;
use crate::grid::Grid;
use crate::rng::{PieceQueue, Randomizer};
use crate::scoring::line_clear_points;
use crate::shapes::{self, Shape, KICK_OFFSETS};
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::{
    Command, Direction, ShapeKind, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, MAX_HEIGHT,
    MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH,
};

/// What `rotate` does when the next orientation collides in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Leave the piece in its current orientation.
    #[default]
    Reject,
    /// Try the anchor shifts in [`KICK_OFFSETS`] and take the first that fits.
    Kick,
}

/// Construction parameters for a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub randomizer: Randomizer,
    pub rotation: RotationPolicy,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Check the dimensions against the supported range.
    pub fn validate(&self) -> Result<(), BoardError> {
        let width_ok = (MIN_WIDTH as usize..=MAX_WIDTH as usize).contains(&self.width);
        let height_ok = (MIN_HEIGHT as usize..=MAX_HEIGHT as usize).contains(&self.height);
        if width_ok && height_ok {
            Ok(())
        } else {
            Err(BoardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH as usize,
            height: DEFAULT_HEIGHT as usize,
            seed: DEFAULT_SEED,
            randomizer: Randomizer::Bag,
            rotation: RotationPolicy::Reject,
        }
    }
}

/// A shape instance: kind, orientation index and anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub orientation: u8,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// A piece of `kind` in its spawn orientation at the spawn anchor.
    pub fn spawn(kind: ShapeKind, width: u8) -> Self {
        let (x, y) = shapes::spawn_anchor(kind, width);
        Self {
            kind,
            orientation: 0,
            x,
            y,
        }
    }

    /// Cell offsets for the current orientation
    pub fn shape(&self) -> Shape {
        shapes::shape(self.kind, self.orientation)
    }

    /// Absolute grid positions of the four cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// True when every cell is in bounds and unoccupied.
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.fits(&self.shape(), self.x, self.y)
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, next orientation.
    pub fn rotated(&self) -> Self {
        Self {
            orientation: shapes::next_orientation(self.kind, self.orientation),
            ..*self
        }
    }

    fn covers(&self, x: i8, y: i8) -> bool {
        self.cells().contains(&(x, y))
    }
}

/// Result of a single [`Board::move_shape`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// The anchor moved one cell.
    Moved,
    /// A sideways move collided; nothing changed.
    Blocked,
    /// A downward move collided, so the piece locked (see [`Board::take_last_event`]).
    Locked,
    /// The game is over; the command was ignored.
    Halted,
}

/// Record of the most recent lock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// The follow-up spawn collided.
    pub game_over: bool,
}

/// The falling-block engine.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    score: u32,
    lines: u32,
    /// Pieces successfully spawned, the first one included.
    pieces: u32,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl Board {
    /// Empty board of the given size with the default seed and policies.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_config(BoardConfig::new(width, height))
    }

    pub fn with_config(config: BoardConfig) -> Result<Self, BoardError> {
        if let Err(err) = config.validate() {
            debug!(width = config.width, height = config.height, "rejected board config");
            return Err(err);
        }
        let grid = Grid::new(config.width, config.height)?;
        Self::with_grid(grid, config)
    }

    /// Start from a pre-filled grid.
    ///
    /// The first piece spawns against `grid` as given, so a grid whose spawn
    /// area is occupied yields a board that is already over.
    pub fn with_grid(grid: Grid, config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        let actual = (grid.width() as usize, grid.height() as usize);
        if actual != (config.width, config.height) {
            return Err(BoardError::GridShapeMismatch {
                expected: (config.width, config.height),
                actual,
            });
        }

        let mut board = Self {
            config,
            grid,
            active: None,
            queue: PieceQueue::new(config.seed, config.randomizer),
            score: 0,
            lines: 0,
            pieces: 0,
            game_over: false,
            last_event: None,
        };
        board.spawn();
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn get_score(&self) -> u32 {
        self.score
    }

    /// Kind of the piece the next spawn will use. Does not advance the queue.
    pub fn get_next_shape_type(&self) -> ShapeKind {
        self.queue.peek()
    }

    /// Upcoming kinds in spawn order, without consuming them.
    pub fn preview(&self, count: usize) -> Vec<ShapeKind> {
        self.queue.preview(count)
    }

    /// Total rows cleared so far.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Collision test for an arbitrary placement against the locked grid.
    ///
    /// True when any cell would leave the grid or overlap a locked cell.
    pub fn collides(&self, kind: ShapeKind, orientation: u8, x: i8, y: i8) -> bool {
        !self.grid.fits(&shapes::shape(kind, orientation), x, y)
    }

    /// Draw the next kind and place it at the spawn anchor.
    ///
    /// Returns false and enters Game Over when the spawn position collides.
    fn spawn(&mut self) -> bool {
        let kind = self.queue.draw();
        let piece = Piece::spawn(kind, self.grid.width());

        if !piece.fits(&self.grid) {
            self.active = None;
            self.game_over = true;
            info!(
                kind = kind.as_str(),
                score = self.score,
                lines = self.lines,
                pieces = self.pieces,
                "spawn blocked, game over"
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces = self.pieces.wrapping_add(1);
        trace!(kind = kind.as_str(), x = piece.x, y = piece.y, "spawned piece");
        true
    }

    /// Lock the active piece, clear rows, score, and spawn the next piece.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        // The active piece always fits, so locking cannot fail.
        let locked = self.grid.lock(&piece.shape(), piece.x, piece.y, piece.kind);
        debug_assert!(locked, "active piece overlapped the grid");

        let cleared = self.grid.clear_full_rows();
        let points = line_clear_points(cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            cleared,
            points,
            score = self.score,
            "piece locked"
        );

        let spawned = self.spawn();
        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            points,
            game_over: !spawned,
        });
    }

    /// Shift the active piece one cell.
    ///
    /// A blocked `Left`/`Right` changes nothing. A blocked `Down` locks the
    /// piece and runs the full lock transition, which may end the game.
    pub fn move_shape(&mut self, direction: Direction) -> Motion {
        if self.game_over {
            return Motion::Halted;
        }
        let Some(active) = self.active else {
            return Motion::Halted;
        };

        let (dx, dy) = direction.delta();
        let candidate = active.moved(dx, dy);
        if candidate.fits(&self.grid) {
            self.active = Some(candidate);
            return Motion::Moved;
        }

        match direction {
            Direction::Down => {
                self.lock_active();
                Motion::Locked
            }
            Direction::Left | Direction::Right => Motion::Blocked,
        }
    }

    /// Advance the active piece to its next orientation.
    ///
    /// Under [`RotationPolicy::Reject`] the rotation happens in place or not
    /// at all. Returns whether the orientation changed; single-orientation
    /// kinds never rotate.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if shapes::orientation_count(active.kind) == 1 {
            return false;
        }

        let rotated = active.rotated();
        let kicks: &[(i8, i8)] = match self.config.rotation {
            RotationPolicy::Reject => &[(0, 0)],
            RotationPolicy::Kick => &KICK_OFFSETS,
        };

        for &(dx, dy) in kicks {
            let candidate = rotated.moved(dx, dy);
            if candidate.fits(&self.grid) {
                self.active = Some(candidate);
                return true;
            }
        }
        false
    }

    /// One gravity step: move down, locking if blocked.
    ///
    /// Returns true while the game continues and false once it is over.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.move_shape(Direction::Down);
        !self.game_over
    }

    /// Move down until the piece locks. Same return value as [`Board::tick`].
    pub fn hard_drop(&mut self) -> bool {
        // Each Moved step lowers the anchor, so this ends within `height` steps.
        while self.move_shape(Direction::Down) == Motion::Moved {}
        !self.game_over
    }

    /// Apply a driver command. Returns whether the board changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => matches!(
                self.move_shape(direction),
                Motion::Moved | Motion::Locked
            ),
            Command::Rotate => self.rotate(),
            Command::HardDrop => {
                if self.game_over {
                    return false;
                }
                self.hard_drop();
                true
            }
        }
    }

    /// Row the active piece's anchor would come to rest on.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut landing = active;
        loop {
            let below = landing.moved(0, 1);
            if !below.fits(&self.grid) {
                break;
            }
            landing = below;
        }
        Some(landing.y)
    }

    /// Text rendering of the grid with the active piece overlaid.
    ///
    /// Each cell is `| |` (empty), `|x|` (locked) or `|*|` (active); each row
    /// ends with a newline. Pure: the grid is not touched.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self
                .grid
                .rows()
                .map(|row| row.iter().map(|c| c.map_or(0, |k| k.code())).collect())
                .collect(),
            active: self.active.map(ActiveSnapshot::from),
            next: self.queue.peek(),
            score: self.score,
            lines: self.lines,
            game_over: self.game_over,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height() as i8 {
            for x in 0..self.grid.width() as i8 {
                let symbol = if self.active.is_some_and(|p| p.covers(x, y)) {
                    "|*|"
                } else if self.grid.is_occupied(x, y) {
                    "|x|"
                } else {
                    "| |"
                };
                f.write_str(symbol)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
