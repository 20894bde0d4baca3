//! RNG module - deterministic shape generation
//!
//! A small LCG drives two generation policies:
//!
//! - **Bag**: each batch holds one of every kind, shuffled (the default)
//! - **Uniform**: each kind is drawn independently with equal probability
//!
//! The queue always holds at least one undrawn kind, so peeking never fails
//! and never advances the sequence.

use arrayvec::ArrayVec;

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would still cycle, but keep seed 0 equivalent to 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the high bits, which are the well-mixed ones in an LCG.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How the queue generates upcoming kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// One of each kind per batch of seven.
    #[default]
    Bag,
    /// Independent uniform draws.
    Uniform,
}

/// Sequence of upcoming shape kinds.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current batch; `batch[index]` is always the next kind.
    batch: ArrayVec<ShapeKind, 7>,
    index: usize,
    rng: SimpleRng,
    randomizer: Randomizer,
}

impl PieceQueue {
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        let mut queue = Self {
            batch: ArrayVec::new(),
            index: 0,
            rng: SimpleRng::new(seed),
            randomizer,
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        self.batch.clear();
        match self.randomizer {
            Randomizer::Bag => {
                self.batch.extend(ShapeKind::ALL);
                self.rng.shuffle(&mut self.batch);
            }
            Randomizer::Uniform => {
                let i = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
                self.batch.push(ShapeKind::ALL[i]);
            }
        }
        self.index = 0;
    }

    /// The kind the next `draw` will return. Does not advance the sequence.
    pub fn peek(&self) -> ShapeKind {
        self.batch[self.index]
    }

    /// The next `count` kinds in draw order, without consuming them.
    pub fn preview(&self, count: usize) -> Vec<ShapeKind> {
        let mut ahead = self.clone();
        (0..count).map(|_| ahead.draw()).collect()
    }

    /// Take the next kind and advance, regenerating the batch when exhausted.
    pub fn draw(&mut self) -> ShapeKind {
        let kind = self.batch[self.index];
        self.index += 1;
        if self.index >= self.batch.len() {
            self.refill();
        }
        kind
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Current RNG state (enough to reproduce the remaining sequence's batches).
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    #[cfg(test)]
    pub(crate) fn current_batch(&self) -> &[ShapeKind] {
        &self.batch[self.index..]
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, Randomizer::Bag)
    }
}
