//! Run configuration: command-line arguments resolved into engine and loop
//! settings.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use crate::core::{BoardConfig, Randomizer, RotationPolicy};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_TICK_MS, DEFAULT_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RandomizerArg {
    Bag,
    Uniform,
}

impl From<RandomizerArg> for Randomizer {
    fn from(value: RandomizerArg) -> Self {
        match value {
            RandomizerArg::Bag => Randomizer::Bag,
            RandomizerArg::Uniform => Randomizer::Uniform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RotationArg {
    Reject,
    Kick,
}

impl From<RotationArg> for RotationPolicy {
    fn from(value: RotationArg) -> Self {
        match value {
            RotationArg::Reject => RotationPolicy::Reject,
            RotationArg::Kick => RotationPolicy::Kick,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tetris-board")]
#[command(about = "Falling-block board engine driven from the terminal")]
pub struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH as usize)]
    pub width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT as usize)]
    pub height: usize,

    /// Shape sequence seed (defaults to one derived from the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Milliseconds between gravity ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u32,

    #[arg(long, value_enum, default_value_t = RandomizerArg::Bag)]
    pub randomizer: RandomizerArg,

    #[arg(long, value_enum, default_value_t = RotationArg::Reject)]
    pub rotation: RotationArg,

    /// Issue a random move every frame instead of reading the keyboard
    #[arg(long)]
    pub autoplay: bool,

    /// Print frames to stdout instead of drawing in the terminal
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value_t = 200)]
    pub frames: u64,

    /// Headless frames as JSON snapshot lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Write logs here (terminal mode discards logs otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Terminal,
    Headless { frames: u64, json: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub board: BoardConfig,
    pub tick: Duration,
    pub autoplay: bool,
    pub mode: Mode,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let board = BoardConfig::new(args.width, args.height)
            .with_seed(args.seed.unwrap_or_else(clock_seed))
            .with_randomizer(args.randomizer.into())
            .with_rotation(args.rotation.into());
        board.validate()?;

        if args.tick_ms == 0 {
            bail!("--tick-ms must be positive");
        }

        let mode = if args.headless {
            Mode::Headless {
                frames: args.frames,
                json: args.json,
            }
        } else {
            Mode::Terminal
        };

        Ok(Self {
            board,
            tick: Duration::from_millis(args.tick_ms as u64),
            autoplay: args.autoplay,
            mode,
            log_file: args.log_file,
        })
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(DEFAULT_SEED)
}
