//! Board runner (default binary).
//!
//! Terminal mode draws the board with the framebuffer renderer and reads the
//! keyboard through crossterm. Headless mode prints one frame per tick to
//! stdout, either as the text rendering or as JSON snapshot lines.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris_board::config::{Args, Mode, RunConfig};
use tetris_board::driver::Driver;
use tetris_board::input::{handle_key_event, should_quit};
use tetris_board::term::{BoardView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = RunConfig::from_args(Args::parse())?;
    init_tracing(&config)?;

    info!(
        width = config.board.width,
        height = config.board.height,
        seed = config.board.seed,
        tick_ms = config.tick.as_millis() as u64,
        autoplay = config.autoplay,
        "starting"
    );

    match config.mode {
        Mode::Headless { frames, json } => run_headless(&config, frames, json),
        Mode::Terminal => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run_terminal(&mut term, &config);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

/// Logs go to the log file when one is given, to stderr in headless mode,
/// and nowhere otherwise so they cannot corrupt the terminal frame.
fn init_tracing(config: &RunConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if matches!(config.mode, Mode::Headless { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_headless(config: &RunConfig, frames: u64, json: bool) -> Result<()> {
    let mut driver = Driver::new(config.board, config.autoplay)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for _ in 0..frames {
        let frame = driver.frame()?;
        if json {
            serde_json::to_writer(&mut out, &frame.snapshot)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", frame.text)?;
        }
    }
    out.flush()?;

    info!(
        frames = driver.frames(),
        games = driver.games(),
        "headless run finished"
    );
    Ok(())
}

fn run_terminal(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut driver = Driver::new(config.board, config.autoplay)?;
    let view = BoardView::default();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&driver.board().snapshot(), Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = config.tick.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        driver.command(command)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= config.tick {
            last_tick = Instant::now();
            driver.frame()?;
        }
    }
}
