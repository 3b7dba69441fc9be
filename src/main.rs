//! Terminal runner (default binary).
//!
//! It uses crossterm for input and the framebuffer-based renderer from
//! `grid_tetris::term`. Keys are queued into the game and applied on the next
//! frame tick; the game clock advances by the real elapsed time per frame.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, LevelFilter};

use grid_tetris::config::load_config;
use grid_tetris::core::{GameSnapshot, GameState};
use grid_tetris::input::{handle_key_event, should_quit};
use grid_tetris::logging::init_file_logging;
use grid_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use grid_tetris::types::{GameEvent, FRAME_MS};

#[derive(Parser)]
#[command(name = "grid-tetris")]
#[command(version, about = "Falling-block puzzle on a 10x30 grid", long_about = None)]
struct Cli {
    /// Seed for piece and color draws (defaults to the current time)
    #[arg(long)]
    seed: Option<u32>,

    /// JSON file with game parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Fade cleared rows out instead of removing them at once
    #[arg(long)]
    animated_clears: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_handle = match &cli.log_file {
        Some(path) => Some(init_file_logging(path, cli.log_level)?),
        None => None,
    };

    let config = load_config(cli.config.as_deref(), cli.animated_clears)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!("starting with seed {} and {:?}", seed, config);

    let game = GameState::with_config(config, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = frame
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit, final score {}", game.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.submit(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms);

            for ev in game.drain_events() {
                match ev {
                    GameEvent::LineCleared => term.bell(),
                    GameEvent::GameOver => info!("game over, press Backspace to restart"),
                }
            }
        }
    }
}
