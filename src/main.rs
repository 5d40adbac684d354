//! Falling blocks runner (default binary).
//!
//! Interactive play uses crossterm for input and the framebuffer renderer.
//! `--replay` runs a command script headless and prints the final board.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::prelude::*;

use falling_blocks::core::{BoardConfig, BoardSnapshot, BoardState};
use falling_blocks::input::{handle_key_event, is_pause_key, should_quit};
use falling_blocks::term::{GameView, TerminalRenderer, Viewport};
use falling_blocks::types::PieceShape;
use falling_blocks::{GameSession, ScoreCard};

#[derive(Parser, Debug)]
#[command(name = "falling-blocks", version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    /// Board width in cells (default 10, or FALLING_BLOCKS_WIDTH)
    #[arg(long)]
    width: Option<usize>,

    /// Board height in cells (default 20, or FALLING_BLOCKS_HEIGHT)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for random piece draws (or FALLING_BLOCKS_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed repeating piece order, e.g. "IOTSZJL"
    #[arg(long)]
    sequence: Option<String>,

    /// Run a command script (L R D C W X N) headless instead of playing
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<String>,

    /// Print the replay result as JSON
    #[arg(long, requires = "replay")]
    json: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct ReplayReport {
    state: BoardState,
    score: ScoreCard,
    board: BoardSnapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = BoardConfig::from_env();
    config = config.with_size(
        cli.width.unwrap_or(config.width),
        cli.height.unwrap_or(config.height),
    );
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = GameSession::new(config)?;
    if let Some(text) = &cli.sequence {
        let pieces = PieceShape::parse_sequence(text)
            .with_context(|| format!("invalid piece sequence {text:?}"))?;
        session.set_piece_sequence(&pieces);
    }

    match &cli.replay {
        Some(script) => replay(&mut session, script, cli.json),
        None => play(&mut session),
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter)
            .init();
    } else if cli.replay.is_some() {
        // The terminal is free in headless mode.
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
    Ok(())
}

fn replay(session: &mut GameSession, script: &str, json: bool) -> Result<()> {
    session.start();
    session.run_script(script)?;

    if json {
        let report = ReplayReport {
            state: session.board().state(),
            score: session.score(),
            board: session.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let card = session.score();
        println!("{}", session.board());
        println!(
            "score {}  lines {}  level {}{}",
            card.score,
            card.lines,
            card.level,
            if card.finished { "  (game over)" } else { "" }
        );
    }
    Ok(())
}

fn play(session: &mut GameSession) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    session.start();
    let view = GameView::default();
    let mut last_step = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session.snapshot(), &session.side_panel(), Viewport::new(w, h));
        term.draw(&fb)?;

        let interval = session.step_interval();
        let timeout = interval.saturating_sub(last_step.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_pause_key(key) {
                        session.toggle_pause();
                    } else if let Some(command) = handle_key_event(key) {
                        session.apply(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_step.elapsed() >= interval {
            last_step = Instant::now();
            session.tick();
        }
    }
}
