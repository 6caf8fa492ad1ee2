//! Terminal runner (default binary).
//!
//! Samples held keys once per tick, steps the game, persists a beaten record
//! and redraws. Configuration comes from `BLOCKFALL_*` environment variables.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::{Game, GameSnapshot};
use blockfall::input::InputTracker;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;
use blockfall::{record, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;
    log::info!("starting with seed {}", config.seed);

    if let Err(e) = record::ensure_exists(&config.record_path) {
        log::warn!("{e:#}");
    }
    let best = record::load(&config.record_path);
    log::info!("record: {} ({})", best.score, best.player);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, Game::new(config.seed, best, config.player.as_str()));

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        log::error!("restoring terminal: {e:#}");
    }
    result
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, mut game: Game) -> Result<()> {
    let view = GameView::default();
    let mut tracker = InputTracker::new();
    let mut snap = GameSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let mut next_tick = Instant::now();

    loop {
        let now = Instant::now();
        if now < next_tick {
            if event::poll(next_tick - now)? {
                match event::read()? {
                    Event::Key(key) => {
                        tracker.handle_key_event(key);
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }
            continue;
        }
        next_tick += tick;
        if next_tick < now {
            // Fell behind (suspended terminal); don't replay missed ticks.
            next_tick = now + tick;
        }

        let input = tracker.snapshot();
        if input.quit {
            log::info!("quit after {} game(s)", game.games_played());
            return Ok(());
        }

        let outcome = game.tick(input);
        if let Some(best) = &outcome.new_record {
            if let Err(e) = record::save(&config.record_path, best) {
                log::error!("{e:#}");
            }
        }

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;
    }
}
