//! Terminal candy runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no widget/layout library).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_candy::app::App;
use tui_candy::cli::Cli;
use tui_candy::input::{handle_key_event, should_quit};
use tui_candy::logging::init_file_logging;
use tui_candy::term::{FrameBuffer, TerminalRenderer, Viewport};
use tui_candy::types::TICK_MS;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("invalid configuration")?;
    if let Some(path) = &config.log_file {
        init_file_logging(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
    }
    info!(game = ?cli.game, seed = config.session.seed, "starting");

    let mut app = App::new(cli.game, &config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    let stats = app.stats();
    println!(
        "games {}  points {}  best match-3 {}  best ordering {}  accuracy {}%",
        stats.games_played,
        stats.total_points,
        stats.best_match3,
        stats.best_ordering,
        stats.accuracy_percent()
    );
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
