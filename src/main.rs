//! Terminal rail puzzle runner (default binary).
//!
//! Fixed-timestep loop: render, poll input until the next tick, then advance
//! the session's timers. Keyboard moves a cursor; mouse clicks tap tiles
//! directly.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use rail_puzzle::config::PuzzleConfig;
use rail_puzzle::core::PuzzleSession;
use rail_puzzle::input::{handle_key_event, should_quit, GridCursor, InputCommand};
use rail_puzzle::term::{FrameBuffer, PuzzleView, TerminalRenderer, Viewport};
use rail_puzzle::types::{PuzzleAction, RoundPhase, TICK_MS};

fn main() -> Result<()> {
    let config = PuzzleConfig::from_env();
    config.init_logging()?;

    let mut session = config.build_session()?;
    tracing::info!(
        levels = session.level_count(),
        line = session.line().key,
        "session created"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, session: &mut PuzzleSession) -> Result<()> {
    session.start();

    let view = PuzzleView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = GridCursor::new(session.grid().rows(), session.grid().cols());

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = session.snapshot();
        cursor.resize(snap.rows, snap.cols);
        view.render_into(&snap, Some(cursor.position()), viewport, &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        apply_command(session, &mut cursor, command);
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        if let Some((row, col)) =
                            view.hit_test(&snap, viewport, mouse.column, mouse.row)
                        {
                            cursor.set(row, col);
                            session.apply_action(PuzzleAction::Tap { row, col });
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}

fn apply_command(session: &mut PuzzleSession, cursor: &mut GridCursor, command: InputCommand) {
    match command {
        InputCommand::MoveCursor(dir) => cursor.step(dir),
        InputCommand::Tap => {
            let (row, col) = cursor.position();
            session.apply_action(PuzzleAction::Tap { row, col });
        }
        InputCommand::Check => {
            session.apply_action(PuzzleAction::Check);
        }
        InputCommand::NextLevel => {
            // Skipping ahead is only offered once the round is cleared.
            if session.phase() == RoundPhase::Cleared {
                session.apply_action(PuzzleAction::NextLevel);
            }
        }
        InputCommand::Retry => {
            session.apply_action(PuzzleAction::Retry);
        }
    }
}
