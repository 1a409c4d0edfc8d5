//! Terminal runner (default binary).
//!
//! Reads the configuration from the environment, builds the board and drives
//! it from a fixed frame loop: poll keys, apply commands, advance the step
//! timer, and redraw whenever the board reports a change.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use cascade_tetris::core::{Board, BoardSnapshot, GameConfig, StateChanged};
use cascade_tetris::input::{handle_key_event, should_quit, InputHandler};
use cascade_tetris::term::{TerminalRenderer, Viewport};
use cascade_tetris::types::{Command, FRAME_MS};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let pile = match config.load_pile() {
        Ok(pile) => pile,
        Err(e) => {
            eprintln!("[Tetris] Ignoring pile layout: {}", e);
            None
        }
    };
    let seed = config.seed.unwrap_or_else(clock_seed);
    eprintln!(
        "[Tetris] Board {}x{}, step {}ms, seed {}",
        config.width, config.height, config.step_interval_ms, seed
    );

    let (tx, rx) = mpsc::channel();
    let mut board = Board::with_pile(&config, seed, pile).with_observer(tx);

    let mut term = TerminalRenderer::default();
    let result = term.enter().and_then(|()| run(&mut term, &mut board, &rx));

    // Always try to restore terminal state.
    let _ = term.exit();
    if result.is_ok() {
        eprintln!(
            "[Tetris] Bye ({} pieces on the board{})",
            board.piece_count(),
            if board.game_over() { ", game over" } else { "" }
        );
    }
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, board: &mut Board, changes: &Receiver<StateChanged>) -> Result<()> {
    let mut input_handler = InputHandler::new();
    let mut snap = BoardSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS as u64);

    let mut last_frame = Instant::now();
    let mut viewport = terminal_viewport();
    let mut dirty = true;

    loop {
        if dirty {
            board.snapshot_into(&mut snap);
            term.present(&snap, viewport)?;
            dirty = false;
        }

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        // Held-key slides go through the DAS/ARR handler.
                        if let Some(command) = input_handler.handle_key_press(key.code) {
                            board.apply(command);
                        } else if let Some(command) = handle_key_event(key) {
                            if !matches!(command, Command::Slide { .. }) {
                                let command = toggle_pause(board, command);
                                board.apply(command);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // DAS/ARR handles repeats.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;

            for command in input_handler.update(elapsed_ms) {
                board.apply(command);
            }
            board.advance(elapsed_ms);
        }

        // Coalesce every notification since the last frame into one redraw.
        if changes.try_iter().count() > 0 {
            dirty = true;
        }
    }
}

/// `p` pauses a running board and resumes a paused one.
fn toggle_pause(board: &Board, command: Command) -> Command {
    match command {
        Command::Pause if !board.is_running() => Command::Resume,
        other => other,
    }
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
