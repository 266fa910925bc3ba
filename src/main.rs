mod config;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use run_and_gun::compute::{init_state, tick};
use run_and_gun::entities::{Controls, GameState, GameStatus};
use run_and_gun::highscore::HighScoreTable;
use run_and_gun::player::aim_at;
use run_and_gun::store::{continue_from_store, equip, listing, purchase, StoreItem};

use config::{Cli, Settings};
use display::Viewport;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Distance of the synthetic aim point used by the J/I/L aim keys.
const KEY_AIM_REACH: f32 = 100.0;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Letters are tracked lowercase so Shift doesn't split a held key in two.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn viewport() -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport { cols, rows })
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    scores: &HighScoreTable,
) -> Result<MenuResult> {
    display::render_menu(out, viewport()?, scores)?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        match ev {
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                let code = normalize(code);
                if is_quit(code, modifiers) {
                    return Ok(MenuResult::Quit);
                }
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return Ok(MenuResult::Start);
                }
            }
            Event::Resize(..) => display::render_menu(out, viewport()?, scores)?,
            _ => {}
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Digit keys 1-4 pick a store row: buy it, or equip it if already owned.
fn store_action(state: &GameState, slot: usize) -> Result<GameState, String> {
    let entries = listing(state);
    let Some(entry) = entries.get(slot) else {
        return Ok(state.clone());
    };
    let result = match entry.item {
        StoreItem::Gun(gun) if entry.owned => equip(state, gun),
        item => purchase(state, item),
    };
    result.map_err(|e| e.to_string())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Finished,
}

/// Runs one play-through until victory/defeat is acknowledged or the player
/// quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the fresh keys are folded
/// into a `Controls` snapshot, so movement, jumping and firing combine
/// freely. The mouse aims on every move and fires while the left button is
/// down.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    fps: u32,
) -> Result<LoopExit> {
    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let clock = Instant::now();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse_fire = false;
    let mut notice: Option<String> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed().as_secs_f64();
        frame += 1;
        let vp = viewport()?;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    let code = normalize(code);
                    match kind {
                        KeyEventKind::Press => {
                            key_frame.insert(code, frame);
                            if is_quit(code, modifiers) {
                                return Ok(LoopExit::Quit);
                            }
                            match state.status {
                                GameStatus::Playing => key_aim(state, code),
                                GameStatus::StoreOpen => match code {
                                    KeyCode::Char(c @ '1'..='4') => {
                                        let slot = c as usize - '1' as usize;
                                        match store_action(state, slot) {
                                            Ok(next) => {
                                                *state = next;
                                                notice = None;
                                            }
                                            Err(msg) => notice = Some(msg),
                                        }
                                    }
                                    KeyCode::Enter => {
                                        *state = continue_from_store(state, now, rng)
                                            .context("failed to leave the store")?;
                                        notice = None;
                                        key_frame.clear();
                                        mouse_fire = false;
                                    }
                                    _ => {}
                                },
                                GameStatus::Victory | GameStatus::Defeat => {
                                    if code == KeyCode::Enter {
                                        return Ok(LoopExit::Finished);
                                    }
                                }
                            }
                        }
                        KeyEventKind::Repeat => {
                            key_frame.insert(code, frame);
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&code);
                        }
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        if state.status == GameStatus::Playing {
                            let (wx, wy) = vp.screen_to_world(state.camera_x, column, row);
                            *state = aim_at(state, wx, wy);
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) => mouse_fire = true,
                    MouseEventKind::Up(MouseButton::Left) => mouse_fire = false,
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Fold held keys into this frame's controls ─────────────────────────
        let controls = Controls {
            left: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a')], frame),
            right: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d')], frame),
            jump: any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w')], frame),
            crouch: any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s')], frame),
            fire: mouse_fire
                || any_held(&key_frame, &[KeyCode::Char(' '), KeyCode::Char('z')], frame),
        };

        *state = tick(state, &controls, now, rng);

        display::render(out, vp, state, notice.as_deref())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// J / I / L aim left, up and right relative to the player.
fn key_aim(state: &mut GameState, code: KeyCode) {
    let cx = state.player.body.center_x();
    let cy = state.player.body.center_y();
    let target = match code {
        KeyCode::Char('j') => (cx - KEY_AIM_REACH, cy),
        KeyCode::Char('l') => (cx + KEY_AIM_REACH, cy),
        KeyCode::Char('i') => (cx, cy - KEY_AIM_REACH),
        _ => return,
    };
    *state = aim_at(state, target.0, target.1);
}

// ── High-score entry ──────────────────────────────────────────────────────────

/// Collect up to three initials. `None` means the player quit instead.
fn prompt_initials<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
) -> Result<Option<String>> {
    let mut typed = String::new();
    display::render_initials(out, viewport()?, score, &typed)?;
    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(None);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev {
            match code {
                KeyCode::Enter => return Ok(Some(typed)),
                KeyCode::Backspace => {
                    typed.pop();
                }
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                KeyCode::Char(c) if c.is_ascii_alphabetic() && typed.len() < 3 => {
                    typed.push(c.to_ascii_uppercase());
                }
                _ => {}
            }
            display::render_initials(out, viewport()?, score, &typed)?;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// The terminal is busy drawing the game, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::resolve(Cli::parse())?;
    init_logging(settings.log_file.as_deref())?;
    tracing::info!(?settings, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, settings: &Settings) -> Result<()> {
    let mut high_scores = HighScoreTable::load_or_default(&settings.high_score_path);
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match show_menu(out, rx, &high_scores)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state(settings.start_level, 0.0, &mut rng)
                    .context("failed to build the first level")?;
                let exit = game_loop(out, &mut state, rx, &mut rng, settings.fps)?;
                tracing::info!(score = state.score, level = state.level, status = ?state.status, "run over");

                let finished = matches!(state.status, GameStatus::Victory | GameStatus::Defeat);
                if finished && high_scores.qualifies(state.score) {
                    if let Some(initials) = prompt_initials(out, rx, state.score)? {
                        high_scores.insert(&initials, state.score);
                        if let Err(e) = high_scores.save(&settings.high_score_path) {
                            tracing::warn!(error = %e, "could not save high scores");
                        }
                    }
                }

                if let LoopExit::Quit = exit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
