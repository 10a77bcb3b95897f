mod display;

use std::collections::{HashMap, HashSet};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::TerminalCanvas;
use galaxy_king::compute::GameState;
use galaxy_king::config::GameConfig;
use galaxy_king::host::{FrameContext, InputState};

#[derive(Parser, Debug)]
#[command(name = "galaxy_king", about = "Vertical arcade shooter in the terminal")]
struct Args {
    /// JSON file overriding any of the game tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs (entropy otherwise)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the target frame rate
    #[arg(long)]
    fps: Option<u32>,
}

// ── Held-key detection ────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn pressed_any(pressed: &HashSet<KeyCode>, keys: &[KeyCode]) -> bool {
    keys.iter().any(|k| pressed.contains(k))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// for every key, so directions stay live while held (works with and without
/// keyboard-enhancement release events).  Fire, flip and confirm only count
/// fresh `Press` events from this frame.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let screen = config.screen();
    let frame_duration = config.frame_duration();
    let mut state = GameState::new(config, rng);

    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(screen, cols, rows);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let mut pressed: HashSet<KeyCode> = HashSet::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    pressed.insert(code);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
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

        let input = InputState {
            left: is_held(&key_frame, KeyCode::Left, frame),
            right: is_held(&key_frame, KeyCode::Right, frame),
            up: is_held(&key_frame, KeyCode::Up, frame),
            down: is_held(&key_frame, KeyCode::Down, frame),
            fire: pressed_any(&pressed, &[KeyCode::Char('x'), KeyCode::Char('X')]),
            flip: pressed_any(&pressed, &[KeyCode::Char('z'), KeyCode::Char('Z')]),
            confirm: pressed.contains(&KeyCode::Enter),
        };

        let ctx = FrameContext::new(frame, screen);
        state.update(&ctx, &input, rng);

        let (cols, rows) = terminal::size()?;
        canvas.resize(cols, rows);
        canvas.clear();
        state.draw(&ctx, &mut canvas);
        display::present(out, &canvas)?;

        frame += 1;
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            thread::sleep(frame_duration - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    config.validate()?;

    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("Seeding RNG with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::warn!("Terminal host stopped: {err}");
    }
    result
}
