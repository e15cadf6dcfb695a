//! Headless demo driver
//!
//! Runs the full app against the headless host with an autopilot at the
//! controls, then prints how the session went.
//!
//! Usage: `library-invaders [SETTINGS_JSON] [SECONDS]`

use std::time::Duration;

use library_invaders::platform::{HeadlessHost, Key, RecordingBatch};
use library_invaders::states::{GAME, GAME_OVER, MENU};
use library_invaders::{App, Result, Session, Settings};

/// Simulated frame length (~60 fps)
const FRAME: Duration = Duration::from_millis(16);
/// Frames between autopilot shots
const FIRE_EVERY: u64 = 12;
/// Frames spent sweeping in one direction
const SWEEP_FRAMES: u64 = 90;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Library Invaders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path)?,
        None => Settings::default(),
    };
    let seconds: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad duration argument ({}), running for 30 s", e);
            30
        }
        None => 30,
    };

    let session = match &settings.session_path {
        Some(path) => Session::load(path)?,
        None => Session::new(),
    };
    let host = HeadlessHost::with_default_sprites(
        settings.window_width as f32,
        settings.window_height as f32,
    );

    let mut app = App::new(host, settings, session);
    app.create()?;

    let frames = seconds * 1000 / FRAME.as_millis() as u64;
    let mut batch = RecordingBatch::new();
    let mut games = 0;
    let mut last_state = app.active_state().map(str::to_string);
    for frame in 0..frames {
        autopilot(&mut app, frame);
        batch.clear();
        app.frame(FRAME, &mut batch)?;

        let state = app.active_state().map(str::to_string);
        if state != last_state {
            if state.as_deref() == Some(GAME) {
                games += 1;
            }
            last_state = state;
        }
    }

    let session = app.session().clone();
    app.dispose()?;
    println!(
        "Played {} game(s) in {} s: last score {}, high score {}",
        games, seconds, session.score, session.highscore
    );
    Ok(())
}

/// Idle mode: pick the default character, sweep back and forth while
/// firing, and go round again after a game over.
fn autopilot(app: &mut App<HeadlessHost>, frame: u64) {
    let state = app.active_state().map(str::to_string);
    let host = app.host_mut();
    match state.as_deref() {
        Some(MENU) | Some(GAME_OVER) => {
            host.release_all();
            if frame % 30 == 0 {
                host.press(Key::Fire);
            }
        }
        Some(GAME) => {
            let (hold, other) = if (frame / SWEEP_FRAMES) % 2 == 0 {
                (Key::Left, Key::Right)
            } else {
                (Key::Right, Key::Left)
            };
            host.release(other);
            host.hold(hold);
            if frame % FIRE_EVERY == 0 {
                host.press(Key::Fire);
            }
        }
        _ => {}
    }
}
