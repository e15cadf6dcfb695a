//! Application shell
//!
//! Wires the host, settings, session and screens together and runs the
//! fixed-step loop: each frame drains the accumulator in whole steps, then
//! draws once with the leftover fraction for interpolation.

use std::time::Duration;

use log::info;

use crate::error::Result;
use crate::platform::{Batch, Host};
use crate::session::Session;
use crate::settings::Settings;
use crate::states::{
    Context, Frame, GAME, GAME_OVER, GameOverState, GameState, LOADING, LoadingState, MENU,
    MenuState, StateManager,
};
use crate::timestep::FixedStep;

pub struct App<H: Host> {
    host: H,
    settings: Settings,
    session: Session,
    states: StateManager,
    clock: FixedStep,
}

impl<H: Host> App<H> {
    pub fn new(host: H, settings: Settings, session: Session) -> Self {
        let clock = FixedStep::new(settings.step(), settings.max_substeps, settings.max_frame());
        Self {
            host,
            settings,
            session,
            states: StateManager::new(),
            clock,
        }
    }

    /// Register every screen and enter `settings.initial_state`
    pub fn create(&mut self) -> Result<()> {
        self.states.add(LOADING, LoadingState::new(MENU))?;
        self.states.add(MENU, MenuState::new())?;
        self.states.add(GAME, GameState::new())?;
        self.states.add(GAME_OVER, GameOverState::new())?;

        let initial = self.settings.initial_state.clone();
        let (states, mut ctx) = self.split();
        states.load_state(&initial, &mut ctx)
    }

    /// Run as many fixed steps as `elapsed` pays for, then draw. Returns
    /// the number of steps taken.
    pub fn frame(&mut self, elapsed: Duration, batch: &mut dyn Batch) -> Result<u32> {
        let steps = self.clock.advance(elapsed);
        let dt = self.clock.step_secs();
        for _ in 0..steps {
            self.act(dt)?;
        }
        self.draw(batch, self.clock.alpha());
        Ok(steps)
    }

    /// One simulation step of `dt` seconds
    pub fn act(&mut self, dt: f32) -> Result<()> {
        let (states, mut ctx) = self.split();
        states.act(dt, &mut ctx)
    }

    pub fn draw(&self, batch: &mut dyn Batch, interpolation: f32) {
        let frame = Frame {
            screen: self.host.screen_size(),
            interpolation,
            session: &self.session,
        };
        self.states.draw(batch, &frame);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.states.resize(width, height);
    }

    /// Tear down every screen and persist the session if configured
    pub fn dispose(&mut self) -> Result<()> {
        let (states, mut ctx) = self.split();
        states.dispose(&mut ctx);
        if let Some(path) = &self.settings.session_path {
            self.session.save(path)?;
        }
        info!("Disposed (highscore {})", self.session.highscore);
        Ok(())
    }

    pub fn active_state(&self) -> Option<&str> {
        self.states.active_name()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn split(&mut self) -> (&mut StateManager, Context<'_>) {
        let ctx = Context::new(&mut self.host, &mut self.session, &self.settings);
        (&mut self.states, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::platform::{HeadlessHost, Key, RecordingBatch};

    fn app() -> App<HeadlessHost> {
        let host = HeadlessHost::with_default_sprites(800.0, 600.0);
        App::new(host, Settings::default(), Session::new())
    }

    #[test]
    fn test_frame_runs_whole_steps_only() {
        let mut app = app();
        app.create().unwrap();
        let mut batch = RecordingBatch::new();

        assert_eq!(app.frame(Duration::from_millis(25), &mut batch).unwrap(), 2);
        assert_eq!(app.clock.lag(), Duration::from_millis(5));
        assert_eq!(app.frame(Duration::from_millis(5), &mut batch).unwrap(), 1);
    }

    #[test]
    fn test_boots_through_loading_into_menu() {
        let mut app = app();
        app.create().unwrap();
        assert_eq!(app.active_state(), Some(LOADING));

        for _ in 0..3 {
            app.act(0.01).unwrap();
        }
        assert_eq!(app.active_state(), Some(MENU));
    }

    #[test]
    fn test_menu_fire_starts_a_game() {
        let mut app = app();
        app.create().unwrap();
        for _ in 0..3 {
            app.act(0.01).unwrap();
        }

        app.host_mut().press(Key::Fire);
        for _ in 0..60 {
            app.act(0.01).unwrap();
        }
        assert_eq!(app.active_state(), Some(GAME));
        assert_eq!(app.session().runs, 1);
        assert_eq!(app.session().selected_character.as_deref(), Some("librarian"));
    }

    #[test]
    fn test_unknown_initial_state() {
        let settings = Settings {
            initial_state: "credits".to_string(),
            ..Settings::default()
        };
        let mut app = App::new(
            HeadlessHost::with_default_sprites(800.0, 600.0),
            settings,
            Session::new(),
        );
        assert!(matches!(app.create(), Err(Error::UnknownState(_))));
        assert_eq!(app.active_state(), None);
    }

    #[test]
    fn test_dispose_saves_session() {
        let path = std::env::temp_dir().join(format!("library-invaders-{}.json", std::process::id()));
        let settings = Settings {
            session_path: Some(path.display().to_string()),
            ..Settings::default()
        };
        let mut session = Session::new();
        session.highscore = 350;
        let mut app = App::new(
            HeadlessHost::with_default_sprites(800.0, 600.0).preloaded(),
            settings,
            session,
        );
        app.create().unwrap();
        app.dispose().unwrap();
        assert_eq!(app.active_state(), None);

        let saved = Session::load(&path).unwrap();
        assert_eq!(saved.highscore, 350);
        let _ = std::fs::remove_file(&path);
    }
}
