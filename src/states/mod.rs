//! Screen state machine
//!
//! Each screen (loading, menu, game, game over) is a [`State`] registered
//! once under a name. Exactly one is active at a time. A state asks for a
//! change by returning a [`Transition`] from `act`; the manager applies it
//! after `act` returns, so a state is never torn down while running.

pub mod game;
pub mod game_over;
pub mod loading;
pub mod menu;

pub use game::GameState;
pub use game_over::GameOverState;
pub use loading::LoadingState;
pub use menu::{MenuCommand, MenuState};

use std::collections::HashMap;

use glam::Vec2;
use log::info;

use crate::error::{Error, Result};
use crate::platform::{Batch, Host};
use crate::session::Session;
use crate::settings::Settings;

pub const LOADING: &str = "loading";
pub const MENU: &str = "menu";
pub const GAME: &str = "game";
pub const GAME_OVER: &str = "game-over";

/// Everything a state may touch while starting, acting or stopping
pub struct Context<'a> {
    pub host: &'a mut dyn Host,
    pub session: &'a mut Session,
    pub settings: &'a Settings,
}

impl<'a> Context<'a> {
    pub fn new(host: &'a mut dyn Host, session: &'a mut Session, settings: &'a Settings) -> Self {
        Self {
            host,
            session,
            settings,
        }
    }
}

/// Read-only view handed to `draw`
pub struct Frame<'a> {
    pub screen: Vec2,
    /// Fraction of a step elapsed since the last `act`
    pub interpolation: f32,
    pub session: &'a Session,
}

/// What the active state wants to happen after its `act`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    To(String),
}

impl Transition {
    pub fn to(name: &str) -> Self {
        Transition::To(name.to_string())
    }
}

pub trait State {
    /// Called each time the state becomes active
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()>;

    fn act(&mut self, dt: f32, ctx: &mut Context<'_>) -> Result<Transition>;

    fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>);

    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called when another state takes over. Drops per-visit data.
    fn stop(&mut self, _ctx: &mut Context<'_>) {}

    /// Process teardown only
    fn dispose(&mut self) {}
}

#[derive(Default)]
pub struct StateManager {
    states: HashMap<String, Box<dyn State>>,
    active: Option<String>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, state: impl State + 'static) -> Result<()> {
        if self.states.contains_key(name) {
            return Err(Error::DuplicateState(name.to_string()));
        }
        self.states.insert(name.to_string(), Box::new(state));
        Ok(())
    }

    /// Stop the active state and start `name`. Nothing changes if `name`
    /// isn't registered; if `start` fails, no state is left active.
    pub fn load_state(&mut self, name: &str, ctx: &mut Context<'_>) -> Result<()> {
        if !self.states.contains_key(name) {
            return Err(Error::UnknownState(name.to_string()));
        }

        let previous = self.active.take();
        if let Some(prev) = &previous {
            if let Some(state) = self.states.get_mut(prev) {
                state.stop(ctx);
            }
        }
        info!(
            "State {} -> {}",
            previous.as_deref().unwrap_or("(none)"),
            name
        );

        let state = self
            .states
            .get_mut(name)
            .ok_or_else(|| Error::UnknownState(name.to_string()))?;
        // A state that failed to start is never active
        state.start(ctx)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn act(&mut self, dt: f32, ctx: &mut Context<'_>) -> Result<()> {
        let Some(state) = self.active.as_ref().and_then(|n| self.states.get_mut(n)) else {
            return Ok(());
        };
        match state.act(dt, ctx)? {
            Transition::None => Ok(()),
            Transition::To(next) => self.load_state(&next, ctx),
        }
    }

    pub fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>) {
        if let Some(state) = self.active.as_ref().and_then(|n| self.states.get(n)) {
            state.draw(batch, frame);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(state) = self.active.as_ref().and_then(|n| self.states.get_mut(n)) {
            state.resize(width, height);
        }
    }

    /// Stop the active state, then dispose every registered state
    pub fn dispose(&mut self, ctx: &mut Context<'_>) {
        if let Some(name) = self.active.take() {
            if let Some(state) = self.states.get_mut(&name) {
                state.stop(ctx);
            }
        }
        for state in self.states.values_mut() {
            state.dispose();
        }
    }
}
