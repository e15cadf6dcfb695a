//! Character select menu
//!
//! Left/Right cycle through the character images, Fire picks one. After a
//! short pause (so the menu sound can play) the game starts.

use glam::Vec2;
use log::info;

use super::{Context, Frame, GAME, State, Transition};
use crate::error::{Error, Result};
use crate::platform::{Batch, Category, Key, Region, Sound};

/// Menu input, decoupled from the physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Previous,
    Next,
    Choose,
}

impl MenuCommand {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Left => Some(MenuCommand::Previous),
            Key::Right => Some(MenuCommand::Next),
            Key::Fire => Some(MenuCommand::Choose),
        }
    }
}

#[derive(Default)]
pub struct MenuState {
    characters: Vec<Region>,
    selected: usize,
    /// Counts down once a character has been chosen
    launch_timer: Option<f32>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Region> {
        self.characters.get(self.selected)
    }

    pub fn apply(&mut self, command: MenuCommand, ctx: &mut Context<'_>) {
        if self.launch_timer.is_some() || self.characters.is_empty() {
            return;
        }
        let count = self.characters.len();
        match command {
            MenuCommand::Previous => self.selected = (self.selected + count - 1) % count,
            MenuCommand::Next => self.selected = (self.selected + 1) % count,
            MenuCommand::Choose => {
                let name = self.characters[self.selected].name.clone();
                info!("Character selected: {}", name);
                ctx.host.play_sound(Sound::Menu);
                ctx.session.selected_character = Some(name);
                self.launch_timer = Some(ctx.settings.tuning.menu_delay);
            }
        }
    }
}

impl State for MenuState {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let host = &*ctx.host;
        self.characters = host
            .region_names(Category::Characters)
            .iter()
            .filter_map(|name| host.find_region(Category::Characters, name))
            .collect();
        if self.characters.is_empty() {
            return Err(Error::MissingAssets(Category::Characters));
        }

        // Keep the previous pick highlighted
        self.selected = ctx
            .session
            .selected_character
            .as_deref()
            .and_then(|name| self.characters.iter().position(|r| r.name == name))
            .unwrap_or(0);
        self.launch_timer = None;
        Ok(())
    }

    fn act(&mut self, dt: f32, ctx: &mut Context<'_>) -> Result<Transition> {
        for key in ctx.host.take_key_presses() {
            if let Some(command) = MenuCommand::from_key(key) {
                self.apply(command, ctx);
            }
        }

        if let Some(timer) = self.launch_timer.as_mut() {
            *timer -= dt;
            if *timer <= 0.0 {
                return Ok(Transition::to(GAME));
            }
        }
        Ok(Transition::None)
    }

    fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>) {
        let center = frame.screen / 2.0;
        batch.draw_text("LIBRARY INVADERS", Vec2::new(center.x, frame.screen.y - 80.0));
        if let Some(region) = self.selected() {
            batch.draw_region(region, center - region.size() / 2.0);
            batch.draw_text(&format!("< {} >", region.name), center - Vec2::new(0.0, 60.0));
        }
    }

    fn stop(&mut self, _ctx: &mut Context<'_>) {
        self.launch_timer = None;
    }
}
