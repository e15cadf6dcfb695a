//! Asset loading screen

use log::info;

use super::{Context, Frame, State, Transition};
use crate::error::Result;
use crate::platform::Batch;
use crate::sim::SpriteSheet;

/// Polls the host until every asset is in, then moves on to `next`
pub struct LoadingState {
    next: String,
    progress: f32,
}

impl LoadingState {
    pub fn new(next: &str) -> Self {
        Self {
            next: next.to_string(),
            progress: 0.0,
        }
    }
}

impl State for LoadingState {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.progress = 0.0;
        ctx.host.begin_loading();
        Ok(())
    }

    fn act(&mut self, _dt: f32, ctx: &mut Context<'_>) -> Result<Transition> {
        self.progress = ctx.host.loading_progress().clamp(0.0, 1.0);
        if self.progress < 1.0 {
            return Ok(Transition::None);
        }

        // Every category must have at least one image before anything spawns
        SpriteSheet::from_host(&*ctx.host)?;
        info!("Assets loaded");
        Ok(Transition::To(self.next.clone()))
    }

    fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>) {
        let text = format!("Loading {:.0}%", self.progress * 100.0);
        batch.draw_text(&text, frame.screen / 2.0);
    }
}
