//! Final score screen

use glam::Vec2;

use super::{Context, Frame, MENU, State, Transition};
use crate::error::Result;
use crate::platform::{Batch, Key};

#[derive(Default)]
pub struct GameOverState {
    new_highscore: bool,
}

impl GameOverState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for GameOverState {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.new_highscore = ctx.session.is_new_highscore();
        // Presses from the last moments of the run shouldn't skip this screen
        ctx.host.take_key_presses();
        Ok(())
    }

    fn act(&mut self, _dt: f32, ctx: &mut Context<'_>) -> Result<Transition> {
        if ctx.host.take_key_presses().contains(&Key::Fire) {
            return Ok(Transition::to(MENU));
        }
        Ok(Transition::None)
    }

    fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>) {
        let center = frame.screen / 2.0;
        batch.draw_text("GAME OVER", center + Vec2::new(0.0, 60.0));
        batch.draw_text(&format!("Score: {}", frame.session.score), center);
        batch.draw_text(
            &format!("High score: {}", frame.session.highscore),
            center - Vec2::new(0.0, 30.0),
        );
        if self.new_highscore {
            batch.draw_text("New high score!", center - Vec2::new(0.0, 60.0));
        }
    }
}
