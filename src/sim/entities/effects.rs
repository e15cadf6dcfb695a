//! Short-lived helper entities spawned when the player dies

use glam::Vec2;

use crate::platform::Batch;
use crate::sim::entity::{Behavior, Body, Ctx, Entity, GameEvent, Spawner};

/// Full-screen white overlay fading out over `duration` seconds
#[derive(Debug, Clone)]
pub struct WhiteFlash {
    elapsed: f32,
    duration: f32,
}

impl WhiteFlash {
    pub fn create(duration: f32) -> Entity {
        Entity::new(
            Body::new(),
            WhiteFlash {
                elapsed: 0.0,
                duration: duration.max(f32::EPSILON),
            },
        )
    }

    /// Current overlay alpha, 1 at spawn down to 0
    pub fn alpha(&self) -> f32 {
        (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

impl Behavior for WhiteFlash {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {
        self.elapsed += ctx.dt;
        if self.elapsed >= self.duration {
            body.dispose();
        }
    }

    fn draw(&self, _body: &Body, batch: &mut dyn Batch, _pos: Vec2) {
        batch.draw_overlay([1.0, 1.0, 1.0, self.alpha()]);
    }
}

/// Emits [`GameEvent::GameOver`] once `remaining` seconds have passed
#[derive(Debug, Clone)]
pub struct GameOverTimer {
    remaining: f32,
}

impl GameOverTimer {
    pub fn create(delay: f32) -> Entity {
        Entity::new(Body::new(), GameOverTimer { remaining: delay })
    }
}

impl Behavior for GameOverTimer {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {
        self.remaining -= ctx.dt;
        if self.remaining <= 0.0 && body.dispose() {
            ctx.emit(GameEvent::GameOver);
        }
    }
}
