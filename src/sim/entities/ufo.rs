//! Bonus UFO crossing the top of the screen

use glam::Vec2;
use rand::Rng;

use super::{DOWN, fire_bullet, tick_fire_timer};
use crate::platform::{Region, Sound};
use crate::sim::entity::{Behavior, Body, Ctx, Entity, EntityKind, Faction, GameEvent, Spawner};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Ufo {
    fire_timer: f32,
}

impl Ufo {
    /// UFO just past the right edge, heading left
    pub fn create(region: Region, screen: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Entity {
        let pos = Vec2::new(
            screen.x,
            screen.y - region.height as f32 - tuning.ufo_top_margin,
        );
        let mut body = Body::with_region(region).at(pos).colliding();
        body.set_motion(tuning.ufo_speed, 180.0);
        let fire_timer = rng.random_range(0.0..=tuning.ufo_fire.max.max(0.0));
        Entity::new(body, Ufo { fire_timer })
    }
}

impl Behavior for Ufo {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, spawner: &mut Spawner) {
        if body.world_box().right() < 0.0 {
            body.dispose();
            return;
        }

        if tick_fire_timer(&mut self.fire_timer, ctx.tuning.ufo_fire, ctx) {
            ctx.host.play_sound(Sound::EnemyShot);
            let speed = ctx.tuning.enemy_bullet_speed;
            fire_bullet(body, Faction::Invader, speed, DOWN, ctx, spawner);
        }
    }

    fn collision(&mut self, body: &mut Body, other: &mut Entity, ctx: &mut Ctx<'_>) {
        let from_player = matches!(&other.kind, EntityKind::Bullet(b) if b.from_player());
        if from_player {
            other.dispose();
            if body.dispose() {
                ctx.host.play_sound(Sound::UfoHit);
                ctx.emit(GameEvent::Score(ctx.tuning.ufo_points));
            }
        }
    }
}
