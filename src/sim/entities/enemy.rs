//! Wave enemies
//!
//! The wave moves as one block: whichever enemy reaches an edge asks for a
//! bounce, and every enemy turns around in `act_end`, after the whole wave
//! has been checked against the old direction.

use glam::Vec2;
use rand::Rng;

use super::{DOWN, fire_bullet, tick_fire_timer};
use crate::platform::{Region, Sound};
use crate::sim::entity::{Behavior, Body, Ctx, Entity, EntityKind, Faction, Spawner};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Enemy {
    fire_timer: f32,
    queue_bounce: bool,
}

impl Enemy {
    /// Enemy at `pos` moving right at `speed`. The first shot comes after a
    /// random delay in `[0, enemy_fire.max]`.
    pub fn create(
        region: Region,
        pos: Vec2,
        speed: f32,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Entity {
        let mut body = Body::with_region(region).at(pos).colliding();
        body.set_motion(speed, 0.0);
        let fire_timer = rng.random_range(0.0..=tuning.enemy_fire.max.max(0.0));
        Entity::new(
            body,
            Enemy {
                fire_timer,
                queue_bounce: false,
            },
        )
    }

    pub fn queue_bounce(&mut self) {
        self.queue_bounce = true;
    }
}

impl Behavior for Enemy {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, spawner: &mut Spawner) {
        let bounds = body.world_box();
        let at_right = body.vel.x > 0.0 && bounds.right() >= ctx.screen.x;
        let at_left = body.vel.x < 0.0 && bounds.left() <= 0.0;
        if at_right || at_left {
            ctx.request_wave_bounce();
        }

        if tick_fire_timer(&mut self.fire_timer, ctx.tuning.enemy_fire, ctx) {
            ctx.host.play_sound(Sound::EnemyShot);
            let speed = ctx.tuning.enemy_bullet_speed;
            fire_bullet(body, Faction::Invader, speed, DOWN, ctx, spawner);
        }

        if body.pos.y > ctx.screen.y {
            body.dispose();
        }
    }

    fn act_end(&mut self, body: &mut Body, ctx: &mut Ctx<'_>) {
        if self.queue_bounce {
            self.queue_bounce = false;
            body.vel.x = -body.vel.x;
            body.pos.y -= ctx.tuning.creep;
        }
    }

    fn collision(&mut self, body: &mut Body, other: &mut Entity, ctx: &mut Ctx<'_>) {
        match &other.kind {
            // Enemies plough through cover
            EntityKind::Barricade(_) => {
                other.dispose();
            }
            EntityKind::Bullet(bullet) if bullet.from_player() => {
                other.dispose();
                if body.dispose() {
                    ctx.host.play_sound(Sound::EnemyHit);
                }
            }
            _ => {}
        }
    }
}
