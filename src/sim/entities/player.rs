//! The player's ship

use std::collections::HashSet;

use glam::Vec2;

use super::{GameOverTimer, UP, WhiteFlash, fire_bullet};
use crate::platform::{Key, Region, Sound};
use crate::sim::entity::{Behavior, Body, Ctx, Entity, EntityId, EntityKind, Faction, Spawner};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default)]
pub struct Player {
    /// Bullets fired and possibly still alive
    bullets: Vec<EntityId>,
}

impl Player {
    /// Player centred horizontally, `player_y` above the bottom
    pub fn create(region: Region, screen: Vec2, tuning: &Tuning) -> Entity {
        let x = screen.x / 2.0 - region.width as f32 / 2.0;
        let body = Body::with_region(region)
            .at(Vec2::new(x, tuning.player_y))
            .colliding();
        Entity::new(body, Player::default())
    }

    /// Bullets that were alive the last time the player fired
    pub fn bullets(&self) -> &[EntityId] {
        &self.bullets
    }

    /// Shoot if fewer than `player_max_bullets` of ours are still alive
    fn fire(
        &mut self,
        body: &Body,
        live: &HashSet<EntityId>,
        ctx: &mut Ctx<'_>,
        spawner: &mut Spawner,
    ) -> Option<EntityId> {
        self.bullets.retain(|id| live.contains(id));
        if self.bullets.len() >= ctx.tuning.player_max_bullets {
            return None;
        }

        let speed = ctx.tuning.player_bullet_speed;
        let id = fire_bullet(body, Faction::Player, speed, UP, ctx, spawner);
        ctx.host.play_sound(Sound::PlayerShot);
        self.bullets.push(id);
        Some(id)
    }
}

impl Behavior for Player {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {
        let max_x = (ctx.screen.x - body.size().x).max(0.0);
        body.pos.x = body.pos.x.clamp(0.0, max_x);

        let speed = ctx.tuning.player_speed;
        if ctx.host.is_key_down(Key::Left) {
            body.set_motion(speed, 180.0);
        } else if ctx.host.is_key_down(Key::Right) {
            body.set_motion(speed, 0.0);
        } else {
            body.vel = Vec2::ZERO;
        }
    }

    fn collision(&mut self, body: &mut Body, other: &mut Entity, _ctx: &mut Ctx<'_>) {
        let hit = match &other.kind {
            EntityKind::Bullet(bullet) => bullet.owner != body.id(),
            EntityKind::Enemy(_) => true,
            _ => false,
        };
        if hit {
            other.dispose();
            body.dispose();
        }
    }

    fn destroy(&mut self, body: &Body, ctx: &mut Ctx<'_>, spawner: &mut Spawner) {
        log::debug!("Player {} destroyed", body.id());
        ctx.host.play_sound(Sound::PlayerHit);
        spawner.spawn(WhiteFlash::create(ctx.tuning.flash_duration));
        spawner.spawn(GameOverTimer::create(ctx.tuning.game_over_delay));
    }

    fn key_pressed(
        &mut self,
        body: &Body,
        key: Key,
        live: &HashSet<EntityId>,
        ctx: &mut Ctx<'_>,
        spawner: &mut Spawner,
    ) {
        if key == Key::Fire && !body.is_destroyed() {
            self.fire(body, live, ctx, spawner);
        }
    }
}
