//! Concrete entity kinds

pub mod barricade;
pub mod bullet;
pub mod effects;
pub mod enemy;
pub mod player;
pub mod ufo;

pub use barricade::Barricade;
pub use bullet::Bullet;
pub use effects::{GameOverTimer, WhiteFlash};
pub use enemy::Enemy;
pub use player::Player;
pub use ufo::Ufo;

use super::entity::{Body, Ctx, Entity, EntityId, Faction, Spawner};
use crate::platform::Category;

/// Fire a random laser from `shooter`'s centre. Shared by every kind that
/// shoots; the bullet is buffered until the pass ends.
pub(crate) fn fire_bullet(
    shooter: &Body,
    faction: Faction,
    speed: f32,
    degrees: f32,
    ctx: &mut Ctx<'_>,
    spawner: &mut Spawner,
) -> EntityId {
    let laser = ctx.sprites.random(Category::Lasers, &mut *ctx.rng);
    let mut body = Body::centered(laser).at(shooter.center()).colliding();
    body.set_motion(speed, degrees);
    spawner.spawn(Entity::new(body, Bullet::new(shooter.id(), faction)))
}

/// Fire timer shared by enemies and UFOs. Returns true when it fired and
/// re-armed with a fresh random delay in `[min, max]`.
pub(crate) fn tick_fire_timer(
    timer: &mut f32,
    window: crate::tuning::FireWindow,
    ctx: &mut Ctx<'_>,
) -> bool {
    use rand::Rng;

    *timer -= ctx.dt;
    if *timer < 0.0 {
        *timer = if window.max > window.min {
            ctx.rng.random_range(window.min..=window.max)
        } else {
            window.min
        };
        return true;
    }
    false
}

/// Downward, in degrees
pub(crate) const DOWN: f32 = 270.0;
/// Upward, in degrees
pub(crate) const UP: f32 = 90.0;
