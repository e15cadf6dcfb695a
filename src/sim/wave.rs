//! Wave generation and the timers that drive it
//!
//! Layout runs top-down: the first row hangs `wave_top_margin` below the top
//! of the screen and every following row sits under the tallest enemy of the
//! row above it.

use glam::Vec2;
use log::{debug, info};

use super::entities::{Barricade, Enemy, Ufo};
use super::entity::Ctx;
use super::manager::EntityManager;
use crate::platform::{Category, Sound};

/// Spawn a full `wave_rows` x `wave_columns` wave moving right at the
/// speed for `multiplier`. Returns the number of enemies added.
pub fn spawn_wave(manager: &mut EntityManager, ctx: &mut Ctx<'_>, multiplier: u32) -> usize {
    let tuning = ctx.tuning;
    let speed = tuning.enemy_speed(multiplier as f32);
    let spacing = tuning.wave_spacing;

    let mut y = ctx.screen.y - tuning.wave_top_margin;
    let mut spawned = 0;
    for _ in 0..tuning.wave_rows {
        let mut x = 0.0;
        let mut row_height = 0.0_f32;
        for _ in 0..tuning.wave_columns {
            let region = ctx.sprites.random(Category::Enemies, &mut *ctx.rng);
            let size = region.size();
            let pos = Vec2::new(x, y - size.y);
            manager.add(Enemy::create(region, pos, speed, &mut *ctx.rng, tuning));
            x += size.x + spacing;
            row_height = row_height.max(size.y);
            spawned += 1;
        }
        y -= row_height + spacing;
    }

    info!("Wave x{} spawned: {} enemies at speed {:.0}", multiplier, spawned, speed);
    spawned
}

/// Lay out `barricade_count` random barricade images across the screen,
/// evenly spaced and centred, `barricade_gap` above the player's sprite,
/// and add their segments. Returns the number of segments added.
pub fn spawn_barricades(manager: &mut EntityManager, ctx: &mut Ctx<'_>, player_height: f32) -> usize {
    let tuning = ctx.tuning;
    let count = tuning.barricade_count as usize;
    if count == 0 {
        return 0;
    }

    let regions: Vec<_> = (0..count)
        .map(|_| ctx.sprites.random(Category::Barricades, &mut *ctx.rng))
        .collect();
    let total: f32 = regions.iter().map(|r| r.width as f32).sum();
    let gap = if count > 1 {
        (ctx.screen.x - total - tuning.barricade_margin) / (count - 1) as f32
    } else {
        0.0
    };
    let span = total + gap * (count - 1) as f32;
    let y = tuning.player_y + player_height + tuning.barricade_gap;

    let mut x = (ctx.screen.x - span) / 2.0;
    let mut added = 0;
    for region in &regions {
        let origin = Vec2::new(x, y);
        for segment in Barricade::segments(
            region,
            origin,
            tuning.barricade_rows,
            tuning.barricade_columns,
        ) {
            manager.add(segment);
            added += 1;
        }
        x += region.width as f32 + gap;
    }
    added
}

/// Respawn and UFO timers for one game
#[derive(Debug, Clone)]
pub struct Wave {
    multiplier: u32,
    /// Armed once the wave has been cleared
    respawn_timer: Option<f32>,
    ufo_timer: f32,
}

impl Wave {
    pub fn new(ufo_interval: f32) -> Self {
        Self {
            multiplier: 1,
            respawn_timer: None,
            ufo_timer: ufo_interval,
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn respawn_pending(&self) -> bool {
        self.respawn_timer.is_some()
    }

    /// Spawn the opening wave
    pub fn start(&mut self, manager: &mut EntityManager, ctx: &mut Ctx<'_>) {
        spawn_wave(manager, ctx, self.multiplier);
    }

    /// Run after the manager's step, when adding entities directly is safe
    pub fn act(&mut self, manager: &mut EntityManager, ctx: &mut Ctx<'_>) {
        match self.respawn_timer.as_mut() {
            Some(timer) => {
                *timer -= ctx.dt;
                if *timer <= 0.0 {
                    self.respawn_timer = None;
                    self.multiplier += 1;
                    spawn_wave(manager, ctx, self.multiplier);
                }
            }
            None => {
                if manager.enemies_remaining() == 0 {
                    self.respawn_timer = Some(ctx.tuning.respawn_delay);
                }
            }
        }

        self.ufo_timer -= ctx.dt;
        if self.ufo_timer <= 0.0 {
            self.ufo_timer = ctx.tuning.ufo_interval;
            let region = ctx.sprites.random(Category::Ufos, &mut *ctx.rng);
            let ufo = Ufo::create(region, ctx.screen, &mut *ctx.rng, ctx.tuning);
            let id = manager.add(ufo);
            ctx.host.play_sound(Sound::UfoBeep);
            debug!("UFO {} launched", id);
        }
    }
}
