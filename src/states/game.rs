//! The game screen
//!
//! Owns everything a run needs: the entity manager, the resolved sprites,
//! the run's RNG and the wave timers. All of it is built in `start` and
//! dropped in `stop`, so each visit is a fresh run.

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{Context, Frame, GAME_OVER, State, Transition};
use crate::error::Result;
use crate::platform::Batch;
use crate::sim::entities::Player;
use crate::sim::{Ctx, EntityManager, GameEvent, SpriteSheet, Wave, spawn_barricades};

/// Score text distance from the top of the screen
const HUD_TOP_MARGIN: f32 = 25.0;

struct World {
    manager: EntityManager,
    sprites: SpriteSheet,
    rng: Pcg32,
    wave: Wave,
}

#[derive(Default)]
pub struct GameState {
    world: Option<World>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&self) -> Option<&EntityManager> {
        self.world.as_ref().map(|w| &w.manager)
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.world.as_ref().map(|w| &w.wave)
    }
}

impl State for GameState {
    fn start(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let sprites = SpriteSheet::from_host(&*ctx.host)?;
        let character = sprites.character(ctx.session.selected_character.as_deref())?;
        let tuning = &ctx.settings.tuning;

        ctx.session.reset_run();
        let seed = ctx.settings.seed.wrapping_add(ctx.session.runs as u64);
        let mut world = World {
            manager: EntityManager::new(),
            sprites,
            rng: Pcg32::seed_from_u64(seed),
            wave: Wave::new(tuning.ufo_interval),
        };

        let World {
            manager,
            sprites,
            rng,
            wave,
        } = &mut world;
        let mut sim = Ctx::new(0.0, &mut *ctx.host, sprites, tuning, rng);
        let player_height = character.height as f32;
        manager.add(Player::create(character, sim.screen, tuning));
        wave.start(manager, &mut sim);
        spawn_barricades(manager, &mut sim, player_height);

        info!(
            "Run {} started with seed {:#x}: {} entities",
            ctx.session.runs,
            seed,
            manager.len()
        );
        self.world = Some(world);
        Ok(())
    }

    fn act(&mut self, dt: f32, ctx: &mut Context<'_>) -> Result<Transition> {
        let Some(world) = self.world.as_mut() else {
            return Ok(Transition::None);
        };
        let World {
            manager,
            sprites,
            rng,
            wave,
        } = world;

        let mut sim = Ctx::new(dt, &mut *ctx.host, sprites, &ctx.settings.tuning, rng);
        for key in sim.host.take_key_presses() {
            manager.key_pressed(key, &mut sim);
        }
        manager.act(&mut sim);
        wave.act(manager, &mut sim);
        let events = std::mem::take(&mut sim.events);

        let mut transition = Transition::None;
        for event in events {
            match event {
                GameEvent::Score(points) => {
                    if ctx.session.add_score(points) {
                        debug!("New high score: {}", ctx.session.highscore);
                    }
                }
                GameEvent::GameOver => {
                    info!("Game over with score {}", ctx.session.score);
                    transition = Transition::to(GAME_OVER);
                }
            }
        }
        Ok(transition)
    }

    fn draw(&self, batch: &mut dyn Batch, frame: &Frame<'_>) {
        if let Some(world) = &self.world {
            world.manager.draw(batch, frame.interpolation);
        }
        let pos = Vec2::new(frame.screen.x / 2.0, frame.screen.y - HUD_TOP_MARGIN);
        batch.draw_text(&frame.session.score.to_string(), pos);
    }

    fn stop(&mut self, _ctx: &mut Context<'_>) {
        if let Some(world) = self.world.take() {
            debug!("Dropping {} entities", world.manager.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Category, HeadlessHost, RecordingBatch, Sound};
    use crate::session::Session;
    use crate::settings::Settings;
    use crate::sim::entities::{Bullet, Ufo};
    use crate::sim::{Body, Entity, EntityId, EntityKind, Faction};

    struct Harness {
        host: HeadlessHost,
        session: Session,
        settings: Settings,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                host: HeadlessHost::with_default_sprites(800.0, 600.0).preloaded(),
                session: Session::new(),
                settings: Settings::default(),
            }
        }

        fn ctx(&mut self) -> Context<'_> {
            Context::new(&mut self.host, &mut self.session, &self.settings)
        }
    }

    fn ids_of(game: &GameState, pred: impl Fn(&EntityKind) -> bool) -> Vec<EntityId> {
        game.manager()
            .unwrap()
            .iter()
            .filter(|e| pred(&e.kind))
            .map(Entity::id)
            .collect()
    }

    #[test]
    fn test_start_populates_the_field() {
        let mut h = Harness::new();
        let mut game = GameState::new();
        game.start(&mut h.ctx()).unwrap();

        let manager = game.manager().unwrap();
        assert_eq!(manager.count(|k| matches!(k, EntityKind::Player(_))), 1);
        assert_eq!(manager.enemies_remaining(), 28);
        assert_eq!(manager.count(|k| matches!(k, EntityKind::Barricade(_))), 60);
        assert_eq!(h.session.runs, 1);
    }

    #[test]
    fn test_cleared_wave_respawns_faster() {
        let mut h = Harness::new();
        let mut game = GameState::new();
        game.start(&mut h.ctx()).unwrap();

        for id in ids_of(&game, |k| matches!(k, EntityKind::Enemy(_))) {
            let world = game.world.as_mut().unwrap();
            world.manager.get_mut(id).unwrap().dispose();
        }

        for _ in 0..5 {
            game.act(0.5, &mut h.ctx()).unwrap();
        }
        let wave = game.wave().unwrap();
        assert_eq!(wave.multiplier(), 2);
        let manager = game.manager().unwrap();
        assert_eq!(manager.enemies_remaining(), 28);
        assert!(
            manager
                .iter()
                .filter(|e| matches!(e.kind, EntityKind::Enemy(_)))
                .all(|e| (e.body.vel.x - 120.0).abs() < 1e-3)
        );
    }

    #[test]
    fn test_ufo_hit_scores_into_session() {
        let mut h = Harness::new();
        let mut game = GameState::new();
        game.start(&mut h.ctx()).unwrap();

        {
            let world = game.world.as_mut().unwrap();
            let region = world.sprites.random(Category::Ufos, &mut world.rng);
            let ufo = Ufo::create(region, Vec2::new(800.0, 600.0), &mut world.rng, &h.settings.tuning);
            let pos = ufo.body.pos + Vec2::new(10.0, 0.0);
            world.manager.add(ufo);
            let body = Body::with_region(crate::platform::Region::new("bookmark", 4, 12))
                .at(pos)
                .colliding();
            world
                .manager
                .add(Entity::new(body, Bullet::new(EntityId(999), Faction::Player)));
        }

        game.act(0.001, &mut h.ctx()).unwrap();
        assert_eq!(h.session.score, 70);
        assert_eq!(h.session.highscore, 70);
        assert!(h.host.sounds.contains(&Sound::UfoHit));

        let mut batch = RecordingBatch::new();
        let frame = Frame {
            screen: Vec2::new(800.0, 600.0),
            interpolation: 0.0,
            session: &h.session,
        };
        game.draw(&mut batch, &frame);
        assert_eq!(batch.texts().collect::<Vec<_>>(), vec!["70"]);
    }

    #[test]
    fn test_player_death_ends_the_run() {
        let mut h = Harness::new();
        let mut game = GameState::new();
        game.start(&mut h.ctx()).unwrap();

        let player = ids_of(&game, |k| matches!(k, EntityKind::Player(_)))[0];
        game.world
            .as_mut()
            .unwrap()
            .manager
            .get_mut(player)
            .unwrap()
            .dispose();

        let mut transition = Transition::None;
        for _ in 0..20 {
            transition = game.act(0.1, &mut h.ctx()).unwrap();
            if transition != Transition::None {
                break;
            }
        }
        assert_eq!(transition, Transition::to(GAME_OVER));
        assert!(h.host.sounds.contains(&Sound::PlayerHit));
    }

    #[test]
    fn test_stop_drops_the_run() {
        let mut h = Harness::new();
        let mut game = GameState::new();
        game.start(&mut h.ctx()).unwrap();
        game.stop(&mut h.ctx());
        assert!(game.manager().is_none());
        assert_eq!(game.act(0.01, &mut h.ctx()).unwrap(), Transition::None);
    }
}
