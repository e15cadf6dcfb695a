//! Entity manager
//!
//! Owns the live entities and runs the per-step passes over them:
//! act, act_end, collisions, then the sweep. Nothing is added to or removed
//! from the live list while a pass is iterating it. Spawns go to the pending
//! buffer and removals wait for the sweep.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::{Ctx, Entity, EntityId, EntityKind, Spawner};
use crate::platform::{Batch, Key};

#[derive(Debug, Default)]
pub struct EntityManager {
    /// Live entities in insertion (= draw) order
    entities: Vec<Entity>,
    spawner: Spawner,
    /// Collision callbacks dispatched in the last step, as (self, other)
    contacts: Vec<(EntityId, EntityId)>,
    /// Step length of the last `act`, used to extrapolate when drawing
    last_dt: f32,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert directly into the live set. Only valid between passes, which
    /// `&mut self` guarantees.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        debug_assert!(
            !entity.body.checking_collisions || entity.body.bounds.area() > 0.0,
            "{} with collisions enabled has a zero-area box",
            entity.kind.name()
        );
        let id = self.spawner.alloc_id();
        entity.body.id = id;
        self.entities.push(entity);
        id
    }

    /// Advance every entity by one step
    pub fn act(&mut self, ctx: &mut Ctx<'_>) {
        self.contacts.clear();
        self.last_dt = ctx.dt;

        for entity in self.entities.iter_mut() {
            if entity.is_destroyed() {
                continue;
            }
            entity.body.integrate(ctx.dt);
            entity
                .kind
                .behavior_mut()
                .act(&mut entity.body, ctx, &mut self.spawner);
        }

        if ctx.take_wave_bounce() {
            for entity in self.entities.iter_mut() {
                if let EntityKind::Enemy(enemy) = &mut entity.kind {
                    if !entity.body.is_destroyed() {
                        enemy.queue_bounce();
                    }
                }
            }
        }

        for entity in self.entities.iter_mut() {
            if entity.is_destroyed() {
                continue;
            }
            entity.kind.behavior_mut().act_end(&mut entity.body, ctx);
        }

        self.detect_collisions(ctx);
        self.sweep(ctx);
        self.merge_pending();
    }

    /// Pairwise AABB test over every live, collision-enabled entity
    fn detect_collisions(&mut self, ctx: &mut Ctx<'_>) {
        let n = self.entities.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.entities, i, j);
                if a.is_destroyed() || b.is_destroyed() {
                    continue;
                }
                if !a.body.checking_collisions || !b.body.checking_collisions {
                    continue;
                }
                if !a.body.world_box().overlaps(&b.body.world_box()) {
                    continue;
                }

                self.contacts.push((a.id(), b.id()));
                a.kind.behavior_mut().collision(&mut a.body, b, ctx);
                self.contacts.push((b.id(), a.id()));
                b.kind.behavior_mut().collision(&mut b.body, a, ctx);
            }
        }
    }

    /// Run destroy hooks and drop everything marked destroyed
    fn sweep(&mut self, ctx: &mut Ctx<'_>) {
        for entity in self.entities.iter_mut() {
            if entity.is_destroyed() {
                entity
                    .kind
                    .behavior_mut()
                    .destroy(&entity.body, ctx, &mut self.spawner);
            }
        }
        self.entities.retain(|e| !e.is_destroyed());
    }

    fn merge_pending(&mut self) {
        let pending = std::mem::take(&mut self.spawner.pending);
        for entity in pending {
            if entity.is_destroyed() {
                continue;
            }
            debug_assert!(
                !entity.body.checking_collisions || entity.body.bounds.area() > 0.0,
                "{} with collisions enabled has a zero-area box",
                entity.kind.name()
            );
            self.entities.push(entity);
        }
    }

    /// Forward an edge-triggered key press to every live entity
    pub fn key_pressed(&mut self, key: Key, ctx: &mut Ctx<'_>) {
        let live: HashSet<EntityId> = self
            .entities
            .iter()
            .chain(self.spawner.pending.iter())
            .filter(|e| !e.is_destroyed())
            .map(Entity::id)
            .collect();

        for entity in self.entities.iter_mut() {
            if entity.is_destroyed() {
                continue;
            }
            entity
                .kind
                .behavior_mut()
                .key_pressed(&entity.body, key, &live, ctx, &mut self.spawner);
        }
    }

    /// Draw live entities in insertion order. `interpolation` is the
    /// fraction of a step elapsed since the last `act`.
    pub fn draw(&self, batch: &mut dyn Batch, interpolation: f32) {
        let ahead = interpolation * self.last_dt;
        for entity in &self.entities {
            if entity.is_destroyed() {
                continue;
            }
            let body = &entity.body;
            let pos: Vec2 = body.pos + body.offset + body.vel * ahead;
            entity.kind.behavior().draw(body, batch, pos);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities matching `pred`, not counting destroyed ones
    pub fn count(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities
            .iter()
            .filter(|e| !e.is_destroyed() && pred(&e.kind))
            .count()
    }

    pub fn enemies_remaining(&self) -> usize {
        self.count(|k| matches!(k, EntityKind::Enemy(_)))
    }

    pub fn pending_len(&self) -> usize {
        self.spawner.pending_len()
    }

    pub fn last_contacts(&self) -> &[(EntityId, EntityId)] {
        &self.contacts
    }

    /// Drop every entity, live and pending
    pub fn clear(&mut self) {
        self.entities.clear();
        self.spawner.pending.clear();
        self.contacts.clear();
    }
}

/// Two distinct mutable elements, `i < j`
fn pair_mut(entities: &mut [Entity], i: usize, j: usize) -> (&mut Entity, &mut Entity) {
    debug_assert!(i < j);
    let (lo, hi) = entities.split_at_mut(j);
    (&mut lo[i], &mut hi[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Category, Region, RecordingBatch};
    use crate::sim::entities::test_support::{Fixture, bullet_at};
    use crate::sim::entities::{Barricade, Enemy, Player, Ufo};
    use crate::sim::entity::{Body, Faction, GameEvent};

    fn enemy_at(fx: &mut Fixture, pos: Vec2) -> Entity {
        let region = Region::new("novel", 32, 24);
        Enemy::create(region, pos, 60.0, &mut fx.rng, &fx.tuning)
    }

    fn segment_at(pos: Vec2) -> Entity {
        Entity::new(
            Body::with_region(Region::new("shelf", 16, 15)).at(pos).colliding(),
            Barricade,
        )
    }

    #[test]
    fn test_wave_reverses_together() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        // Rightmost enemy already touching the right edge
        let a = manager.add(enemy_at(&mut fx, Vec2::new(700.0, 400.0)));
        let b = manager.add(enemy_at(&mut fx, Vec2::new(768.0, 400.0)));

        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);

        for id in [a, b] {
            let e = manager.get(id).unwrap();
            assert!(e.body.vel.x < 0.0, "enemy {id} did not reverse");
            assert!((e.body.vel.x + 60.0).abs() < 1e-3);
            assert!((e.body.pos.y - 385.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_no_bounce_away_from_edges() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        let a = manager.add(enemy_at(&mut fx, Vec2::new(300.0, 400.0)));
        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);
        let e = manager.get(a).unwrap();
        assert!(e.body.vel.x > 0.0);
        assert_eq!(e.body.pos.y, 400.0);
    }

    #[test]
    fn test_overlapping_pair_gets_both_callbacks_once() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        let seg = manager.add(segment_at(Vec2::new(100.0, 100.0)));
        let enemy = manager.add(enemy_at(&mut fx, Vec2::new(105.0, 105.0)));
        // Far away, never touches anything
        manager.add(segment_at(Vec2::new(500.0, 100.0)));

        let mut ctx = fx.ctx(0.0);
        manager.act(&mut ctx);

        assert_eq!(manager.last_contacts(), &[(seg, enemy), (enemy, seg)]);
        assert!(manager.get(seg).is_none());
        assert!(manager.get(enemy).is_some());
    }

    #[test]
    fn test_destroyed_entity_is_gone_for_good() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        let seg = manager.add(segment_at(Vec2::new(100.0, 100.0)));
        let shot = manager.add(bullet_at(Vec2::new(105.0, 105.0), EntityId(999), Faction::Invader));
        // Second segment overlapping the same bullet
        let seg2 = manager.add(segment_at(Vec2::new(104.0, 104.0)));

        let mut ctx = fx.ctx(0.0);
        manager.act(&mut ctx);

        // The bullet broke the first segment and was absorbed by it
        assert!(manager.get(seg).is_none());
        assert!(manager.get(shot).is_none());
        assert!(manager.get(seg2).is_some());
        assert!(!manager.last_contacts().iter().any(|&(a, b)| a == seg2 && b == shot));

        // Nothing destroyed resurfaces in later passes
        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);
        let mut batch = RecordingBatch::new();
        manager.draw(&mut batch, 0.0);
        assert_eq!(batch.regions().count(), 1);
        assert!(manager.iter().all(|e| e.id() != seg && e.id() != shot));
    }

    #[test]
    fn test_spawns_join_after_the_pass() {
        let mut fx = Fixture::new();
        fx.tuning.enemy_fire = crate::tuning::FireWindow::new(0.0, 0.0);
        let mut manager = EntityManager::new();
        manager.add(enemy_at(&mut fx, Vec2::new(300.0, 400.0)));

        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);
        // The bullet fired this step is live now, but was not acted on yet
        let bullet = manager
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Bullet(_)))
            .unwrap();
        let center = Vec2::new(300.6 + 16.0, 400.0 + 12.0);
        assert!((bullet.body.center() - center).length() < 1e-3);
        assert_eq!(manager.pending_len(), 0);
    }

    #[test]
    fn test_player_fire_cap() {
        let mut fx = Fixture::new();
        fx.tuning.player_max_bullets = 3;
        let mut manager = EntityManager::new();
        let region = fx.sprites.character(None).unwrap();
        let player = manager.add(Player::create(region, Vec2::new(800.0, 600.0), &fx.tuning));

        // One bullet already out (M = 1)
        let mut ctx = fx.ctx(0.01);
        manager.key_pressed(Key::Fire, &mut ctx);
        manager.act(&mut ctx);
        let bullets = |m: &EntityManager| m.count(|k| matches!(k, EntityKind::Bullet(_)));
        assert_eq!(bullets(&manager), 1);

        // N = 5 presses in one step
        let mut ctx = fx.ctx(0.01);
        for _ in 0..5 {
            manager.key_pressed(Key::Fire, &mut ctx);
        }
        manager.act(&mut ctx);
        assert_eq!(bullets(&manager), 3);

        let EntityKind::Player(p) = &manager.get(player).unwrap().kind else {
            unreachable!()
        };
        assert_eq!(p.bullets().len(), 3);
    }

    #[test]
    fn test_player_death_flow() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        let region = fx.sprites.character(None).unwrap();
        let player = manager.add(Player::create(region, Vec2::new(800.0, 600.0), &fx.tuning));
        let pos = manager.get(player).unwrap().body.pos;
        manager.add(bullet_at(pos, EntityId(999), Faction::Invader));

        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);
        assert!(manager.get(player).is_none());
        // Flash + game over timer
        assert_eq!(manager.len(), 2);

        let mut events = Vec::new();
        for _ in 0..150 {
            let mut ctx = fx.ctx(0.01);
            manager.act(&mut ctx);
            events.extend(ctx.events);
        }
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_ufo_scores_through_manager() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        let region = fx.sprites.random(Category::Ufos, &mut fx.rng);
        let ufo = manager.add(Ufo::create(region, Vec2::new(800.0, 600.0), &mut fx.rng, &fx.tuning));
        let pos = manager.get(ufo).unwrap().body.pos + Vec2::new(10.0, 0.0);
        manager.add(bullet_at(pos, EntityId(1), Faction::Player));

        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);
        assert_eq!(ctx.events, vec![GameEvent::Score(70)]);
        assert!(manager.get(ufo).is_none());
    }

    #[test]
    fn test_draw_extrapolates_motion() {
        let mut fx = Fixture::new();
        let mut manager = EntityManager::new();
        manager.add(enemy_at(&mut fx, Vec2::new(100.0, 100.0)));
        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);

        let mut batch = RecordingBatch::new();
        manager.draw(&mut batch, 0.5);
        let (_, pos) = batch.regions().next().unwrap();
        assert!((pos.x - 100.9).abs() < 1e-3);
    }

    #[test]
    fn test_bullets_drawn_from_their_offset() {
        let mut fx = Fixture::new();
        fx.tuning.enemy_fire = crate::tuning::FireWindow::new(0.0, 0.0);
        let mut manager = EntityManager::new();
        manager.add(enemy_at(&mut fx, Vec2::new(300.0, 400.0)));
        let mut ctx = fx.ctx(0.01);
        manager.act(&mut ctx);

        let mut batch = RecordingBatch::new();
        manager.draw(&mut batch, 0.0);
        let (name, pos) = batch.regions().nth(1).unwrap();
        assert_eq!(name, "bookmark");
        // Centred on the shooter, so the image starts half a laser up-left
        let expected = Vec2::new(300.6 + 16.0 - 2.0, 400.0 + 12.0 - 6.0);
        assert!((pos - expected).length() < 1e-3);
    }
}
