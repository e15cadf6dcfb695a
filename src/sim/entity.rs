//! Entity core types
//!
//! An [`Entity`] is a [`Body`] (position, motion, collision box, flags) plus
//! an [`EntityKind`] carrying the per-kind state. Behaviour is dispatched
//! through the [`Behavior`] trait, which every kind implements.

use std::collections::HashSet;
use std::fmt;

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::entities::{Barricade, Bullet, Enemy, GameOverTimer, Player, Ufo, WhiteFlash};
use super::sprites::SpriteSheet;
use crate::platform::{Batch, Host, Key, Region};
use crate::tuning::Tuning;

/// Stable entity handle, unique for the lifetime of a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Placeholder until the manager assigns a real id
    pub const UNASSIGNED: EntityId = EntityId(0);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Player,
    Invader,
}

/// Things that happened during a step that the owning state reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Points to add to the session score
    Score(u32),
    /// The player's death timer ran out
    GameOver,
}

/// Per-step context handed to every entity hook
pub struct Ctx<'a> {
    /// Step length in seconds
    pub dt: f32,
    /// Screen size sampled at the start of the step
    pub screen: Vec2,
    pub host: &'a mut dyn Host,
    pub sprites: &'a SpriteSheet,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub events: Vec<GameEvent>,
    wave_bounce: bool,
}

impl<'a> Ctx<'a> {
    pub fn new(
        dt: f32,
        host: &'a mut dyn Host,
        sprites: &'a SpriteSheet,
        tuning: &'a Tuning,
        rng: &'a mut Pcg32,
    ) -> Self {
        let screen = host.screen_size();
        Self {
            dt,
            screen,
            host,
            sprites,
            tuning,
            rng,
            events: Vec::new(),
            wave_bounce: false,
        }
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// An enemy touched a screen edge: the whole wave turns around in
    /// `act_end` of this step.
    #[inline]
    pub fn request_wave_bounce(&mut self) {
        self.wave_bounce = true;
    }

    pub(crate) fn take_wave_bounce(&mut self) -> bool {
        std::mem::take(&mut self.wave_bounce)
    }
}

/// Hands out ids and buffers entities created while a pass is running
#[derive(Debug, Default)]
pub struct Spawner {
    next_id: u64,
    pub(crate) pending: Vec<Entity>,
}

impl Spawner {
    pub(crate) fn alloc_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    /// Queue an entity; it joins the live set once the current pass ends
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.alloc_id();
        entity.body.id = id;
        self.pending.push(entity);
        id
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// State shared by every entity kind
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Render offset from `pos`
    pub offset: Vec2,
    /// Collision box relative to `pos`
    pub bounds: Aabb,
    pub checking_collisions: bool,
    pub region: Option<Region>,
    destroyed: bool,
}

impl Body {
    /// Invisible body with no collision box
    pub fn new() -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            offset: Vec2::ZERO,
            bounds: Aabb::default(),
            checking_collisions: false,
            region: None,
            destroyed: false,
        }
    }

    /// Body drawn with `region`, collision box covering the whole image
    pub fn with_region(region: Region) -> Self {
        Self {
            bounds: Aabb::sized(region.size()),
            region: Some(region),
            ..Self::new()
        }
    }

    /// Body anchored at its centre: `pos` is the middle of the image and of
    /// the collision box
    pub fn centered(region: Region) -> Self {
        let half = region.size() / 2.0;
        Self {
            offset: -half,
            bounds: Aabb::new(-half.x, -half.y, region.width as f32, region.height as f32),
            region: Some(region),
            ..Self::new()
        }
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn colliding(mut self) -> Self {
        self.checking_collisions = true;
        self
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Set velocity from a speed and an angle in degrees (0 = right, 90 = up)
    pub fn set_motion(&mut self, speed: f32, degrees: f32) {
        self.vel = Vec2::from_angle(degrees.to_radians()) * speed;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Direction of travel in degrees, `[0, 360)`
    pub fn direction(&self) -> f32 {
        self.vel.y.atan2(self.vel.x).to_degrees().rem_euclid(360.0)
    }

    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Collision box in world space
    #[inline]
    pub fn world_box(&self) -> Aabb {
        self.bounds.at(self.pos)
    }

    /// Size of the image, or of the collision box for invisible bodies
    pub fn size(&self) -> Vec2 {
        match &self.region {
            Some(region) => region.size(),
            None => Vec2::new(self.bounds.width, self.bounds.height),
        }
    }

    /// Centre of the collision box in world space
    #[inline]
    pub fn center(&self) -> Vec2 {
        let b = self.world_box();
        Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0)
    }

    pub fn region(&self) -> Option<&Region> {
        debug_assert!(!self.destroyed, "texture of destroyed entity {} queried", self.id);
        self.region.as_ref()
    }

    /// Mark for removal at the end of the step. Returns false if the body
    /// was already destroyed, in which case nothing changes.
    pub fn dispose(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        true
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-kind lifecycle hooks. Every hook has a no-op default.
pub trait Behavior {
    /// Update for one step, after the body has moved
    fn act(&mut self, _body: &mut Body, _ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {}

    /// Runs once every entity has acted this step
    fn act_end(&mut self, _body: &mut Body, _ctx: &mut Ctx<'_>) {}

    /// Called with each overlapping collision-enabled entity
    fn collision(&mut self, _body: &mut Body, _other: &mut Entity, _ctx: &mut Ctx<'_>) {}

    /// Runs once, in the sweep that removes the entity
    fn destroy(&mut self, _body: &Body, _ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {}

    /// Edge-triggered key press. `live` is every entity not destroyed.
    fn key_pressed(
        &mut self,
        _body: &Body,
        _key: Key,
        _live: &HashSet<EntityId>,
        _ctx: &mut Ctx<'_>,
        _spawner: &mut Spawner,
    ) {
    }

    fn draw(&self, body: &Body, batch: &mut dyn Batch, pos: Vec2) {
        if let Some(region) = body.region() {
            batch.draw_region(region, pos);
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(Player),
    Enemy(Enemy),
    Ufo(Ufo),
    Bullet(Bullet),
    Barricade(Barricade),
    Flash(WhiteFlash),
    GameOverTimer(GameOverTimer),
}

impl EntityKind {
    pub fn behavior(&self) -> &dyn Behavior {
        match self {
            EntityKind::Player(k) => k,
            EntityKind::Enemy(k) => k,
            EntityKind::Ufo(k) => k,
            EntityKind::Bullet(k) => k,
            EntityKind::Barricade(k) => k,
            EntityKind::Flash(k) => k,
            EntityKind::GameOverTimer(k) => k,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            EntityKind::Player(k) => k,
            EntityKind::Enemy(k) => k,
            EntityKind::Ufo(k) => k,
            EntityKind::Bullet(k) => k,
            EntityKind::Barricade(k) => k,
            EntityKind::Flash(k) => k,
            EntityKind::GameOverTimer(k) => k,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Player(_) => "player",
            EntityKind::Enemy(_) => "enemy",
            EntityKind::Ufo(_) => "ufo",
            EntityKind::Bullet(_) => "bullet",
            EntityKind::Barricade(_) => "barricade",
            EntityKind::Flash(_) => "flash",
            EntityKind::GameOverTimer(_) => "game-over-timer",
        }
    }
}

macro_rules! kind_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for EntityKind {
            fn from(kind: $ty) -> Self {
                EntityKind::$variant(kind)
            }
        })*
    };
}

kind_from! {
    Player => Player,
    Enemy => Enemy,
    Ufo => Ufo,
    Bullet => Bullet,
    Barricade => Barricade,
    WhiteFlash => Flash,
    GameOverTimer => GameOverTimer,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(body: Body, kind: impl Into<EntityKind>) -> Self {
        Self {
            body,
            kind: kind.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body.id
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    #[inline]
    pub fn dispose(&mut self) -> bool {
        self.body.dispose()
    }
}
