//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed step length handed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the live list)
//! - No rendering or windowing; the host is reached through `platform` traits

pub mod collision;
pub mod entities;
pub mod entity;
pub mod manager;
pub mod sprites;
pub mod wave;

pub use collision::Aabb;
pub use entity::{Behavior, Body, Ctx, Entity, EntityId, EntityKind, Faction, GameEvent, Spawner};
pub use manager::EntityManager;
pub use sprites::SpriteSheet;
pub use wave::{Wave, spawn_barricades, spawn_wave};
