//! Bullets
//!
//! A bullet only moves and leaves the screen. Whatever it hits decides what
//! happens, using the owner id and faction stored here.

use crate::sim::entity::{Behavior, Body, Ctx, EntityId, Faction, Spawner};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub owner: EntityId,
    pub faction: Faction,
}

impl Bullet {
    pub fn new(owner: EntityId, faction: Faction) -> Self {
        Self { owner, faction }
    }

    #[inline]
    pub fn from_player(&self) -> bool {
        self.faction == Faction::Player
    }
}

impl Behavior for Bullet {
    fn act(&mut self, body: &mut Body, ctx: &mut Ctx<'_>, _spawner: &mut Spawner) {
        let bounds = body.world_box();
        if bounds.top() < 0.0 || bounds.bottom() > ctx.screen.y {
            body.dispose();
        }
    }
}
