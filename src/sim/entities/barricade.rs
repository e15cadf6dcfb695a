//! Destructible cover
//!
//! A placed barricade image is cut into a grid of segments up front. Each
//! segment is its own entity and breaks on its own.

use glam::Vec2;

use crate::platform::Region;
use crate::sim::entity::{Behavior, Body, Ctx, Entity, EntityKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Barricade;

impl Barricade {
    /// Slice `region`, placed with its bottom-left corner at `origin`, into
    /// `rows` x `columns` segments. Row 0 is the bottom row; texture rows are
    /// counted from the top, so they are flipped.
    pub fn segments(region: &Region, origin: Vec2, rows: u32, columns: u32) -> Vec<Entity> {
        let rows = rows.max(1);
        let columns = columns.max(1);
        let width = region.width / columns;
        let height = region.height / rows;
        if width == 0 || height == 0 {
            log::warn!(
                "Barricade image {} ({}x{}) too small for {}x{} segments",
                region.name,
                region.width,
                region.height,
                rows,
                columns
            );
            return Vec::new();
        }

        let mut segments = Vec::with_capacity((rows * columns) as usize);
        for y in 0..rows {
            for x in 0..columns {
                let tex = region.sub(x * width, (rows - y - 1) * height, width, height);
                let pos = origin + Vec2::new((x * width) as f32, (y * height) as f32);
                let body = Body::with_region(tex).at(pos).colliding();
                segments.push(Entity::new(body, Barricade));
            }
        }
        segments
    }
}

impl Behavior for Barricade {
    fn collision(&mut self, body: &mut Body, other: &mut Entity, _ctx: &mut Ctx<'_>) {
        match other.kind {
            // The bullet is absorbed by the segment it hits
            EntityKind::Bullet(_) => {
                other.dispose();
                body.dispose();
            }
            EntityKind::Enemy(_) => {
                body.dispose();
            }
            _ => {}
        }
    }
}
