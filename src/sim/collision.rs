//! Axis-aligned box overlap
//!
//! No broad phase: a screen holds a few dozen entities, so the manager just
//! tests every pair each step.

use glam::Vec2;

/// Collision box relative to an entity's position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at the origin
    pub fn sized(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// The box in world space for an entity at `pos`
    #[inline]
    pub fn at(&self, pos: Vec2) -> Aabb {
        Aabb::new(pos.x + self.x, pos.y + self.y, self.width, self.height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap on both axes; shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}
