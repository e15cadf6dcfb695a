//! Platform abstraction layer
//!
//! The simulation never talks to a window, GPU or mixer directly. Whatever
//! engine hosts the game implements [`Host`] (assets, audio, screen, input)
//! and [`Batch`] (drawing), and the core only sees these traits.

pub mod headless;

use std::fmt;

use glam::Vec2;

pub use headless::{DrawCall, HeadlessHost, RecordingBatch};

/// Image pack categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Characters,
    Enemies,
    Ufos,
    Barricades,
    Lasers,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Characters,
        Category::Enemies,
        Category::Ufos,
        Category::Barricades,
        Category::Lasers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Characters => "characters",
            Category::Enemies => "enemies",
            Category::Ufos => "ufos",
            Category::Barricades => "barricades",
            Category::Lasers => "lasers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sound effects the core asks the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    EnemyHit,
    EnemyShot,
    Menu,
    PlayerHit,
    PlayerShot,
    UfoBeep,
    UfoHit,
}

/// Logical keys. The host maps physical input onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// A named rectangle inside a packed texture
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Sub-rectangle relative to this region's origin
    pub fn sub(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            name: self.name.clone(),
            x: self.x + x,
            y: self.y + y,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Services the host engine provides to the core
pub trait Host {
    /// Image names available in a category (empty until loading completes)
    fn region_names(&self, category: Category) -> Vec<String>;

    fn find_region(&self, category: Category, name: &str) -> Option<Region>;

    /// Fire-and-forget
    fn play_sound(&mut self, sound: Sound);

    /// Current drawable size in pixels
    fn screen_size(&self) -> Vec2;

    fn is_key_down(&self, key: Key) -> bool;

    /// Keys pressed since the last call (edge-triggered). Draining is the
    /// caller's job; each press is reported once.
    fn take_key_presses(&mut self) -> Vec<Key>;

    /// Kick off asynchronous asset loading
    fn begin_loading(&mut self);

    /// Loading progress in `[0, 1]`, where `1.0` means every asset is ready
    fn loading_progress(&mut self) -> f32;
}

/// Render target for one frame
pub trait Batch {
    fn draw_region(&mut self, region: &Region, pos: Vec2);

    /// Full-screen colour overlay (RGBA, alpha in `[0, 1]`)
    fn draw_overlay(&mut self, color: [f32; 4]);

    fn draw_text(&mut self, text: &str, pos: Vec2);
}
