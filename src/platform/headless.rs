//! Headless host for the demo driver and tests
//!
//! Holds a fixed set of sprite sizes, records sounds and draw calls, and
//! takes scripted input instead of reading a keyboard.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::{Batch, Category, Host, Key, Region, Sound};

/// Polls of `loading_progress` before assets become visible
const DEFAULT_LOAD_POLLS: u32 = 3;

pub struct HeadlessHost {
    screen: Vec2,
    packs: HashMap<Category, Vec<Region>>,
    loaded: bool,
    loading: bool,
    load_polls: u32,
    polls: u32,
    keys_down: HashSet<Key>,
    presses: Vec<Key>,
    /// Every sound played, in order
    pub sounds: Vec<Sound>,
}

impl HeadlessHost {
    /// Empty host with no images registered
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen: Vec2::new(width, height),
            packs: HashMap::new(),
            loaded: false,
            loading: false,
            load_polls: DEFAULT_LOAD_POLLS,
            polls: 0,
            keys_down: HashSet::new(),
            presses: Vec::new(),
            sounds: Vec::new(),
        }
    }

    /// Host with a small built-in image set in every category
    pub fn with_default_sprites(width: f32, height: f32) -> Self {
        let mut host = Self::new(width, height);
        host.add_region(Category::Characters, Region::new("librarian", 40, 30));
        host.add_region(Category::Characters, Region::new("bookworm", 36, 32));
        host.add_region(Category::Enemies, Region::new("novel", 32, 24));
        host.add_region(Category::Enemies, Region::new("atlas", 30, 26));
        host.add_region(Category::Ufos, Region::new("encyclopedia", 48, 20));
        host.add_region(Category::Barricades, Region::new("shelf", 80, 45));
        host.add_region(Category::Lasers, Region::new("bookmark", 4, 12));
        host
    }

    pub fn add_region(&mut self, category: Category, region: Region) {
        self.packs.entry(category).or_default().push(region);
    }

    /// Skip the asynchronous loading phase
    pub fn preloaded(mut self) -> Self {
        self.loaded = true;
        self
    }

    pub fn set_load_polls(&mut self, polls: u32) {
        self.load_polls = polls.max(1);
    }

    /// Queue an edge-triggered press
    pub fn press(&mut self, key: Key) {
        self.presses.push(key);
    }

    pub fn hold(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }
}

impl Host for HeadlessHost {
    fn region_names(&self, category: Category) -> Vec<String> {
        if !self.loaded {
            return Vec::new();
        }
        self.packs
            .get(&category)
            .map(|regions| regions.iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }

    fn find_region(&self, category: Category, name: &str) -> Option<Region> {
        if !self.loaded {
            return None;
        }
        self.packs
            .get(&category)?
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }

    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn take_key_presses(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.presses)
    }

    fn begin_loading(&mut self) {
        if !self.loaded {
            self.loading = true;
            self.polls = 0;
        }
    }

    fn loading_progress(&mut self) -> f32 {
        if self.loaded {
            return 1.0;
        }
        if !self.loading {
            return 0.0;
        }
        self.polls += 1;
        if self.polls >= self.load_polls {
            self.loaded = true;
            self.loading = false;
            return 1.0;
        }
        self.polls as f32 / self.load_polls as f32
    }
}

/// One recorded draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Region { name: String, pos: Vec2 },
    Overlay { color: [f32; 4] },
    Text { text: String, pos: Vec2 },
}

/// Batch that just remembers what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingBatch {
    pub calls: Vec<DrawCall>,
}

impl RecordingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn regions(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Region { name, pos } => Some((name.as_str(), *pos)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Batch for RecordingBatch {
    fn draw_region(&mut self, region: &Region, pos: Vec2) {
        self.calls.push(DrawCall::Region {
            name: region.name.clone(),
            pos,
        });
    }

    fn draw_overlay(&mut self, color: [f32; 4]) {
        self.calls.push(DrawCall::Overlay { color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_hidden_until_loaded() {
        let mut host = HeadlessHost::with_default_sprites(800.0, 600.0);
        host.set_load_polls(2);
        assert!(host.region_names(Category::Enemies).is_empty());

        host.begin_loading();
        assert!(host.loading_progress() < 1.0);
        assert_eq!(host.loading_progress(), 1.0);
        assert_eq!(host.region_names(Category::Enemies).len(), 2);
        assert!(host.find_region(Category::Lasers, "bookmark").is_some());
    }

    #[test]
    fn test_key_presses_drain_once() {
        let mut host = HeadlessHost::new(100.0, 100.0);
        host.press(Key::Fire);
        host.press(Key::Fire);
        assert_eq!(host.take_key_presses(), vec![Key::Fire, Key::Fire]);
        assert!(host.take_key_presses().is_empty());
    }
}
