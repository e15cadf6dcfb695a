//! Data-driven game balance
//!
//! Speeds are pixels per second, timers are seconds. Missing fields in a
//! settings file fall back to these defaults.

use serde::{Deserialize, Serialize};

/// Inclusive random range for fire timers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireWindow {
    pub min: f32,
    pub max: f32,
}

impl FireWindow {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    /// Distance of the player's bottom edge from the screen bottom
    pub player_y: f32,
    pub player_bullet_speed: f32,
    /// Live player bullets allowed at once
    pub player_max_bullets: usize,

    // === Enemy wave ===
    /// Horizontal speed at difficulty multiplier 1
    pub enemy_base_speed: f32,
    /// Vertical step taken on every edge bounce
    pub creep: f32,
    pub enemy_fire: FireWindow,
    pub enemy_bullet_speed: f32,
    pub wave_rows: u32,
    pub wave_columns: u32,
    /// Gap between enemies, horizontally and vertically
    pub wave_spacing: f32,
    pub wave_top_margin: f32,
    /// Delay between a wave being cleared and the next one arriving
    pub respawn_delay: f32,

    // === UFO ===
    pub ufo_speed: f32,
    pub ufo_fire: FireWindow,
    pub ufo_points: u32,
    pub ufo_interval: f32,
    pub ufo_top_margin: f32,

    // === Barricades ===
    pub barricade_count: u32,
    pub barricade_rows: u32,
    pub barricade_columns: u32,
    /// Space between the top of the player and the barricade row
    pub barricade_gap: f32,
    /// Horizontal space kept free at the screen edges (split evenly)
    pub barricade_margin: f32,

    // === Effects / flow ===
    pub flash_duration: f32,
    pub game_over_delay: f32,
    pub menu_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 200.0,
            player_y: 30.0,
            player_bullet_speed: 500.0,
            player_max_bullets: 1,

            enemy_base_speed: 60.0,
            creep: 15.0,
            enemy_fire: FireWindow::new(20.0, 40.0),
            enemy_bullet_speed: 100.0,
            wave_rows: 4,
            wave_columns: 7,
            wave_spacing: 30.0,
            wave_top_margin: 70.0,
            respawn_delay: 2.0,

            ufo_speed: 90.0,
            ufo_fire: FireWindow::new(1.0, 5.0),
            ufo_points: 70,
            ufo_interval: 20.0,
            ufo_top_margin: 25.0,

            barricade_count: 4,
            barricade_rows: 3,
            barricade_columns: 5,
            barricade_gap: 35.0,
            barricade_margin: 100.0,

            flash_duration: 0.5,
            game_over_delay: 1.0,
            menu_delay: 0.5,
        }
    }
}

impl Tuning {
    /// Enemy horizontal speed for a given difficulty multiplier
    pub fn enemy_speed(&self, multiplier: f32) -> f32 {
        self.enemy_base_speed * multiplier
    }

    pub fn wave_size(&self) -> usize {
        (self.wave_rows * self.wave_columns) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "creep": 20.0 }"#).unwrap();
        assert_eq!(tuning.creep, 20.0);
        assert_eq!(tuning.player_max_bullets, 1);
        assert_eq!(tuning.wave_size(), 28);
    }

    #[test]
    fn test_enemy_speed_scales() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemy_speed(1.0), 60.0);
        assert_eq!(tuning.enemy_speed(3.0), 180.0);
    }
}
