//! Library Invaders - A book-themed fixed-screen shooter
//!
//! Core modules:
//! - `sim`: Entities, the entity manager, collisions and wave generation
//! - `states`: Loading, menu, game and game-over screens
//! - `platform`: Host traits (assets, audio, input, drawing) and a headless host
//! - `app`: Fixed-step frame loop tying it all together
//! - `settings` / `tuning`: Startup configuration and game balance
//! - `session`: Score, high score and character pick

pub mod app;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod states;
pub mod timestep;
pub mod tuning;

pub use app::App;
pub use error::{Error, Result};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Loop configuration constants
pub mod consts {
    /// Fixed simulation step in milliseconds (100 Hz)
    pub const STEP_MS: u64 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
