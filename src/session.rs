//! Session record shared between screens
//!
//! Owned by the app and handed to whichever state needs it. The high score
//! survives restarts within the process, and across processes when saved.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Score of the current (or last finished) run
    #[serde(skip)]
    pub score: u32,
    pub highscore: u32,
    /// Character image picked on the menu
    pub selected_character: Option<String>,
    /// Runs started since the process began
    #[serde(skip)]
    pub runs: u32,
    /// Set once the current run beats the previous best
    #[serde(skip)]
    new_highscore: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run: score back to zero, high score kept
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.runs += 1;
        self.new_highscore = false;
    }

    /// Add points; returns true if this set a new high score
    pub fn add_score(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.highscore {
            self.highscore = self.score;
            self.new_highscore = true;
            return true;
        }
        false
    }

    /// True if this run has beaten the best score it started against
    pub fn is_new_highscore(&self) -> bool {
        self.new_highscore
    }

    /// Load a saved session. A missing file starts fresh.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No saved session at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let session: Session = serde_json::from_str(&json)?;
        log::info!("Loaded session (highscore {})", session.highscore);
        Ok(session)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Session saved (highscore {})", self.highscore);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highscore_tracks_best_run() {
        let mut session = Session::new();
        session.reset_run();
        assert!(session.add_score(70));
        assert!(session.add_score(70));
        assert_eq!(session.highscore, 140);

        session.reset_run();
        assert_eq!(session.score, 0);
        assert!(!session.add_score(70));
        assert_eq!(session.highscore, 140);
        assert!(!session.is_new_highscore());
        assert_eq!(session.runs, 2);
    }

    #[test]
    fn test_tying_the_best_is_not_a_new_highscore() {
        let mut session = Session::new();
        session.reset_run();
        session.add_score(140);
        assert!(session.is_new_highscore());

        session.reset_run();
        assert!(!session.is_new_highscore());
        assert!(!session.add_score(140));
        assert_eq!(session.score, session.highscore);
        assert!(!session.is_new_highscore());

        // Going past it counts
        assert!(session.add_score(70));
        assert!(session.is_new_highscore());
    }

    #[test]
    fn test_save_skips_run_fields() {
        let path = std::env::temp_dir().join(format!(
            "library-invaders-session-{}.json",
            std::process::id()
        ));
        let mut session = Session::new();
        session.reset_run();
        session.add_score(210);
        session.selected_character = Some("librarian".to_string());
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.highscore, 210);
        assert_eq!(loaded.score, 0);
        assert_eq!(loaded.selected_character.as_deref(), Some("librarian"));
        let _ = std::fs::remove_file(&path);
    }
}
