//! Crate-wide error type
//!
//! Everything here is a configuration or I/O failure. The simulation loop
//! itself never fails; these only surface from startup, state transitions
//! and settings/session persistence.

use thiserror::Error;

use crate::platform::Category;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no state registered under the name `{0}`")]
    UnknownState(String),
    #[error("a state named `{0}` is already registered")]
    DuplicateState(String),
    #[error("asset category `{0}` has no images")]
    MissingAssets(Category),
    #[error("selected character `{0}` is not in the characters category")]
    UnknownCharacter(String),
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
