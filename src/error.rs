//! Crate error type
//!
//! Only startup (configuration) and explicit removal-by-id can fail. The
//! per-frame path absorbs faults and logs them instead of returning errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Removal of an actor that is no longer in the population
    #[error("actor {0} is not in the population")]
    ActorMissing(u32),

    #[error("the player ship cannot be removed")]
    PlayerRemoval,
}
