use thiserror::Error;

use crate::api::types::DotId;

/// Failures that abort an orchestration step.
///
/// Invalid moves are not errors; see [`crate::board::chain::Rejection`].
#[derive(Error, Debug)]
pub enum GameError {
    #[error("no configuration for level {0}")]
    UnknownLevel(u32),

    #[error("all levels are complete; restart before initializing a level")]
    SessionComplete,

    #[error("display element not found: {0}")]
    MissingDisplay(&'static str),

    #[error("invalid level table: {reason}")]
    InvalidLevelTable { reason: String },

    #[error("invalid board config: {reason}")]
    InvalidBoard { reason: String },

    #[error("dot {0:?} is outside the grid")]
    UnknownDot(DotId),

    #[error("config parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
