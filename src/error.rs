//! Error types for the engine boundary
//!
//! The search core never fails: an empty tactical result falls through to a
//! heuristic, and a position with no candidates becomes a terminal node.
//! Errors only arise where callers hand the engine something it cannot use.

use thiserror::Error;

use crate::rules::GameResult;

/// Errors surfaced by board construction, move validation, configuration
/// loading and the top-level search entry point.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is outside the {height}x{width} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("position ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("invalid board dimensions {height}x{width} (each side must be 1..=255)")]
    InvalidDimensions { height: usize, width: usize },

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("game is already over: {0}")]
    GameOver(GameResult),

    #[error("search finished without a candidate move")]
    NoCandidates,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
