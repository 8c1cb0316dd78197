//! Error types for merkle_audit

use thiserror::Error;

/// Result type alias for merkle_audit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building trees, deriving trails or verifying proofs
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot build a tree from zero chunks")]
    EmptyInput,

    #[error("No leaf with hash {0}")]
    LeafNotFound(String),

    #[error("Leaf index {index} out of range for tree with {len} leaves")]
    LeafIndexOutOfRange { index: usize, len: usize },

    #[error("Malformed audit trail: {0}")]
    MalformedTrail(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Config error: {0}")]
    Config(String),
}
