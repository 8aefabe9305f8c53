//! Error type shared by every Place Planner crate.
//!
//! Nothing in the planner is fatal: callers match on these, log them, and
//! keep the surface interactive.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// A grid dimension that is not a positive integer within the configured limit.
    #[error("invalid grid dimension {input:?}: expected a whole number from 1 to {max}")]
    InvalidDimension { input: String, max: u32 },

    /// A cell key that is not of the form `x,y`.
    #[error("malformed cell key {0:?}")]
    MalformedKey(String),

    #[error("invalid hex color {0:?}")]
    InvalidHex(String),

    /// The key-value store refused a read or write.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// A persisted record exists but could not be decoded.
    #[error("failed to decode persisted {key:?}: {reason}")]
    Decode { key: &'static str, reason: String },

    /// Export was requested while no frame can be produced.
    #[error("export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
