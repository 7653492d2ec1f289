//! Error types for map and island generation.
//!
//! Covers malformed caller input (bad identifier strings, impossible map
//! parameters) and degenerate generation outcomes. Internal consistency
//! breaches (an unclassifiable coastline pattern) are panics, not variants:
//! defaulting them to an arbitrary tile would silently corrupt persisted maps.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The identifier string is not a random island identifier. Callers
    /// treat this as "look for a file-based island instead".
    #[error("not a random island identifier: {0:?}")]
    NotARandomIsland(String),

    /// The identifier matched the pattern but names an unknown creation method.
    #[error("unknown creation method {0} (expected 0-2)")]
    InvalidCreationMethod(i64),

    /// Map or island parameters that can never produce a valid map.
    #[error("invalid generation parameters: {0}")]
    InvalidSpec(String),

    /// Shape synthesis carved away every land cell. The caller may retry
    /// with a different seed; the generator never substitutes a fallback.
    #[error("island {width}x{height} with seed {seed} produced no land")]
    EmptyIsland { width: i32, height: i32, seed: i64 },

    /// Not a single island fit the canvas within the land budget.
    #[error("no island could be placed on the canvas within the land budget")]
    NoIslandsPlaced,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save format error: {0}")]
    Format(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
