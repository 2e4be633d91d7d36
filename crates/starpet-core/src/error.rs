//! Error types for starpet-core

use thiserror::Error;

/// Catalog lookup error type
///
/// Only raised for structurally invalid lookups (unknown character type,
/// stage outside the catalog). Id-based lookups return `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid character type: {0}")]
    InvalidCharacterType(String),

    #[error("Stage {stage} out of range for {character} (1..={max})")]
    StageOutOfRange {
        character: String,
        stage: u8,
        max: u8,
    },

    #[error("Invalid mission category: {0}")]
    InvalidMissionCategory(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
