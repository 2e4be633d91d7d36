//! Engine configuration
//!
//! Settings are plain data with defaults for every field and can be loaded
//! from a RON file:
//!
//! ```ron
//! (
//!     key_prefix: "@starpet:",
//!     default_character: dino,
//!     db_path: Some("starpet.db"),
//! )
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use starpet_core::CharacterType;
use starpet_db::DEFAULT_PREFIX;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a `ProgressionStore`
///
/// # Example
///
/// ```
/// use starpet_core::CharacterType;
/// use starpet_engine::EngineConfig;
///
/// let config = EngineConfig::default().with_default_character(CharacterType::Robot);
/// assert_eq!(config.key_prefix(), "@starpet:");
/// assert_eq!(config.default_character(), CharacterType::Robot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Namespace prepended to every storage key
    key_prefix: String,
    /// Character selected on first run
    default_character: CharacterType,
    /// Database file for on-disk storage (`None` = caller supplies a store)
    db_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Set the storage namespace
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the first-run character
    pub fn with_default_character(mut self, character: CharacterType) -> Self {
        self.default_character = character;
        self
    }

    /// Set the database file
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn default_character(&self) -> CharacterType {
        self.default_character
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_PREFIX.to_string(),
            default_character: CharacterType::default(),
            db_path: None,
        }
    }
}
