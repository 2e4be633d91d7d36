//! Database models for persistent storage.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One key-value record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredItem {
    /// Primary key - full (namespaced) storage key.
    #[primary_key]
    pub key: String,
    /// Raw stored text.
    pub value: String,
}

impl StoredItem {
    /// Create a record.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
