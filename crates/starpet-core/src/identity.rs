//! Identity types for missions and shop items

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a mission (preset or custom)
///
/// String-based so preset ids stay readable in persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    /// Create a new mission ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a user-created mission
    pub fn generate_custom() -> Self {
        Self(format!("custom-{}", uuid::Uuid::new_v4()))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MissionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a shop item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mission_id() {
        let id = MissionId::new("brush_teeth");
        assert_eq!(id.as_str(), "brush_teeth");
        assert_eq!(format!("{}", id), "brush_teeth");
    }

    #[test]
    fn test_generated_custom_ids_are_distinct() {
        let a = MissionId::generate_custom();
        let b = MissionId::generate_custom();
        assert!(a.as_str().starts_with("custom-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ItemId::new("crown")).unwrap();
        assert_eq!(json, "\"crown\"");
    }
}
