//! Mission records and edits

use crate::{Error, MissionId, Rejection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed mission categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionCategory {
    Morning,
    Daytime,
    Evening,
    Study,
    Health,
}

impl MissionCategory {
    /// All categories in display order
    pub const ALL: [MissionCategory; 5] = [
        MissionCategory::Morning,
        MissionCategory::Daytime,
        MissionCategory::Evening,
        MissionCategory::Study,
        MissionCategory::Health,
    ];

    /// Stable identifier used in persisted data
    pub const fn as_str(&self) -> &'static str {
        match self {
            MissionCategory::Morning => "morning",
            MissionCategory::Daytime => "daytime",
            MissionCategory::Evening => "evening",
            MissionCategory::Study => "study",
            MissionCategory::Health => "health",
        }
    }

    /// Human-readable label shown on section headers
    pub const fn label(&self) -> &'static str {
        match self {
            MissionCategory::Morning => "Morning Routine",
            MissionCategory::Daytime => "Daytime",
            MissionCategory::Evening => "Evening Routine",
            MissionCategory::Study => "Study Time",
            MissionCategory::Health => "Healthy Habits",
        }
    }
}

impl fmt::Display for MissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidMissionCategory(s.to_string()))
    }
}

/// A daily mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: MissionCategory,
    /// Countdown length in seconds (0 = no timer)
    #[serde(default)]
    pub timer_seconds: u32,
    /// Stars granted on completion (always > 0)
    pub star_reward: u32,
    /// What the pet says when the mission starts
    #[serde(default)]
    pub fairy_message_start: String,
    /// What the pet says when the mission is done
    #[serde(default)]
    pub fairy_message_complete: String,
    pub is_preset: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub sort_order: i32,
}

fn default_active() -> bool {
    true
}

impl Mission {
    /// Build a mission from a user draft
    pub fn from_draft(id: MissionId, draft: MissionDraft, sort_order: i32) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            description: draft.description,
            icon: draft.icon,
            category: draft.category,
            timer_seconds: draft.timer_seconds,
            star_reward: draft.star_reward,
            fairy_message_start: draft.fairy_message_start,
            fairy_message_complete: draft.fairy_message_complete,
            is_preset: false,
            is_active: true,
            sort_order,
        }
    }

    /// Merge an edit into this mission
    ///
    /// `id`, `is_preset` and `sort_order` are not reachable through a patch.
    pub fn apply(&mut self, patch: MissionPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(timer_seconds) = patch.timer_seconds {
            self.timer_seconds = timer_seconds;
        }
        if let Some(star_reward) = patch.star_reward {
            self.star_reward = star_reward;
        }
        if let Some(message) = patch.fairy_message_start {
            self.fairy_message_start = message;
        }
        if let Some(message) = patch.fairy_message_complete {
            self.fairy_message_complete = message;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

/// Partial edit of a mission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<MissionCategory>,
    pub timer_seconds: Option<u32>,
    pub star_reward: Option<u32>,
    pub fairy_message_start: Option<String>,
    pub fairy_message_complete: Option<String>,
    pub is_active: Option<bool>,
}

impl MissionPatch {
    /// Patch that only renames
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the reward
    pub fn reward(star_reward: u32) -> Self {
        Self {
            star_reward: Some(star_reward),
            ..Self::default()
        }
    }

    /// Check the patch keeps the mission invariants
    pub fn validate(&self) -> Result<(), Rejection> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(Rejection::EmptyName);
        }
        if self.star_reward == Some(0) {
            return Err(Rejection::InvalidStarReward);
        }
        Ok(())
    }
}

impl From<&Mission> for MissionPatch {
    /// A patch carrying every editable field of `mission`
    fn from(mission: &Mission) -> Self {
        MissionPatch {
            name: Some(mission.name.clone()),
            description: Some(mission.description.clone()),
            icon: Some(mission.icon.clone()),
            category: Some(mission.category),
            timer_seconds: Some(mission.timer_seconds),
            star_reward: Some(mission.star_reward).filter(|r| *r > 0),
            fairy_message_start: Some(mission.fairy_message_start.clone()),
            fairy_message_complete: Some(mission.fairy_message_complete.clone()),
            is_active: Some(mission.is_active),
        }
    }
}

/// Fields a child (or parent) fills in when creating a mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: MissionCategory,
    #[serde(default)]
    pub timer_seconds: u32,
    pub star_reward: u32,
    #[serde(default)]
    pub fairy_message_start: String,
    #[serde(default)]
    pub fairy_message_complete: String,
}

impl MissionDraft {
    /// Create a draft with the required fields
    pub fn new(name: impl Into<String>, category: MissionCategory, star_reward: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            category,
            timer_seconds: 0,
            star_reward,
            fairy_message_start: String::new(),
            fairy_message_complete: String::new(),
        }
    }

    /// Check the draft describes a valid mission
    pub fn validate(&self) -> Result<(), Rejection> {
        if self.name.trim().is_empty() {
            return Err(Rejection::EmptyName);
        }
        if self.star_reward == 0 {
            return Err(Rejection::InvalidStarReward);
        }
        Ok(())
    }
}
