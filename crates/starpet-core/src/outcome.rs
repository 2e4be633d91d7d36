//! Applied-or-rejected results of mutations
//!
//! Rejections are ordinary results: they come from normal UI races (a stale
//! price, a double tap) and leave the state untouched.

use crate::{ItemId, MissionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a mutation left the state unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("not enough stars: need {needed}, have {available}")]
    InsufficientStars { needed: u32, available: u32 },

    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("item already owned: {0}")]
    AlreadyOwned(ItemId),

    #[error("item not owned: {0}")]
    NotOwned(ItemId),

    #[error("unknown mission: {0}")]
    UnknownMission(MissionId),

    #[error("mission id already in use: {0}")]
    DuplicateMission(MissionId),

    #[error("preset missions cannot be deleted: {0}")]
    PresetNotDeletable(MissionId),

    #[error("mission already completed today: {0}")]
    AlreadyCompletedToday(MissionId),

    #[error("mission name must not be empty")]
    EmptyName,

    #[error("star reward must be positive")]
    InvalidStarReward,
}

/// Result of a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_applied()
    }

    /// The rejection reason, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(reason) => Some(reason),
        }
    }
}

impl From<Result<(), Rejection>> for Outcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Outcome::Applied,
            Err(reason) => Outcome::Rejected(reason),
        }
    }
}
