//! Completion history and streaks

use crate::MissionId;
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Missions completed per calendar day
///
/// Append-only per day: a mission id appears at most once for a given date.
/// Serialized as `{ "YYYY-MM-DD": ["mission_id", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedMap {
    days: BTreeMap<NaiveDate, IndexSet<MissionId>>,
}

impl CompletedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion; returns false if it was already recorded that day
    pub fn mark(&mut self, day: NaiveDate, mission: MissionId) -> bool {
        self.days.entry(day).or_default().insert(mission)
    }

    /// Whether `mission` was completed on `day`
    pub fn is_completed(&self, day: NaiveDate, mission: &MissionId) -> bool {
        self.days.get(&day).is_some_and(|ids| ids.contains(mission))
    }

    /// Missions completed on `day`, in completion order
    pub fn completed_on(&self, day: NaiveDate) -> Vec<MissionId> {
        self.days
            .get(&day)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of missions completed on `day`
    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.days.get(&day).map_or(0, IndexSet::len)
    }

    /// Consecutive days with at least one completion, walking back from `today`
    ///
    /// Today counts only once something is completed. An unbroken chain
    /// ending yesterday still counts while today is empty.
    pub fn streak_days(&self, today: NaiveDate) -> u32 {
        let start = if self.count_on(today) > 0 {
            Some(today)
        } else {
            today.pred_opt()
        };

        let mut streak = 0;
        let mut cursor = start;
        while let Some(day) = cursor {
            if self.count_on(day) == 0 {
                break;
            }
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }

    /// Total completions across every day
    pub fn total_completions(&self) -> usize {
        self.days.values().map(IndexSet::len).sum()
    }

    /// Days that have an entry, oldest first
    pub fn days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(IndexSet::is_empty)
    }
}
