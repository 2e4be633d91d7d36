//! Calendar days
//!
//! "Today" is the local device date. The clock is injected so tests and
//! demos can pin or advance it.

use chrono::{Local, NaiveDate};
use std::sync::RwLock;

/// Source of the current calendar day
pub trait DayClock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local device date
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl DayClock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that stays on a chosen day until moved
#[derive(Debug)]
pub struct FixedClock {
    day: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: RwLock::new(day),
        }
    }

    /// Create from a `YYYY-MM-DD` key
    pub fn from_key(key: &str) -> Option<Self> {
        parse_date_key(key).map(Self::new)
    }

    /// Move to another day
    pub fn set(&self, day: NaiveDate) {
        if let Ok(mut guard) = self.day.write() {
            *guard = day;
        }
    }

    /// Move forward (or back, for negative values) by whole days
    pub fn advance_days(&self, days: i64) {
        if let Ok(mut guard) = self.day.write() {
            if let Some(next) = guard.checked_add_signed(chrono::Duration::days(days)) {
                *guard = next;
            }
        }
    }
}

impl DayClock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.day.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// ISO `YYYY-MM-DD` key for a day
pub fn date_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse an ISO `YYYY-MM-DD` key
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}
