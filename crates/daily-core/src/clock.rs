// # Clock
//
// The record store never asks the operating system for the date directly.
// It goes through a `Clock`, so the day boundary can be pinned to local
// time or UTC, and tests can move the calendar by hand.

use std::sync::{Arc, Mutex};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Source of "today" for the record store
///
/// Implementations must be cheap and safe to call concurrently; the store
/// asks for the date on every read and merge.
pub trait Clock: Send + Sync {
    /// The current calendar day
    fn today(&self) -> NaiveDate;
}

/// Wall clock, with the day boundary taken in local time or in UTC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemClock {
    /// Day rolls over at local midnight
    #[default]
    Local,
    /// Day rolls over at UTC midnight
    Utc,
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self {
            SystemClock::Local => chrono::Local::now().date_naive(),
            SystemClock::Utc => chrono::Utc::now().date_naive(),
        }
    }
}

/// A clock that only moves when told to
///
/// Clones share the same underlying date, so a test can hand one clone to
/// a store and keep another to advance the calendar.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use daily_core::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let handle = clock.clone();
///
/// handle.advance_days(1);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    /// Create a clock fixed on `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(date)),
        }
    }

    /// Jump to an arbitrary date
    pub fn set(&self, date: NaiveDate) {
        *self.lock() = date;
    }

    /// Move the calendar forward by `days`
    pub fn advance_days(&self, days: u64) {
        let mut guard = self.lock();
        if let Some(next) = guard.checked_add_days(Days::new(days)) {
            *guard = next;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDate> {
        // A poisoned date is still a valid date
        self.today.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.lock()
    }
}
