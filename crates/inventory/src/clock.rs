//! Source of the "last updated" date stamped on items.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

/// Provides the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A settable clock for tests and replays.
///
/// Clones share the same date, so a test can keep one handle and move the
/// other into a store.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(today)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        match self.today.lock() {
            Ok(mut guard) => *guard = date,
            Err(poisoned) => *poisoned.into_inner() = date,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.today.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
