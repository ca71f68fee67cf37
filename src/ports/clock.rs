//! Clock port - Source of "now" and "today".
//!
//! Every day-keyed read and write derives its key through [`Clock::today`],
//! so the one-per-day rule holds only if nothing computes the key any other
//! way.

use crate::domain::foundation::{DayKey, Timestamp};

pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Today's day key (UTC calendar date).
    fn today(&self) -> DayKey {
        DayKey::from_timestamp(&self.now())
    }

    fn is_today(&self, day: DayKey) -> bool {
        self.today() == day
    }
}
