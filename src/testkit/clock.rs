//! Settable wall clock.

use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;

use crate::port::Clock;

/// Clock that reports whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock at `hour:minute` on the given calendar day.
    ///
    /// Panics on an invalid date; test helper only.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self::new(datetime(year, month, day, hour, minute))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Move to midday on another calendar day.
    pub fn set_date(&self, year: i32, month: u32, day: u32) {
        self.set(datetime(year, month, day, 12, 0));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid test date")
}
