//! Current-date collaborator.

use chrono::NaiveDate;

/// Source of "today" for age computations.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date (tests, batch re-runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for FixedClock {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
