use crate::error::WindRoseError;
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Days between "today" and the last day requested from the archive.
/// The archive lags real time by a couple of days.
pub const ARCHIVE_LAG_DAYS: i64 = 2;

/// Inclusive pair of calendar dates sent as `start_date`/`end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindRoseError> {
        if start > end {
            return Err(WindRoseError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The 365 days ending [`ARCHIVE_LAG_DAYS`] before `today`.
    pub fn past_year(today: NaiveDate) -> Self {
        let end = today - Duration::days(ARCHIVE_LAG_DAYS);
        let start = end - Duration::days(365);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}
