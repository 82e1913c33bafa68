//! Inclusive local-time windows over UTC timestamps.
//!
//! The archive reports timestamps in UTC. Field experiments are scheduled in
//! local time, so a [`LocalTimeWindow`] keeps its bounds in local time together
//! with the fixed UTC offset, and shifts each UTC timestamp before comparing.

use crate::error::WindRoseError;
use chrono::{Duration, FixedOffset, NaiveDateTime, ParseError};
use std::fmt;

const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";
const TIMESTAMP_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses an ISO-8601 timestamp without offset, with or without seconds.
///
/// The archive emits `2024-11-26T15:00`; seconds are accepted as well.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_MINUTES)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_SECONDS))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeWindow {
    utc_offset: FixedOffset,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl LocalTimeWindow {
    /// Creates a window from local bounds (inclusive) and the local offset to UTC in hours.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        utc_offset_hours: i32,
    ) -> Result<Self, WindRoseError> {
        let utc_offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(WindRoseError::InvalidUtcOffset(utc_offset_hours))?;
        if start > end {
            return Err(WindRoseError::InvalidTimeWindow { start, end });
        }
        Ok(Self {
            utc_offset,
            start,
            end,
        })
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn local_start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn local_end(&self) -> NaiveDateTime {
        self.end
    }

    fn offset(&self) -> Duration {
        Duration::seconds(i64::from(self.utc_offset.local_minus_utc()))
    }

    /// Lower bound expressed in UTC.
    pub fn utc_start(&self) -> NaiveDateTime {
        self.start - self.offset()
    }

    /// Upper bound expressed in UTC.
    pub fn utc_end(&self) -> NaiveDateTime {
        self.end - self.offset()
    }

    /// Whether a UTC timestamp falls inside the window once shifted to local time.
    pub fn contains(&self, utc_timestamp: NaiveDateTime) -> bool {
        let local = utc_timestamp + self.offset();
        self.start <= local && local <= self.end
    }
}

impl fmt::Display for LocalTimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ..= {} (UTC{})",
            self.start.format(TIMESTAMP_FORMAT_MINUTES),
            self.end.format(TIMESTAMP_FORMAT_MINUTES),
            self.utc_offset
        )
    }
}
