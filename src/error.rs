use crate::archive::error::ArchiveError;
use crate::plotting::error::PlotError;
use chrono::{NaiveDate, NaiveDateTime};
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindRoseError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Unknown location '{name}', expected one of: {}", known.join(", "))]
    UnknownLocation { name: String, known: Vec<&'static str> },

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Time window start {start} is after its end {end}")]
    InvalidTimeWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("UTC offset of {0} hours is out of range")]
    InvalidUtcOffset(i32),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
