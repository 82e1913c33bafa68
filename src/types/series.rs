//! Contains [`HourlySeries`], the index-aligned timestamp/value pair returned by the archive.

use crate::archive::error::ArchiveError;
use crate::error::WindRoseError;
use crate::filtering::WindFrameFilterExt;
use crate::types::time_window::LocalTimeWindow;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

pub(crate) const DATETIME_COLUMN: &str = "datetime";
pub(crate) const VALUE_COLUMN: &str = "value";

/// Hourly samples of one variable.
///
/// `times` and `values` always have the same length and index `i` of one
/// belongs to index `i` of the other. Hours the archive has no value for are
/// kept as `None`, so the alignment with the raw response is never lost.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    variable: String,
    times: Vec<NaiveDateTime>,
    values: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn new(
        variable: impl Into<String>,
        times: Vec<NaiveDateTime>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, ArchiveError> {
        if times.len() != values.len() {
            return Err(ArchiveError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            variable: variable.into(),
            times,
            values,
        })
    }

    /// Archive name of the variable, e.g. `wind_speed_100m`.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// UTC timestamps.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Values with missing hours dropped, in order.
    pub fn present_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Builds a `LazyFrame` with a `datetime` and a `value` column.
    pub fn to_lazy_frame(&self) -> PolarsResult<LazyFrame> {
        let df = DataFrame::new(vec![
            Column::new(DATETIME_COLUMN.into(), &self.times),
            Column::new(VALUE_COLUMN.into(), &self.values),
        ])?;
        Ok(df.lazy())
    }

    /// Reads a frame produced by [`HourlySeries::to_lazy_frame`] back into a series.
    pub fn from_frame(variable: impl Into<String>, frame: LazyFrame) -> Result<Self, WindRoseError> {
        let df = frame
            .select([
                col(DATETIME_COLUMN).cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
                col(VALUE_COLUMN),
            ])
            .collect()?;

        let times = df
            .column(DATETIME_COLUMN)?
            .datetime()?
            .into_iter()
            .map(|ms| {
                ms.and_then(ms_to_datetime).ok_or_else(|| {
                    PolarsError::ComputeError("null or out of range datetime in wind frame".into())
                })
            })
            .collect::<PolarsResult<Vec<_>>>()?;
        let values = df.column(VALUE_COLUMN)?.f64()?.into_iter().collect();

        Ok(Self::new(variable, times, values)?)
    }

    /// Keeps only samples whose timestamp falls inside `window`, preserving order.
    pub fn filter_window(&self, window: &LocalTimeWindow) -> Result<Self, WindRoseError> {
        let frame = self.to_lazy_frame()?.filter_local_window(window);
        Self::from_frame(self.variable.clone(), frame)
    }
}

fn ms_to_datetime(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}
