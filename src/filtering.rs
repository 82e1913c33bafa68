use crate::types::series::DATETIME_COLUMN;
use crate::types::time_window::LocalTimeWindow;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, TimeUnit};

pub trait WindFrameFilterExt {
    /// Filters a wind frame to the rows inside a local-time window (inclusive).
    /// Assumes the 'datetime' column holds naive UTC timestamps.
    ///
    /// # Arguments
    /// * `window`: The local window; its bounds are converted to UTC before comparing.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Row order is preserved.
    fn filter_local_window(self, window: &LocalTimeWindow) -> LazyFrame;
}

fn datetime_ms() -> Expr {
    col(DATETIME_COLUMN).cast(DataType::Datetime(TimeUnit::Milliseconds, None))
}

impl WindFrameFilterExt for LazyFrame {
    fn filter_local_window(self, window: &LocalTimeWindow) -> LazyFrame {
        self.filter(
            datetime_ms()
                .gt_eq(lit(window.utc_start()))
                .and(datetime_ms().lt_eq(lit(window.utc_end()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::series::{HourlySeries, VALUE_COLUMN};
    use crate::types::time_window::parse_timestamp;

    fn series() -> HourlySeries {
        let times = [
            "2024-11-26T13:00",
            "2024-11-26T15:00",
            "2024-11-27T12:00",
            "2024-11-28T00:00",
        ]
        .iter()
        .map(|t| parse_timestamp(t).unwrap())
        .collect();
        HourlySeries::new(
            "wind_direction_100m",
            times,
            vec![Some(10.0), None, Some(190.0), Some(270.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_filter_local_window() -> Result<(), Box<dyn std::error::Error>> {
        let window = LocalTimeWindow::new(
            parse_timestamp("2024-11-26T16:00")?,
            parse_timestamp("2024-11-27T16:00")?,
            2,
        )?;
        let df = series().to_lazy_frame()?.filter_local_window(&window).collect()?;
        assert_eq!(df.height(), 2);
        let values = df.column(VALUE_COLUMN)?.f64()?;
        assert_eq!(values.get(0), None);
        assert_eq!(values.get(1), Some(190.0));
        Ok(())
    }
}
