//! The [`WindRose`] client: fetches the hourly wind series of one location
//! and turns them into the direction and speed charts.

use crate::analysis::direction::DirectionHistogram;
use crate::analysis::quantiles::{summarize, Quantile};
use crate::analysis::speed::SpeedHistogram;
use crate::archive::loader::{ArchiveLoader, ArchiveRequest};
use crate::error::WindRoseError;
use crate::plotting::direction::render_direction;
use crate::plotting::error::PlotError;
use crate::plotting::speed::render_speed;
use crate::plotting::viewer;
use crate::settings::{PlotSettings, RunOptions};
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::series::HourlySeries;
use crate::types::variable::{MeasurementHeight, WindSpeedUnit, WindVariable};
use crate::utils::{ensure_dir_exists, output_stem, plot_path, raw_path};
use bon::Builder;
use log::{debug, info};
use std::path::PathBuf;

/// What to download: a site, a height, a date range and a speed unit.
///
/// # Examples
///
/// ```
/// use windrose::{DateRange, Query, WindRose};
/// use chrono::NaiveDate;
///
/// let query = Query::builder()
///     .location(WindRose::resolve_location("kurmi").unwrap())
///     .range(DateRange::past_year(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()))
///     .build();
/// assert_eq!(query.height.as_str(), "100m");
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Query {
    pub location: Location,
    #[builder(default)]
    pub height: MeasurementHeight,
    pub range: DateRange,
    #[builder(default)]
    pub unit: WindSpeedUnit,
}

impl Query {
    fn request(&self, variable: WindVariable) -> ArchiveRequest {
        ArchiveRequest {
            lat_lon: self.location.lat_lon,
            range: self.range,
            variable: variable.api_name(&self.height),
            unit: self.unit,
        }
    }
}

/// One written chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput {
    pub variable: WindVariable,
    pub path: PathBuf,
    /// Samples that went into the chart, after filtering and dropping missing hours.
    pub samples: usize,
    /// Only set for the speed chart, and only with enough samples.
    pub quantiles: Option<Vec<Quantile>>,
}

/// Entry point of the library.
///
/// ```no_run
/// # use windrose::{DateRange, PlotSettings, Query, RunOptions, WindRose, WindRoseError};
/// # async fn run() -> Result<(), WindRoseError> {
/// let client = WindRose::new();
/// let query = Query::builder()
///     .location(WindRose::resolve_location("joekaaru")?)
///     .range(DateRange::past_year(chrono::Local::now().date_naive()))
///     .build();
/// let outputs = client
///     .run(&query, &PlotSettings::default(), &RunOptions::default())
///     .await?;
/// for output in outputs {
///     println!("{}", output.path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub struct WindRose {
    loader: ArchiveLoader,
}

impl Default for WindRose {
    fn default() -> Self {
        Self::new()
    }
}

impl WindRose {
    /// Client against the public Open-Meteo archive.
    pub fn new() -> Self {
        Self::with_loader(ArchiveLoader::new())
    }

    /// Client against another archive deployment, e.g. a local mirror.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_loader(ArchiveLoader::with_base_url(base_url))
    }

    pub fn with_loader(loader: ArchiveLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &ArchiveLoader {
        &self.loader
    }

    /// Looks up a site key in the location table.
    ///
    /// # Errors
    ///
    /// Returns [`WindRoseError::UnknownLocation`] listing the valid keys.
    pub fn resolve_location(name: &str) -> Result<Location, WindRoseError> {
        Location::find(name).ok_or_else(|| WindRoseError::UnknownLocation {
            name: name.to_string(),
            known: Location::known_names(),
        })
    }

    /// Downloads (or reloads from the raw dump) one variable and applies the
    /// time window of `options`, if any.
    pub async fn fetch_series(
        &self,
        query: &Query,
        variable: WindVariable,
        options: &RunOptions,
    ) -> Result<HourlySeries, WindRoseError> {
        let request = query.request(variable);
        let stem = output_stem(
            query.location.name,
            &request.variable,
            options.run_id.as_deref(),
        );
        let raw = (options.save_raw || options.reuse_raw).then(|| raw_path(&options.data_dir, &stem));

        let series = self
            .loader
            .fetch()
            .request(&request)
            .maybe_raw_path(raw)
            .reuse_raw(options.reuse_raw)
            .call()
            .await?;

        match &options.window {
            Some(window) => {
                let filtered = series.filter_window(window)?;
                info!(
                    "Kept {} of {} samples of {} inside {}",
                    filtered.len(),
                    series.len(),
                    series.variable(),
                    window
                );
                Ok(filtered)
            }
            None => Ok(series),
        }
    }

    /// Fetches the direction series and writes the direction chart.
    pub async fn plot_direction(
        &self,
        query: &Query,
        settings: &PlotSettings,
        options: &RunOptions,
    ) -> Result<PlotOutput, WindRoseError> {
        let variable = WindVariable::Direction;
        let series = self.fetch_series(query, variable, options).await?;
        let values = present_or_no_data(&series)?;
        let histogram = DirectionHistogram::from_degrees(values.iter().copied());
        debug!("Direction counts: {:?}", histogram.counts());

        let path = prepare_plot_path(query, series.variable(), options).await?;
        let title = variable.label(&query.height, query.unit);
        let target = path.clone();
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || {
            render_direction(&target, &title, &histogram, &settings)
        })
        .await
        .map_err(PlotError::from)??;

        Ok(finish(variable, path, values.len(), None, options))
    }

    /// Fetches the speed series and writes the speed chart with its quantile markers.
    pub async fn plot_speed(
        &self,
        query: &Query,
        settings: &PlotSettings,
        options: &RunOptions,
    ) -> Result<PlotOutput, WindRoseError> {
        let variable = WindVariable::Speed;
        let series = self.fetch_series(query, variable, options).await?;
        let values = present_or_no_data(&series)?;
        let histogram = SpeedHistogram::new(&values, settings.binning).map_err(PlotError::from)?;
        if histogram.overflow() > 0 {
            info!(
                "{} of {} speed samples fall outside the binned range",
                histogram.overflow(),
                values.len()
            );
        }

        let quantiles = summarize(&values, settings.quantiles);
        match &quantiles {
            Some(quantiles) => {
                for q in quantiles {
                    info!(
                        "{} p{}: {:.2} {}",
                        series.variable(),
                        (q.probability * 100.0).round(),
                        q.value,
                        query.unit.symbol()
                    );
                }
            }
            None => info!(
                "Only {} speed samples, quantiles are not drawn",
                values.len()
            ),
        }

        let path = prepare_plot_path(query, series.variable(), options).await?;
        let label = variable.label(&query.height, query.unit);
        let caption = format!("{} Distribution ({})", label, query.range);
        let target = path.clone();
        let settings = settings.clone();
        let drawn = quantiles.clone();
        tokio::task::spawn_blocking(move || {
            render_speed(
                &target,
                &caption,
                &label,
                &histogram,
                drawn.as_deref(),
                &settings,
            )
        })
        .await
        .map_err(PlotError::from)??;

        Ok(finish(variable, path, values.len(), quantiles, options))
    }

    /// Writes both charts, direction first.
    pub async fn run(
        &self,
        query: &Query,
        settings: &PlotSettings,
        options: &RunOptions,
    ) -> Result<Vec<PlotOutput>, WindRoseError> {
        info!(
            "Wind charts for {} at {} from {}",
            query.location, query.height, query.range
        );
        let direction = self.plot_direction(query, settings, options).await?;
        let speed = self.plot_speed(query, settings, options).await?;
        Ok(vec![direction, speed])
    }
}

fn present_or_no_data(series: &HourlySeries) -> Result<Vec<f64>, PlotError> {
    let values = series.present_values();
    if values.is_empty() {
        return Err(PlotError::NoData(series.variable().to_string()));
    }
    if values.len() < series.len() {
        debug!(
            "{} of {} hours of {} have no value",
            series.len() - values.len(),
            series.len(),
            series.variable()
        );
    }
    Ok(values)
}

async fn prepare_plot_path(
    query: &Query,
    variable: &str,
    options: &RunOptions,
) -> Result<PathBuf, PlotError> {
    ensure_dir_exists(&options.plot_dir)
        .await
        .map_err(|e| PlotError::DirCreation(options.plot_dir.clone(), e))?;
    let stem = output_stem(query.location.name, variable, options.run_id.as_deref());
    Ok(plot_path(&options.plot_dir, &stem))
}

fn finish(
    variable: WindVariable,
    path: PathBuf,
    samples: usize,
    quantiles: Option<Vec<Quantile>>,
    options: &RunOptions,
) -> PlotOutput {
    info!("Saved plot to {}", path.display());
    if options.show {
        viewer::show(&path);
    }
    PlotOutput {
        variable,
        path,
        samples,
        quantiles,
    }
}
