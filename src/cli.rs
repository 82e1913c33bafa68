use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use windrose::{
    parse_timestamp, Binning, DateRange, DirectionStyle, LocalTimeWindow, MeasurementHeight,
    PlotSettings, QuantileSet, Query, RunOptions, WindRose, WindRoseError, WindSpeedUnit,
    ARCHIVE_URL, DEFAULT_BIN_COUNT, DEFAULT_BIN_WIDTH, DEFAULT_CAP, DEFAULT_HEIGHT,
    DEFAULT_LOCATION,
};

/// Plot historic wind direction and speed distributions for a known site.
#[derive(Debug, Parser)]
#[command(name = "windrose", version, about)]
pub struct Cli {
    /// Site key: joekaaru, kurmi, laane or neitsi
    #[arg(env = "WINDROSE_LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Measurement height, e.g. 10m or 100m
    #[arg(env = "WINDROSE_HEIGHT", default_value = DEFAULT_HEIGHT)]
    pub height: String,

    /// First day (YYYY-MM-DD); defaults to a year before --end
    #[arg(long, env = "WINDROSE_START", requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD); defaults to two days ago
    #[arg(long, env = "WINDROSE_END", requires = "start")]
    pub end: Option<NaiveDate>,

    #[arg(long, env = "WINDROSE_UNIT", value_enum, default_value = "ms")]
    pub unit: UnitArg,

    /// Prefix for every file written by this run
    #[arg(long, env = "WINDROSE_RUN_ID")]
    pub run_id: Option<String>,

    /// Keep the raw archive responses in --data-dir
    #[arg(long, env = "WINDROSE_SAVE_RAW")]
    pub save_raw: bool,

    /// Parse responses saved by an earlier --save-raw run instead of downloading
    #[arg(long, env = "WINDROSE_REUSE_RAW")]
    pub reuse_raw: bool,

    #[arg(long, env = "WINDROSE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "WINDROSE_PLOT_DIR", default_value = "plots")]
    pub plot_dir: PathBuf,

    #[arg(long, env = "WINDROSE_DIRECTION_STYLE", value_enum, default_value = "rose")]
    pub direction_style: StyleArg,

    /// Show direction bins as percent of all samples
    #[arg(long, env = "WINDROSE_NORMALIZE")]
    pub normalize: bool,

    /// Number of equal-width speed bins over the observed range
    #[arg(long, env = "WINDROSE_SPEED_BINS", default_value_t = DEFAULT_BIN_COUNT)]
    pub speed_bins: usize,

    /// Fixed speed bin width; switches to capped binning
    #[arg(long, env = "WINDROSE_SPEED_BIN_WIDTH")]
    pub speed_bin_width: Option<f64>,

    /// Upper end of the speed axis; switches to capped binning
    #[arg(long, env = "WINDROSE_SPEED_CAP")]
    pub speed_cap: Option<f64>,

    #[arg(long, env = "WINDROSE_QUANTILES", value_enum, default_value = "five")]
    pub quantiles: QuantilesArg,

    /// Draw every quantile line dashed black
    #[arg(long, env = "WINDROSE_NO_EDGE_EMPHASIS")]
    pub no_edge_emphasis: bool,

    /// Local start of the sample window (YYYY-MM-DDTHH:MM)
    #[arg(long, env = "WINDROSE_WINDOW_START", value_parser = parse_timestamp, requires = "window_end")]
    pub window_start: Option<NaiveDateTime>,

    /// Local end of the sample window, inclusive (YYYY-MM-DDTHH:MM)
    #[arg(long, env = "WINDROSE_WINDOW_END", value_parser = parse_timestamp, requires = "window_start")]
    pub window_end: Option<NaiveDateTime>,

    /// UTC offset of the window times
    #[arg(long, env = "WINDROSE_UTC_OFFSET_HOURS", default_value_t = 2, allow_negative_numbers = true)]
    pub utc_offset_hours: i32,

    /// Open the charts in the system image viewer
    #[arg(long, env = "WINDROSE_SHOW")]
    pub show: bool,

    #[arg(long, env = "WINDROSE_BASE_URL", default_value = ARCHIVE_URL)]
    pub base_url: String,

    /// TrueType font for chart text
    #[arg(long, env = "WINDROSE_FONT")]
    pub font: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    Ms,
    Kmh,
    Mph,
    Kn,
}

impl From<UnitArg> for WindSpeedUnit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Ms => WindSpeedUnit::Ms,
            UnitArg::Kmh => WindSpeedUnit::Kmh,
            UnitArg::Mph => WindSpeedUnit::Mph,
            UnitArg::Kn => WindSpeedUnit::Kn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Rose,
    Bar,
}

impl From<StyleArg> for DirectionStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Rose => DirectionStyle::Rose,
            StyleArg::Bar => DirectionStyle::Bar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuantilesArg {
    Five,
    Three,
}

impl From<QuantilesArg> for QuantileSet {
    fn from(value: QuantilesArg) -> Self {
        match value {
            QuantilesArg::Five => QuantileSet::Five,
            QuantilesArg::Three => QuantileSet::Three,
        }
    }
}

impl Cli {
    pub fn range(&self, today: NaiveDate) -> Result<DateRange, WindRoseError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            _ => Ok(DateRange::past_year(today)),
        }
    }

    pub fn query(&self, today: NaiveDate) -> Result<Query, WindRoseError> {
        Ok(Query::builder()
            .location(WindRose::resolve_location(&self.location)?)
            .height(MeasurementHeight::new(self.height.clone()))
            .range(self.range(today)?)
            .unit(self.unit.into())
            .build())
    }

    pub fn binning(&self) -> Binning {
        if self.speed_bin_width.is_none() && self.speed_cap.is_none() {
            return Binning::Count(self.speed_bins);
        }
        Binning::Capped {
            width: self.speed_bin_width.unwrap_or(DEFAULT_BIN_WIDTH),
            cap: self.speed_cap.unwrap_or(DEFAULT_CAP),
        }
    }

    pub fn plot_settings(&self) -> PlotSettings {
        PlotSettings::builder()
            .binning(self.binning())
            .quantiles(self.quantiles.into())
            .edge_emphasis(!self.no_edge_emphasis)
            .normalize(self.normalize)
            .direction_style(self.direction_style.into())
            .build()
    }

    pub fn run_options(&self) -> Result<RunOptions, WindRoseError> {
        let window = match (self.window_start, self.window_end) {
            (Some(start), Some(end)) => {
                Some(LocalTimeWindow::new(start, end, self.utc_offset_hours)?)
            }
            _ => None,
        };
        Ok(RunOptions::builder()
            .plot_dir(self.plot_dir.clone())
            .data_dir(self.data_dir.clone())
            .maybe_run_id(self.run_id.clone())
            .save_raw(self.save_raw)
            .reuse_raw(self.reuse_raw)
            .show(self.show)
            .maybe_window(window)
            .build())
    }
}
