mod analysis;
mod archive;
mod error;
mod filtering;
mod plotting;
mod settings;
mod types;
mod utils;
mod windrose;

pub use error::WindRoseError;
pub use windrose::*;

pub use settings::{DirectionStyle, PlotSettings, RunOptions};

pub use types::date_range::{DateRange, ARCHIVE_LAG_DAYS};
pub use types::location::{LatLon, Location, DEFAULT_LOCATION, KNOWN_LOCATIONS};
pub use types::series::HourlySeries;
pub use types::time_window::{parse_timestamp, LocalTimeWindow};
pub use types::variable::{MeasurementHeight, WindSpeedUnit, WindVariable, DEFAULT_HEIGHT};

pub use analysis::direction::{
    bin_edges, direction_bin, DirectionHistogram, COMPASS_16, COMPASS_8, DIRECTION_BINS,
};
pub use analysis::quantiles::{
    quantile_sorted, summarize, Quantile, QuantileSet, MIN_QUANTILE_SAMPLES,
};
pub use analysis::speed::{
    Binning, BinningError, SpeedBin, SpeedHistogram, DEFAULT_BIN_COUNT, DEFAULT_BIN_WIDTH,
    DEFAULT_CAP, MAX_BINS,
};

pub use archive::error::ArchiveError;
pub use archive::loader::{ArchiveLoader, ArchiveRequest, ARCHIVE_URL};
pub use archive::response::parse_hourly;

pub use filtering::WindFrameFilterExt;

pub use plotting::direction::render_direction;
pub use plotting::error::PlotError;
pub use plotting::fonts::{ensure_font, FONT_ENV};
pub use plotting::speed::render_speed;
pub use plotting::viewer::show;
