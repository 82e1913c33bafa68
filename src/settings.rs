//! Knobs that used to be spread over several near-identical scripts.

use crate::analysis::quantiles::QuantileSet;
use crate::analysis::speed::Binning;
use crate::types::time_window::LocalTimeWindow;
use bon::Builder;
use std::path::PathBuf;

/// How the direction histogram is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DirectionStyle {
    /// Wedges on a polar grid, north up, clockwise.
    #[default]
    Rose,
    /// Plain bars over the 16 compass points.
    Bar,
}

/// What the plots look like.
///
/// # Examples
///
/// ```
/// use windrose::{Binning, PlotSettings, QuantileSet};
///
/// let settings = PlotSettings::builder()
///     .binning(Binning::Capped { width: 1.0, cap: 20.0 })
///     .quantiles(QuantileSet::Three)
///     .normalize(true)
///     .build();
/// assert!(settings.edge_emphasis);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PlotSettings {
    #[builder(default)]
    pub binning: Binning,
    #[builder(default)]
    pub quantiles: QuantileSet,
    /// Draw the outermost quantiles solid red, the inner ones dashed black.
    #[builder(default = true)]
    pub edge_emphasis: bool,
    /// Direction bars as percent of all samples instead of counts.
    #[builder(default)]
    pub normalize: bool,
    #[builder(default)]
    pub direction_style: DirectionStyle,
    #[builder(default = (1200, 1200))]
    pub direction_size: (u32, u32),
    #[builder(default = (1200, 800))]
    pub speed_size: (u32, u32),
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Where things go and which optional steps run.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct RunOptions {
    #[builder(into, default = PathBuf::from("plots"))]
    pub plot_dir: PathBuf,
    #[builder(into, default = PathBuf::from("data"))]
    pub data_dir: PathBuf,
    /// Prefix for every file this run writes.
    #[builder(into)]
    pub run_id: Option<String>,
    /// Keep the unmodified archive response under `data_dir`.
    #[builder(default)]
    pub save_raw: bool,
    /// Parse a previously saved response instead of downloading.
    #[builder(default)]
    pub reuse_raw: bool,
    /// Open each image in the system viewer once written.
    #[builder(default)]
    pub show: bool,
    /// Only keep samples inside this window.
    pub window: Option<LocalTimeWindow>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
