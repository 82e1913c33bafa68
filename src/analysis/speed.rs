//! Linear histograms of wind speed.

use thiserror::Error;

/// Bin count used when none is configured.
pub const DEFAULT_BIN_COUNT: usize = 30;
/// Defaults of [`Binning::Capped`].
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;
pub const DEFAULT_CAP: f64 = 20.0;
/// Upper bound on the number of bins either binning may produce.
pub const MAX_BINS: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum BinningError {
    #[error("Bin count must be at least 1")]
    ZeroBins,
    #[error("Bin width must be a positive number, got {0}")]
    InvalidWidth(f64),
    #[error("Cap must be a positive number, got {0}")]
    InvalidCap(f64),
    #[error("Binning would need {0} bins, at most 10000 are allowed")]
    TooManyBins(f64),
}

/// How speed samples are split into bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binning {
    /// This many equal-width bins spanning the observed minimum to maximum.
    Count(usize),
    /// Bins of `width` from 0 up to `cap`. Samples above the cap (or below
    /// zero) stay in the data but are not shown.
    Capped { width: f64, cap: f64 },
}

impl Default for Binning {
    fn default() -> Self {
        Binning::Count(DEFAULT_BIN_COUNT)
    }
}

impl Binning {
    pub fn validate(&self) -> Result<(), BinningError> {
        match *self {
            Binning::Count(0) => Err(BinningError::ZeroBins),
            Binning::Count(n) if n > MAX_BINS => Err(BinningError::TooManyBins(n as f64)),
            Binning::Count(_) => Ok(()),
            Binning::Capped { width, .. } if !(width.is_finite() && width > 0.0) => {
                Err(BinningError::InvalidWidth(width))
            }
            Binning::Capped { cap, .. } if !(cap.is_finite() && cap > 0.0) => {
                Err(BinningError::InvalidCap(cap))
            }
            Binning::Capped { width, cap } if (cap / width).ceil() > MAX_BINS as f64 => {
                Err(BinningError::TooManyBins((cap / width).ceil()))
            }
            Binning::Capped { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedHistogram {
    bins: Vec<SpeedBin>,
    overflow: u64,
}

impl SpeedHistogram {
    /// Bins `values`. Non-finite samples are ignored.
    pub fn new(values: &[f64], binning: Binning) -> Result<Self, BinningError> {
        binning.validate()?;
        let finite = values.iter().copied().filter(|v| v.is_finite());

        let (edges, closed_top) = match binning {
            Binning::Count(n) => {
                let (lo, hi) = observed_range(values);
                let edges = (0..=n)
                    .map(|i| lo + (hi - lo) * i as f64 / n as f64)
                    .collect::<Vec<_>>();
                (edges, hi)
            }
            Binning::Capped { width, cap } => {
                let n = ((cap / width).ceil() as usize).max(1);
                let edges = (0..=n)
                    .map(|i| (i as f64 * width).min(cap))
                    .collect::<Vec<_>>();
                (edges, cap)
            }
        };

        let mut bins: Vec<SpeedBin> = edges
            .windows(2)
            .map(|w| SpeedBin {
                start: w[0],
                end: w[1],
                count: 0,
            })
            .collect();
        let lo = edges[0];
        let mut overflow = 0;

        for value in finite {
            if value < lo || value > closed_top {
                overflow += 1;
                continue;
            }
            // Bins are half open except the last one, which includes its end.
            let index = bins
                .partition_point(|b| b.end <= value)
                .min(bins.len() - 1);
            bins[index].count += 1;
        }

        Ok(Self { bins, overflow })
    }

    pub fn bins(&self) -> &[SpeedBin] {
        &self.bins
    }

    /// Samples outside the binned range.
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Samples inside the binned range.
    pub fn binned(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Visible x range: first bin start to last bin end.
    pub fn x_range(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        }
    }
}

/// Minimum and maximum of the finite samples, widened by 0.5 on each side
/// when they coincide. `(0, 1)` without samples.
fn observed_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}
