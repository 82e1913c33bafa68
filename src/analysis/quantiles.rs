//! Quantile summaries of speed samples.

/// Quantiles are only drawn when there are strictly more samples than this.
pub const MIN_QUANTILE_SAMPLES: usize = 100;

/// Which quantiles are marked on the speed histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantileSet {
    /// 5th, 20th, 50th, 80th and 95th percentile.
    #[default]
    Five,
    /// Quartiles: 25th, 50th and 75th percentile.
    Three,
}

impl QuantileSet {
    pub fn probabilities(self) -> &'static [f64] {
        match self {
            QuantileSet::Five => &[0.05, 0.20, 0.50, 0.80, 0.95],
            QuantileSet::Three => &[0.25, 0.50, 0.75],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    pub probability: f64,
    pub value: f64,
}

/// Quantile of already sorted data with linear interpolation between the two
/// closest ranks (the NumPy default). `probability` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], probability: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let h = last as f64 * probability.clamp(0.0, 1.0);
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = h - lower as f64;
    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Computes the quantiles of `set` over `values`, ignoring non-finite samples.
///
/// Returns `None` unless there are more than [`MIN_QUANTILE_SAMPLES`] samples.
pub fn summarize(values: &[f64], set: QuantileSet) -> Option<Vec<Quantile>> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.len() <= MIN_QUANTILE_SAMPLES {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    set.probabilities()
        .iter()
        .map(|&probability| {
            quantile_sorted(&sorted, probability).map(|value| Quantile { probability, value })
        })
        .collect()
}
