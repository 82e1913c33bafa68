//! Binning of wind directions into the 16 compass sectors.

/// Number of angular bins covering the full circle.
pub const DIRECTION_BINS: usize = 16;

/// Angular width of one bin in degrees.
pub const BIN_WIDTH_DEGREES: f64 = 360.0 / DIRECTION_BINS as f64;

/// Names of the 16 bins, starting at north and going clockwise.
pub const COMPASS_16: [&str; DIRECTION_BINS] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// The 8 principal points used as tick labels on the rose.
pub const COMPASS_8: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Index of the bin a direction falls into.
///
/// Degrees are reduced modulo 360 first, so 361° lands in the same bin as 1°.
/// Bin `i` covers `[22.5 i, 22.5 (i + 1))`. Non-finite input has no bin.
pub fn direction_bin(degrees: f64) -> Option<usize> {
    if !degrees.is_finite() {
        return None;
    }
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    Some(((reduced / BIN_WIDTH_DEGREES) as usize).min(DIRECTION_BINS - 1))
}

/// Start and end angle of bin `index`, in degrees.
pub fn bin_edges(index: usize) -> (f64, f64) {
    let start = index as f64 * BIN_WIDTH_DEGREES;
    (start, start + BIN_WIDTH_DEGREES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionHistogram {
    counts: [u64; DIRECTION_BINS],
}

impl DirectionHistogram {
    pub fn from_degrees<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = [0u64; DIRECTION_BINS];
        for bin in values.into_iter().filter_map(direction_bin) {
            counts[bin] += 1;
        }
        Self { counts }
    }

    pub fn counts(&self) -> &[u64; DIRECTION_BINS] {
        &self.counts
    }

    /// Number of binned samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of samples per bin in percent. All zeros for an empty histogram.
    pub fn percentages(&self) -> [f64; DIRECTION_BINS] {
        let total = self.total();
        let mut out = [0.0; DIRECTION_BINS];
        if total == 0 {
            return out;
        }
        for (slot, count) in out.iter_mut().zip(self.counts.iter()) {
            *slot = *count as f64 * 100.0 / total as f64;
        }
        out
    }

    /// Bar heights: raw counts, or percentages when `normalize` is set.
    pub fn heights(&self, normalize: bool) -> [f64; DIRECTION_BINS] {
        if normalize {
            return self.percentages();
        }
        self.counts.map(|c| c as f64)
    }
}
