//! Defines the hourly wind variables requested from the archive, the measurement
//! height they are reported at, and the wind speed unit.

use std::fmt;

/// Height used when none is given on the command line.
pub const DEFAULT_HEIGHT: &str = "100m";

/// Altitude above ground of the wind measurement, e.g. `"100m"`.
///
/// The string is embedded into the variable name as-is; the server decides
/// whether it is supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeasurementHeight(pub String);

impl MeasurementHeight {
    pub fn new(height: impl Into<String>) -> Self {
        Self(height.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MeasurementHeight {
    fn default() -> Self {
        Self(DEFAULT_HEIGHT.to_string())
    }
}

impl fmt::Display for MeasurementHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The unit the archive should report wind speeds in (`windspeed_unit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindSpeedUnit {
    /// Metres per second.
    #[default]
    Ms,
    /// Kilometres per hour.
    Kmh,
    /// Miles per hour.
    Mph,
    /// Knots.
    Kn,
}

impl WindSpeedUnit {
    /// Value of the `windspeed_unit` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            WindSpeedUnit::Ms => "ms",
            WindSpeedUnit::Kmh => "kmh",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kn => "kn",
        }
    }

    /// Unit as printed in axis labels.
    pub fn symbol(self) -> &'static str {
        match self {
            WindSpeedUnit::Ms => "m/s",
            WindSpeedUnit::Kmh => "km/h",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kn => "kn",
        }
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

/// One of the two hourly variables this crate plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindVariable {
    /// Direction the wind blows from, in degrees.
    Direction,
    /// Wind speed in the requested [`WindSpeedUnit`].
    Speed,
}

impl WindVariable {
    /// Category key of the variable in the request and the response body.
    pub const CATEGORY: &'static str = "hourly";

    /// Variable name as understood by the archive, e.g. `wind_speed_100m`.
    pub fn api_name(self, height: &MeasurementHeight) -> String {
        match self {
            WindVariable::Direction => format!("wind_direction_{}", height),
            WindVariable::Speed => format!("wind_speed_{}", height),
        }
    }

    /// Human readable label used for plot titles and axes.
    pub fn label(self, height: &MeasurementHeight, unit: WindSpeedUnit) -> String {
        match self {
            WindVariable::Direction => {
                format!("Hourly Wind Direction at {} (degrees)", height)
            }
            WindVariable::Speed => {
                format!("Hourly Wind Speed at {} ({})", height, unit.symbol())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_names_embed_height() {
        let height = MeasurementHeight::new("10m");
        assert_eq!(WindVariable::Direction.api_name(&height), "wind_direction_10m");
        assert_eq!(WindVariable::Speed.api_name(&height), "wind_speed_10m");
        assert_eq!(
            WindVariable::Speed.api_name(&MeasurementHeight::default()),
            "wind_speed_100m"
        );
    }

    #[test]
    fn test_labels() {
        let height = MeasurementHeight::default();
        assert_eq!(
            WindVariable::Direction.label(&height, WindSpeedUnit::Kn),
            "Hourly Wind Direction at 100m (degrees)"
        );
        assert_eq!(
            WindVariable::Speed.label(&height, WindSpeedUnit::Ms),
            "Hourly Wind Speed at 100m (m/s)"
        );
        assert_eq!(
            WindVariable::Speed.label(&height, WindSpeedUnit::Kmh),
            "Hourly Wind Speed at 100m (km/h)"
        );
    }

    #[test]
    fn test_unit_query_values() {
        assert_eq!(WindSpeedUnit::default().query_value(), "ms");
        assert_eq!(WindSpeedUnit::Mph.to_string(), "mph");
        assert_eq!(WindSpeedUnit::Kn.query_value(), "kn");
    }
}
