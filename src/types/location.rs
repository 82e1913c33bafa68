//! Named measurement sites and their coordinates.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use windrose::LatLon;
///
/// let kurmi = LatLon(58.207889, 25.140305);
/// assert_eq!(kurmi.0, 58.207889); // Latitude
/// assert_eq!(kurmi.1, 25.140305); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }
}

/// A named site from [`KNOWN_LOCATIONS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub lat_lon: LatLon,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.6}, {:.6})", self.name, self.lat_lon.0, self.lat_lon.1)
    }
}

/// Key used when no location is given on the command line.
pub const DEFAULT_LOCATION: &str = "joekaaru";

/// The fixed table of measurement sites.
pub const KNOWN_LOCATIONS: [Location; 4] = [
    // 58°12'49.2"N 25°12'03.1"E
    Location {
        name: "joekaaru",
        lat_lon: LatLon(58.213667, 25.200861),
    },
    // 58°12'28.4"N 25°08'17.9"E
    Location {
        name: "kurmi",
        lat_lon: LatLon(58.207889, 25.140305),
    },
    // 58°13'42.3"N 25°13'35.0"E
    Location {
        name: "laane",
        lat_lon: LatLon(58.228417, 25.226389),
    },
    // 58°09'22.5"N 25°08'29.1"E
    Location {
        name: "neitsi",
        lat_lon: LatLon(58.15625, 25.141416),
    },
];

impl Location {
    /// Looks up a site by its key. Matching is exact.
    pub fn find(name: &str) -> Option<Location> {
        KNOWN_LOCATIONS.iter().copied().find(|l| l.name == name)
    }

    pub fn known_names() -> Vec<&'static str> {
        KNOWN_LOCATIONS.iter().map(|l| l.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_location() {
        let location = Location::find("laane").expect("laane is in the table");
        assert_eq!(location.lat_lon, LatLon(58.228417, 25.226389));
    }

    #[test]
    fn test_default_location_is_known() {
        assert!(Location::find(DEFAULT_LOCATION).is_some());
    }

    #[test]
    fn test_unknown_location() {
        assert!(Location::find("tallinn").is_none());
        assert!(Location::find("Kurmi").is_none());
    }

    #[test]
    fn test_known_names_order() {
        assert_eq!(
            Location::known_names(),
            vec!["joekaaru", "kurmi", "laane", "neitsi"]
        );
    }
}
