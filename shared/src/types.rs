//! Common types used across the reporter

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse the pair of latitude/longitude form values.
    ///
    /// Returns `None` when either value is blank or not a finite number.
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let lat = latitude.trim().parse::<f64>().ok()?;
        let lon = longitude.trim().parse::<f64>().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some(Self::new(lat, lon))
    }

    /// Whether this coordinate lies inside the Indian coastal box
    pub fn is_near_indian_coast(&self) -> bool {
        INDIAN_COASTAL_BOUNDS.contains(self)
    }

    /// Latitude as written into the form (six decimals)
    pub fn latitude_field(&self) -> String {
        format!("{:.6}", self.latitude)
    }

    /// Longitude as written into the form (six decimals)
    pub fn longitude_field(&self) -> String {
        format!("{:.6}", self.longitude)
    }
}

/// Axis-aligned latitude/longitude rectangle, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoastalBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CoastalBounds {
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude >= self.min_lat
            && coordinate.latitude <= self.max_lat
            && coordinate.longitude >= self.min_lon
            && coordinate.longitude <= self.max_lon
    }
}

/// Indian coastline including the southern and eastern islands
pub const INDIAN_COASTAL_BOUNDS: CoastalBounds = CoastalBounds {
    min_lat: 6.0,
    max_lat: 25.0,
    min_lon: 68.0,
    max_lon: 98.0,
};

/// Check a raw latitude/longitude pair against [`INDIAN_COASTAL_BOUNDS`]
pub fn is_near_indian_coast(latitude: f64, longitude: f64) -> bool {
    Coordinate::new(latitude, longitude).is_near_indian_coast()
}

/// A map camera position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Whole-country view the map opens with and returns to on reset
pub const DEFAULT_VIEWPORT: MapViewport = MapViewport {
    center: Coordinate {
        latitude: 20.5937,
        longitude: 78.9629,
    },
    zoom: 5,
};

/// Zoom level used after a location has been picked
pub const SELECTED_ZOOM: u8 = 13;

/// Kinds of media a report can carry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type; anything other than `image/*` or `video/*` is `None`
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        if mime_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coast_examples() {
        assert!(is_near_indian_coast(20.0, 80.0));
        assert!(!is_near_indian_coast(0.0, 0.0));
        assert!(is_near_indian_coast(6.0, 68.0));
        assert!(is_near_indian_coast(25.0, 98.0));
        assert!(!is_near_indian_coast(25.01, 80.0));
    }

    #[test]
    fn test_field_formatting() {
        let c = Coordinate::new(13.0, 80.2);
        assert_eq!(c.latitude_field(), "13.000000");
        assert_eq!(c.longitude_field(), "80.200000");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Coordinate::parse(" 13.5 ", "80.25"),
            Some(Coordinate::new(13.5, 80.25))
        );
        assert_eq!(Coordinate::parse("", "80.25"), None);
        assert_eq!(Coordinate::parse("abc", "80.25"), None);
        assert_eq!(Coordinate::parse("NaN", "80.25"), None);
    }

    #[test]
    fn test_media_kind() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_bounds_box_membership(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
            let inside = (6.0..=25.0).contains(&lat) && (68.0..=98.0).contains(&lon);
            prop_assert_eq!(Coordinate::new(lat, lon).is_near_indian_coast(), inside);
        }

        #[test]
        fn prop_field_values_parse_back(lat in 6.0f64..25.0, lon in 68.0f64..98.0) {
            let c = Coordinate::new(lat, lon);
            let parsed = Coordinate::parse(&c.latitude_field(), &c.longitude_field()).unwrap();
            prop_assert!((parsed.latitude - lat).abs() <= 1e-6);
            prop_assert!((parsed.longitude - lon).abs() <= 1e-6);
        }
    }
}
