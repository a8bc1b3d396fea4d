//! Nominatim geocoding payloads

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// One hit from the forward `/search` endpoint.
///
/// Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceMatch {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl PlaceMatch {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(&self.lat, &self.lon)
    }

    /// Leading component of the display name, used as the location name
    pub fn short_name(&self) -> String {
        first_component(&self.display_name)
    }
}

/// Response of the `/reverse` endpoint with `addressdetails=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReversePlace {
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: PlaceAddress,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceAddress {
    pub village: Option<String>,
    pub town: Option<String>,
    pub city: Option<String>,
    pub state_district: Option<String>,
    pub state: Option<String>,
}

impl ReversePlace {
    /// Most specific settlement name available.
    ///
    /// `None` when the lookup found nothing at all.
    pub fn location_name(&self) -> Option<String> {
        let display_name = self.display_name.as_deref().filter(|d| !d.is_empty())?;
        let address = &self.address;
        [
            &address.village,
            &address.town,
            &address.city,
            &address.state_district,
            &address.state,
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .cloned()
        .or_else(|| Some(first_component(display_name)))
    }
}

fn first_component(display_name: &str) -> String {
    display_name
        .split(',')
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_match_coordinate() {
        let place: PlaceMatch = serde_json::from_str(
            r#"{"lat": "13.0827", "lon": "80.2707", "display_name": "Chennai, Tamil Nadu, India"}"#,
        )
        .unwrap();
        assert_eq!(place.coordinate(), Some(Coordinate::new(13.0827, 80.2707)));
        assert_eq!(place.short_name(), "Chennai");
    }

    #[test]
    fn test_location_name_prefers_village() {
        let place: ReversePlace = serde_json::from_str(
            r#"{"display_name": "Kovalam, Chennai, India",
                "address": {"village": "Kovalam", "city": "Chennai", "state": "Tamil Nadu"}}"#,
        )
        .unwrap();
        assert_eq!(place.location_name().as_deref(), Some("Kovalam"));
    }

    #[test]
    fn test_location_name_falls_back_to_state_then_display_name() {
        let place: ReversePlace = serde_json::from_str(
            r#"{"display_name": "Somewhere, Odisha", "address": {"state": "Odisha"}}"#,
        )
        .unwrap();
        assert_eq!(place.location_name().as_deref(), Some("Odisha"));

        let place: ReversePlace =
            serde_json::from_str(r#"{"display_name": "Bay of Bengal, Indian Ocean"}"#).unwrap();
        assert_eq!(place.location_name().as_deref(), Some("Bay of Bengal"));
    }

    #[test]
    fn test_location_name_missing_display_name() {
        let place: ReversePlace =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert_eq!(place.location_name(), None);
    }
}
