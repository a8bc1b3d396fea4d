//! Device position and place-name lookups

use shared::models::PlaceMatch;
use shared::sequence::RequestSequencer;
use shared::types::Coordinate;

use super::ports::{GeolocationError, Geocoder, Geolocator, PositionOptions};
use crate::error::ClientResult;

/// Device geolocation restricted to the coastal area
pub struct DeviceLocation<L: Geolocator> {
    locator: L,
    options: PositionOptions,
}

impl<L: Geolocator> DeviceLocation<L> {
    pub fn new(locator: L, options: PositionOptions) -> Self {
        Self { locator, options }
    }

    /// Current position, rejected when it lies off the coast
    pub async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        let position = self.locator.current_position(self.options).await?;
        if !position.is_near_indian_coast() {
            tracing::info!(
                lat = position.latitude,
                lon = position.longitude,
                "Device position outside coastal area"
            );
            return Err(GeolocationError::OutsideCoastalArea);
        }
        Ok(position)
    }
}

/// Forward search and reverse naming over a [`Geocoder`]
pub struct PlaceLookup<G: Geocoder> {
    geocoder: G,
    reverse_sequencer: RequestSequencer,
}

/// A search hit resolved to a coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPlace {
    pub coordinate: Coordinate,
    pub name: String,
}

impl<G: Geocoder> PlaceLookup<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            reverse_sequencer: RequestSequencer::new(),
        }
    }

    /// Name of the place at `at`.
    ///
    /// `None` on failure, on an empty result, or when a newer lookup has
    /// been issued since.
    pub async fn location_name(&self, at: Coordinate) -> Option<String> {
        let ticket = self.reverse_sequencer.issue();
        let result = self.geocoder.reverse(at).await;
        if !self.reverse_sequencer.is_current(ticket) {
            return None;
        }
        match result {
            Ok(place) => place.location_name(),
            Err(e) => {
                tracing::error!("Reverse geocoding error: {}", e);
                None
            }
        }
    }

    /// First match for `query`, skipping hits with unusable coordinates
    pub async fn search(&self, query: &str) -> ClientResult<Option<FoundPlace>> {
        let hit = self.geocoder.search(query).await?;
        Ok(hit.as_ref().and_then(resolve))
    }

    pub fn invalidate(&self) {
        self.reverse_sequencer.invalidate();
    }
}

fn resolve(place: &PlaceMatch) -> Option<FoundPlace> {
    Some(FoundPlace {
        coordinate: place.coordinate()?,
        name: place.short_name(),
    })
}
