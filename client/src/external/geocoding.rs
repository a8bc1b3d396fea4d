//! Nominatim geocoding client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::models::{PlaceMatch, ReversePlace};
use shared::types::Coordinate;

use crate::config::GeocodingConfig;
use crate::error::{ClientError, ClientResult};
use crate::services::ports::Geocoder;

use super::{http_client, normalize_base_url};

/// Client for the OpenStreetMap Nominatim search and reverse endpoints
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    country_codes: String,
}

impl NominatimClient {
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: http_client(Duration::from_secs(15), Some(&config.user_agent)),
            base_url: normalize_base_url(&config.base_url),
            country_codes: config.country_codes.clone(),
        }
    }

    /// First match for `query`, restricted to the configured countries
    pub async fn search_place(&self, query: &str) -> ClientResult<Option<PlaceMatch>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", "1"),
                ("countrycodes", self.country_codes.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Api {
                status: response.status().as_u16(),
                message: "Error searching location. Please try again.".to_string(),
            });
        }

        let places: Vec<PlaceMatch> = response.json().await.map_err(|e| ClientError::Decode {
            what: "search results",
            reason: e.to_string(),
        })?;
        Ok(places.into_iter().next())
    }

    pub(crate) fn reverse_url(&self, at: Coordinate) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&addressdetails=1",
            self.base_url, at.latitude, at.longitude
        )
    }

    /// Address details for a coordinate
    pub async fn reverse_lookup(&self, at: Coordinate) -> ClientResult<ReversePlace> {
        let response = self.client.get(self.reverse_url(at)).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Api {
                status: response.status().as_u16(),
                message: "Reverse geocoding failed".to_string(),
            });
        }

        response.json().await.map_err(|e| ClientError::Decode {
            what: "reverse geocoding response",
            reason: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> ClientResult<Option<PlaceMatch>> {
        self.search_place(query).await
    }

    async fn reverse(&self, at: Coordinate) -> ClientResult<ReversePlace> {
        self.reverse_lookup(at).await
    }
}
