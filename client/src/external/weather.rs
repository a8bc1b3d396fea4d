//! Weather API client
//!
//! Fetches current weather and ocean conditions from the hazard API's
//! `/api/weather` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::models::WeatherSnapshot;
use shared::types::Coordinate;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::services::ports::WeatherSource;

use super::{http_client, normalize_base_url};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: http_client(Duration::from_secs(config.request_timeout_secs), None),
            base_url: normalize_base_url(&config.base_url),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    pub(crate) fn weather_url(&self, at: Coordinate) -> String {
        format!(
            "{}/api/weather?lat={}&lon={}",
            self.base_url, at.latitude, at.longitude
        )
    }

    /// Fetch current conditions for a coordinate
    pub async fn get_current_weather(&self, at: Coordinate) -> ClientResult<WeatherSnapshot> {
        let url = self.weather_url(at);
        tracing::debug!(%url, "Fetching weather");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: format!("Weather service temporarily unavailable: {}", body),
            });
        }

        response.json().await.map_err(|e| ClientError::Decode {
            what: "weather response",
            reason: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl WeatherSource for WeatherClient {
    async fn current_weather(&self, at: Coordinate) -> ClientResult<WeatherSnapshot> {
        self.get_current_weather(at).await
    }
}
