//! Configuration for the hazard report client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (the production endpoints)
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides (`HAZARD__API__BASE_URL` and so on)

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Report and weather API
    pub api: ApiConfig,

    /// Nominatim geocoding service
    pub geocoding: GeocodingConfig,

    /// Device geolocation options
    pub geolocation: GeolocationConfig,

    /// Form behaviour
    pub form: FormConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the hazard API
    pub base_url: String,

    /// Per-request timeout in seconds (native targets only)
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// Country filter for forward search
    pub country_codes: String,

    /// User agent sent to Nominatim (native targets only)
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FormConfig {
    /// Delay before the form resets after a successful submission
    pub reset_delay_ms: u64,
}

impl FormConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8001";
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let environment =
            std::env::var("HAZARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(config::Config::builder(), &environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HAZARD__ prefix)
            .add_source(
                Environment::with_prefix("HAZARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.request_timeout_secs", 30)?
            .set_default("geocoding.base_url", DEFAULT_NOMINATIM_URL)?
            .set_default("geocoding.country_codes", "in")?
            .set_default("geocoding.user_agent", "coastal-hazard-reporter/0.1")?
            .set_default("geolocation.high_accuracy", true)?
            .set_default("geolocation.timeout_ms", 15_000)?
            .set_default("geolocation.maximum_age_ms", 60_000)?
            .set_default("form.reset_delay_ms", 3_000)
    }
}

impl Default for Config {
    /// The built-in endpoints, without reading files or the environment
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            geocoding: GeocodingConfig::default(),
            geolocation: GeolocationConfig::default(),
            form: FormConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            country_codes: "in".to_string(),
            user_agent: "coastal-hazard-reporter/0.1".to_string(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 15_000,
            maximum_age_ms: 60_000,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 3_000,
        }
    }
}
