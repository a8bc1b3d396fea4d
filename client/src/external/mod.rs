//! External API integrations

pub mod geocoding;
pub mod reports;
pub mod weather;

pub use geocoding::NominatimClient;
pub use reports::ReportsClient;
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::Client;

/// Build the shared HTTP client.
///
/// Timeouts and the user agent are set by the browser on wasm32.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn http_client(timeout: Duration, user_agent: Option<&str>) -> Client {
    let mut builder = Client::builder().timeout(timeout);
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent.to_string());
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn http_client(_timeout: Duration, _user_agent: Option<&str>) -> Client {
    Client::new()
}

/// Trim a trailing slash so paths can be appended with `/`
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
