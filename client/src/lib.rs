//! Coastal hazard report client
//!
//! Drives the hazard report workflow: picking a location on the map,
//! enriching it with a place name and current weather, staging media
//! attachments, and validating and posting the report. The page itself is
//! reached through the port traits in [`services::ports`], so the workflow
//! runs the same in the browser and under tests.

pub mod config;
pub mod error;
pub mod external;
pub mod services;
#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use external::{NominatimClient, ReportsClient, WeatherClient};
pub use services::{PageParts, PagePorts, ReportPage};
