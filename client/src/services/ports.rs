//! Seams between the workflow services and the outside world
//!
//! Network-facing ports are implemented by the HTTP clients in
//! [`crate::external`]; page-facing ports are implemented by the WASM
//! bindings. Futures are not `Send`: everything runs on the page's event
//! loop.

use std::time::Duration;

use async_trait::async_trait;
use shared::models::{
    FileKey, HazardReportDraft, PlaceMatch, ReportPayload, ReversePlace, Severity, StagedFile,
    SubmissionReceipt, WeatherPanel, WeatherSnapshot,
};
use shared::notify::{AlertKind, Notification};
use shared::types::{Coordinate, MapViewport};
use thiserror::Error;

use crate::config::GeolocationConfig;
use crate::error::ClientResult;

// ============================================================================
// Network
// ============================================================================

/// Source of weather snapshots
#[async_trait(?Send)]
pub trait WeatherSource {
    async fn current_weather(&self, at: Coordinate) -> ClientResult<WeatherSnapshot>;
}

/// Forward and reverse geocoding
#[async_trait(?Send)]
pub trait Geocoder {
    /// First match for free text, `None` when nothing matched
    async fn search(&self, query: &str) -> ClientResult<Option<PlaceMatch>>;

    async fn reverse(&self, at: Coordinate) -> ClientResult<ReversePlace>;
}

/// Destination of finished reports
#[async_trait(?Send)]
pub trait ReportSink {
    async fn submit(&self, payload: ReportPayload) -> ClientResult<SubmissionReceipt>;
}

// ============================================================================
// Device
// ============================================================================

/// Options passed to the device location API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_millis(config.timeout_ms as u64),
            maximum_age: Duration::from_millis(config.maximum_age_ms as u64),
        }
    }
}

/// Ways getting the device position can fail
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,

    #[error("Location access denied. Please enable location services and try again.")]
    PermissionDenied,

    #[error("Location information unavailable. Please select location manually on the map.")]
    PositionUnavailable,

    #[error("Location request timed out. Please try again or select location manually on the map.")]
    Timeout,

    #[error("Unable to retrieve your current location.")]
    Unknown,

    #[error("Please select a location near the Indian coastline for ocean hazard reporting")]
    OutsideCoastalArea,
}

impl GeolocationError {
    /// Map a `GeolocationPositionError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }

    pub fn alert_kind(&self) -> AlertKind {
        match self {
            GeolocationError::Unsupported | GeolocationError::OutsideCoastalArea => {
                AlertKind::Warning
            }
            _ => AlertKind::Danger,
        }
    }
}

/// Device position lookup
#[async_trait(?Send)]
pub trait Geolocator {
    async fn current_position(&self, options: PositionOptions)
        -> Result<Coordinate, GeolocationError>;
}

/// Delayed continuation, used for the post-submit reset
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

// ============================================================================
// Page
// ============================================================================

/// The single map widget and its single marker
pub trait MapView {
    fn set_view(&self, viewport: MapViewport);
    fn add_marker(&self, at: Coordinate);
    fn move_marker(&self, at: Coordinate);
    fn remove_marker(&self);
    fn scroll_into_view(&self);
}

/// Controls that show a busy state while work is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Submit,
    Locate,
    Search,
}

/// The report form and its panels
pub trait FormView {
    fn read_draft(&self) -> HazardReportDraft;
    fn set_field(&self, name: &str, value: &str);
    fn set_field_invalid(&self, name: &str, invalid: bool);
    fn focus_field(&self, name: &str);
    /// Clear every field and validation mark
    fn clear_fields(&self);
    fn show_severity(&self, severity: Severity);

    fn set_busy(&self, control: Control, busy: bool);

    fn show_weather(&self, panel: &WeatherPanel);
    fn show_receipt(&self, receipt: &SubmissionReceipt);
    fn clear_status(&self);

    fn add_preview(&self, file: &StagedFile);
    fn remove_preview(&self, key: &FileKey);
    fn clear_previews(&self);
    /// Make the file input hold exactly `files`
    fn sync_file_input(&self, files: &[StagedFile]);
    fn set_media_label(&self, label: &str);
}

/// Presents transient notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Concrete types a [`ReportPage`](super::ReportPage) is assembled from
pub trait PagePorts {
    type Map: MapView;
    type View: FormView;
    type Notifier: Notifier;
    type Weather: WeatherSource;
    type Geocoder: Geocoder;
    type Reports: ReportSink;
    type Locator: Geolocator;
    type Timer: Timer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geolocation_codes() {
        assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(2), GeolocationError::PositionUnavailable);
        assert_eq!(GeolocationError::from_code(3), GeolocationError::Timeout);
        assert_eq!(GeolocationError::from_code(0), GeolocationError::Unknown);
        assert_eq!(GeolocationError::Timeout.alert_kind(), AlertKind::Danger);
        assert_eq!(
            GeolocationError::OutsideCoastalArea.alert_kind(),
            AlertKind::Warning
        );
    }

    #[test]
    fn test_position_options_from_config() {
        let options = PositionOptions::from(&GeolocationConfig::default());
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(15));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }
}
