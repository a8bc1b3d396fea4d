//! Browser geolocation and timers

use std::time::Duration;

use async_trait::async_trait;
use hazard_report_client::services::{GeolocationError, Geolocator, PositionOptions, Timer};
use shared::types::Coordinate;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::bindings::{hazard_current_position, hazard_sleep};

/// `navigator.geolocation.getCurrentPosition` as a [`Geolocator`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocator;

#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        let promise = hazard_current_position(
            options.high_accuracy,
            options.timeout.as_millis() as f64,
            options.maximum_age.as_millis() as f64,
        );
        match JsFuture::from(promise).await {
            Ok(value) => {
                let pair = value
                    .dyn_into::<js_sys::Array>()
                    .map_err(|_| GeolocationError::Unknown)?;
                match (pair.get(0).as_f64(), pair.get(1).as_f64()) {
                    (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
                    _ => Err(GeolocationError::Unknown),
                }
            }
            Err(code) => Err(error_from_code(code.as_f64())),
        }
    }
}

fn error_from_code(code: Option<f64>) -> GeolocationError {
    match code {
        Some(c) if c < 0.0 => GeolocationError::Unsupported,
        Some(c) => GeolocationError::from_code(c as u16),
        None => GeolocationError::Unknown,
    }
}

/// `setTimeout` as a [`Timer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let _ = JsFuture::from(hazard_sleep(duration.as_millis() as f64)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(error_from_code(Some(-1.0)), GeolocationError::Unsupported);
        assert_eq!(error_from_code(Some(1.0)), GeolocationError::PermissionDenied);
        assert_eq!(error_from_code(Some(3.0)), GeolocationError::Timeout);
        assert_eq!(error_from_code(None), GeolocationError::Unknown);
    }
}
