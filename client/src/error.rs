//! Error handling for the hazard report client
//!
//! Every failure is recoverable and ends up in front of the user, so each
//! variant knows the message the page should show.

use shared::submission::TransitionError;
use shared::ValidationFailure;
use thiserror::Error;

use crate::services::ports::GeolocationError;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    // Workflow errors
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(#[from] TransitionError),

    #[error("Location not found")]
    LocationNotFound,

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ClientError {
    /// Text for the notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) | ClientError::Decode { .. } => {
                "Network error. Please try again.".to_string()
            }
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(failure) => failure.to_string(),
            ClientError::Geolocation(error) => error.to_string(),
            ClientError::InvalidStateTransition(_) => {
                "A submission is already in progress".to_string()
            }
            ClientError::LocationNotFound => {
                "Location not found. Try searching with more specific terms.".to_string()
            }
            ClientError::Configuration(_) => "The reporter is misconfigured".to_string(),
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
