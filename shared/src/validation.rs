//! Validation rules for the hazard report form

use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::models::{fields, HazardReportDraft, HazardType, StagedFile};
use crate::types::Coordinate;

// ============================================================================
// Report Form
// ============================================================================

/// Reasons a report cannot move on to submission
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Please fill in all required fields correctly")]
    InvalidField { field: &'static str },

    #[error("Please select a location on the map")]
    MissingLocation,

    #[error("Please select a valid location near the Indian coastline")]
    OutsideCoastalBounds,
}

/// Where the page should move focus after a failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(&'static str),
    Map,
}

impl ValidationFailure {
    pub fn focus_target(&self) -> Option<FocusTarget> {
        match self {
            ValidationFailure::InvalidField { field } => Some(FocusTarget::Field(field)),
            ValidationFailure::MissingLocation => Some(FocusTarget::Map),
            ValidationFailure::OutsideCoastalBounds => None,
        }
    }
}

/// Run the field constraints of the draft.
///
/// Reports the first failing field in page order.
pub fn validate_draft(draft: &HazardReportDraft) -> Result<(), ValidationFailure> {
    let Err(errors) = draft.validate() else {
        return Ok(());
    };
    let failing = errors.field_errors();
    let field = fields::VALIDATED
        .into_iter()
        .find(|name| failing.contains_key(name))
        .unwrap_or(fields::HAZARD_TYPE);
    Err(ValidationFailure::InvalidField { field })
}

/// Check that a marker exists and its coordinate lies on the coast.
///
/// `marker` is the map selection; `latitude`/`longitude` are the form values
/// it wrote, which must still parse.
pub fn validate_location(
    marker: Option<Coordinate>,
    latitude: &str,
    longitude: &str,
) -> Result<Coordinate, ValidationFailure> {
    if marker.is_none() || latitude.trim().is_empty() || longitude.trim().is_empty() {
        return Err(ValidationFailure::MissingLocation);
    }
    match Coordinate::parse(latitude, longitude) {
        Some(c) if c.is_near_indian_coast() => Ok(c),
        _ => Err(ValidationFailure::OutsideCoastalBounds),
    }
}

/// `validator` hook for the hazard type select
pub fn validate_hazard_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<HazardType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("hazard_type"))
}

/// `validator` hook for the optional contact phone
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// Phone number: optional `+`, then 10-15 digits; spaces and dashes ignored
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

// ============================================================================
// Media Attachments
// ============================================================================

/// Maximum number of staged files
pub const MAX_FILES: usize = 5;

/// Maximum size of a single file (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Why a candidate file was not staged
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaRejection {
    #[error("{name} was not added: maximum {max} files allowed. Please remove some files before adding more.")]
    TooManyFiles { name: String, max: usize },

    #[error("{name} is too large (maximum 10MB allowed)")]
    TooLarge { name: String },

    #[error("{name} is not a valid image or video file")]
    UnsupportedType { name: String },

    #[error("{name} is already added")]
    Duplicate { name: String },
}

impl MediaRejection {
    pub fn file_name(&self) -> &str {
        match self {
            MediaRejection::TooManyFiles { name, .. }
            | MediaRejection::TooLarge { name }
            | MediaRejection::UnsupportedType { name }
            | MediaRejection::Duplicate { name } => name,
        }
    }
}

/// Check one candidate against the already staged files
pub fn validate_media_file(
    candidate: &StagedFile,
    staged: &[StagedFile],
) -> Result<(), MediaRejection> {
    let name = candidate.name.clone();
    if staged.len() >= MAX_FILES {
        return Err(MediaRejection::TooManyFiles {
            name,
            max: MAX_FILES,
        });
    }
    if candidate.size > MAX_FILE_SIZE {
        return Err(MediaRejection::TooLarge { name });
    }
    if candidate.kind().is_none() {
        return Err(MediaRejection::UnsupportedType { name });
    }
    if staged
        .iter()
        .any(|f| f.name == candidate.name && f.size == candidate.size)
    {
        return Err(MediaRejection::Duplicate { name });
    }
    Ok(())
}
