//! Hazard report models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::media::StagedFile;

/// Hazards the report API accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Tsunami,
    StormSurge,
    HighWaves,
    CoastalFlooding,
    Cyclone,
    RipCurrent,
    CoastalErosion,
    Other,
}

impl HazardType {
    pub const ALL: [HazardType; 8] = [
        HazardType::Tsunami,
        HazardType::StormSurge,
        HazardType::HighWaves,
        HazardType::CoastalFlooding,
        HazardType::Cyclone,
        HazardType::RipCurrent,
        HazardType::CoastalErosion,
        HazardType::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            HazardType::Tsunami => "tsunami",
            HazardType::StormSurge => "storm_surge",
            HazardType::HighWaves => "high_waves",
            HazardType::CoastalFlooding => "coastal_flooding",
            HazardType::Cyclone => "cyclone",
            HazardType::RipCurrent => "rip_current",
            HazardType::CoastalErosion => "coastal_erosion",
            HazardType::Other => "other",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HazardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HazardType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("unknown hazard type: {}", s))
    }
}

/// Severity level on the 1-5 scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "1 - Low",
            2 => "2 - Mild",
            3 => "3 - Moderate",
            4 => "4 - High",
            _ => "5 - Critical",
        }
    }

    /// Badge colour for the severity slider
    pub fn color(&self) -> &'static str {
        match self.0 {
            1 => "#10b981",
            2 => "#3b82f6",
            3 => "#f59e0b",
            4 => "#ef4444",
            _ => "#dc2626",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(3)
    }
}

/// Form field names, in the order they appear on the page
pub mod fields {
    pub const USER_ID: &str = "user_id";
    pub const HAZARD_TYPE: &str = "hazard_type";
    pub const SEVERITY: &str = "severity";
    pub const DESCRIPTION: &str = "description";
    pub const LOCATION_NAME: &str = "locationName";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const WEATHER_CONDITIONS: &str = "weatherConditions";
    pub const CONTACT_EMAIL: &str = "contact_email";
    pub const CONTACT_PHONE: &str = "contact_phone";
    pub const MEDIA_FILES: &str = "mediaFiles";

    /// Fields that carry constraint checks, in focus order
    pub const VALIDATED: [&str; 5] = [
        HAZARD_TYPE,
        SEVERITY,
        DESCRIPTION,
        CONTACT_EMAIL,
        CONTACT_PHONE,
    ];
}

/// Current values of the report form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq)]
pub struct HazardReportDraft {
    pub user_id: String,
    #[validate(custom = "crate::validation::validate_hazard_type")]
    pub hazard_type: String,
    #[validate(range(min = 1, max = 5))]
    pub severity: u8,
    #[validate(length(min = 1))]
    pub description: String,
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    pub weather_conditions: String,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(custom = "crate::validation::validate_phone")]
    pub contact_phone: Option<String>,
}

impl HazardReportDraft {
    /// User id sent with the report, synthesized when the field is blank
    pub fn effective_user_id(&self, now: DateTime<Utc>) -> String {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            anonymous_user_id(now)
        } else {
            user_id.to_string()
        }
    }
}

/// `anonymous_<epoch millis>`
pub fn anonymous_user_id(now: DateTime<Utc>) -> String {
    format!("anonymous_{}", now.timestamp_millis())
}

/// Multipart body of a report submission
#[derive(Debug, Clone, Default)]
pub struct ReportPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<StagedFile>,
}

impl ReportPayload {
    /// Assemble the body from the draft and the staged files
    pub fn assemble(draft: &HazardReportDraft, files: &[StagedFile], now: DateTime<Utc>) -> Self {
        let mut body = Vec::with_capacity(10);
        let mut push = |name: &str, value: &str| body.push((name.to_string(), value.to_string()));

        push(fields::USER_ID, &draft.effective_user_id(now));
        push(fields::HAZARD_TYPE, &draft.hazard_type);
        push(fields::SEVERITY, &draft.severity.to_string());
        push(fields::DESCRIPTION, &draft.description);
        push(fields::LOCATION_NAME, &draft.location_name);
        push(fields::LATITUDE, &draft.latitude);
        push(fields::LONGITUDE, &draft.longitude);
        push(fields::WEATHER_CONDITIONS, &draft.weather_conditions);
        if let Some(email) = draft.contact_email.as_deref().filter(|e| !e.is_empty()) {
            push(fields::CONTACT_EMAIL, email);
        }
        if let Some(phone) = draft.contact_phone.as_deref().filter(|p| !p.is_empty()) {
            push(fields::CONTACT_PHONE, phone);
        }

        Self {
            fields: body,
            files: files.to_vec(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Successful response of the submit endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub report_id: String,
    #[serde(default)]
    pub priority_score: Option<f64>,
    #[serde(default)]
    pub nearby_reports_count: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the API on non-OK responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<serde_json::Value>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// `detail`, then `message`, if either is present
    pub fn reason(&self) -> Option<String> {
        let detail = self.detail.as_ref().and_then(|d| match d {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        detail
            .or_else(|| self.message.clone())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> HazardReportDraft {
        HazardReportDraft {
            hazard_type: "high_waves".into(),
            severity: 4,
            description: "Waves topping the sea wall".into(),
            location_name: "Marina".into(),
            latitude: "13.000000".into(),
            longitude: "80.200000".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_hazard_type_round_trip() {
        for t in HazardType::ALL {
            assert_eq!(t.code().parse::<HazardType>(), Ok(t));
        }
        assert!("meteor".parse::<HazardType>().is_err());
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::default().label(), "3 - Moderate");
        assert_eq!(Severity::new(5).map(|s| s.label()), Some("5 - Critical"));
        assert_eq!(Severity::new(0), None);
        assert_eq!(Severity::new(6), None);
    }

    #[test]
    fn test_payload_synthesizes_user_id() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let payload = ReportPayload::assemble(&draft(), &[], now);
        assert_eq!(payload.field("user_id"), Some("anonymous_1700000000123"));
        assert_eq!(payload.field("latitude"), Some("13.000000"));
        assert_eq!(payload.field("severity"), Some("4"));
        assert_eq!(payload.field("contact_email"), None);
    }

    #[test]
    fn test_payload_keeps_given_user_id() {
        let mut d = draft();
        d.user_id = "fisher-42".into();
        let payload = ReportPayload::assemble(&d, &[], Utc::now());
        assert_eq!(payload.field("user_id"), Some("fisher-42"));
    }

    #[test]
    fn test_receipt_optional_fields() {
        let receipt: SubmissionReceipt = serde_json::from_str(r#"{"report_id":"R1"}"#).unwrap();
        assert_eq!(receipt.report_id, "R1");
        assert_eq!(receipt.priority_score, None);
        assert_eq!(receipt.nearby_reports_count, None);
    }

    #[test]
    fn test_error_body_reason() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Location must be near Indian coastline"}"#)
                .unwrap();
        assert_eq!(
            body.reason().as_deref(),
            Some("Location must be near Indian coastline")
        );

        let body: ApiErrorBody = serde_json::from_str(r#"{"message": "busy"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("busy"));

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.reason(), None);
    }
}
