//! Weather and ocean-condition models

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Conditions at a coordinate as returned by the weather endpoint.
///
/// Every reading is optional; the service omits what it cannot measure.
/// The body as received is kept in `raw` so fields the panel does not show
/// (wind direction, pressure, timestamp, ...) still reach the report.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WeatherSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_description: Option<String>,
    #[serde(skip)]
    pub raw: Option<Map<String, Value>>,
}

impl<'de> Deserialize<'de> for WeatherSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(body) => Ok(Self::from_body(body)),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(value_kind(&other)),
                &"a weather object",
            )),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// numbers may arrive quoted; anything unparseable is treated as missing
fn number(body: &Map<String, Value>, key: &str) -> Option<f64> {
    match body.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(body: &Map<String, Value>, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One labelled cell of the weather panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReading {
    pub label: &'static str,
    pub icon: &'static str,
    pub value: String,
}

const NOT_AVAILABLE: &str = "N/A";

fn reading(value: Option<f64>, unit: &str) -> String {
    // zero counts as missing
    match value {
        Some(v) if v != 0.0 => format!("{}{}", trim_number(v), unit),
        _ => format!("{}{}", NOT_AVAILABLE, unit),
    }
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl WeatherSnapshot {
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self {
            temperature: number(&body, "temperature"),
            wind_speed: number(&body, "wind_speed"),
            humidity: number(&body, "humidity"),
            wave_height: number(&body, "wave_height"),
            visibility: number(&body, "visibility"),
            weather_description: text(&body, "weather_description"),
            raw: Some(body),
        }
    }

    /// The six readings in panel order
    pub fn readings(&self) -> Vec<WeatherReading> {
        let wave = match self.wave_height {
            Some(h) if h != 0.0 => format!("{}m", trim_number(h)),
            _ => NOT_AVAILABLE.to_string(),
        };
        let description = self
            .weather_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        vec![
            WeatherReading {
                label: "Temperature",
                icon: "fa-thermometer-half",
                value: reading(self.temperature, "°C"),
            },
            WeatherReading {
                label: "Wind Speed",
                icon: "fa-wind",
                value: reading(self.wind_speed, " m/s"),
            },
            WeatherReading {
                label: "Humidity",
                icon: "fa-tint",
                value: reading(self.humidity, "%"),
            },
            WeatherReading {
                label: "Wave Height",
                icon: "fa-water",
                value: wave,
            },
            WeatherReading {
                label: "Visibility",
                icon: "fa-eye",
                value: reading(self.visibility, " km"),
            },
            WeatherReading {
                label: "Conditions",
                icon: "fa-cloud",
                value: description,
            },
        ]
    }

    /// JSON copy stored in the hidden `weatherConditions` field; the
    /// received body when there is one
    pub fn to_field_value(&self) -> String {
        match &self.raw {
            Some(body) => serde_json::to_string(body),
            None => serde_json::to_string(self),
        }
        .unwrap_or_default()
    }
}

/// What the weather panel is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherPanel {
    /// No location picked yet
    Prompt,
    Loading,
    Ready(WeatherSnapshot),
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_payload() {
        let snapshot: WeatherSnapshot =
            serde_json::from_str(r#"{"temperature": 28.5, "weather_description": "haze"}"#)
                .unwrap();
        assert_eq!(snapshot.temperature, Some(28.5));
        assert_eq!(snapshot.wind_speed, None);
        assert_eq!(snapshot.weather_description.as_deref(), Some("haze"));
    }

    #[test]
    fn test_readings_fill_missing_values() {
        let snapshot = WeatherSnapshot {
            temperature: Some(30.0),
            wave_height: Some(1.5),
            ..Default::default()
        };
        let readings = snapshot.readings();
        assert_eq!(readings.len(), 6);
        assert_eq!(readings[0].value, "30°C");
        assert_eq!(readings[1].value, "N/A m/s");
        assert_eq!(readings[3].value, "1.5m");
        assert_eq!(readings[5].value, "N/A");
    }

    #[test]
    fn test_field_value_omits_missing() {
        let snapshot = WeatherSnapshot {
            humidity: Some(80.0),
            ..Default::default()
        };
        assert_eq!(snapshot.to_field_value(), r#"{"humidity":80.0}"#);
    }

    #[test]
    fn test_field_value_keeps_full_body() {
        let body = r#"{"temperature":28,"wind_speed":15.0,"wind_direction":"SW","humidity":75,"pressure":1008.2,"precipitation":0.4,"wave_height":1.5,"weather_description":"Partly Cloudy","timestamp":"2024-06-01T10:00:00Z"}"#;
        let snapshot: WeatherSnapshot = serde_json::from_str(body).unwrap();
        assert_eq!(snapshot.wave_height, Some(1.5));

        let stored: Value = serde_json::from_str(&snapshot.to_field_value()).unwrap();
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(stored, expected);
        assert_eq!(stored["wind_direction"], "SW");
        assert_eq!(stored["timestamp"], "2024-06-01T10:00:00Z");
    }

    #[test]
    fn test_quoted_and_odd_readings() {
        let snapshot: WeatherSnapshot = serde_json::from_str(
            r#"{"temperature": "28", "humidity": null, "wind_speed": "calm", "weather_description": "Clear"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.temperature, Some(28.0));
        assert_eq!(snapshot.humidity, None);
        assert_eq!(snapshot.wind_speed, None);
        assert_eq!(snapshot.readings()[0].value, "28°C");
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(serde_json::from_str::<WeatherSnapshot>("[1, 2]").is_err());
    }
}
