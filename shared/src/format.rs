//! Display formatting and panel markup

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::models::{StagedFile, SubmissionReceipt, WeatherPanel};
use crate::notify::HtmlSanitizer;
use crate::types::{Coordinate, MediaKind};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// India Standard Time, UTC+05:30
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Render a timestamp as e.g. `19 Oct 2026, 4:05 pm` in IST
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&ist())
        .format("%-d %b %Y, %-I:%M %P")
        .to_string()
}

/// Parse an RFC 3339 timestamp and format it; unparseable input is returned as is
pub fn format_timestamp_str(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "N/A".to_string();
    }
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| format_timestamp(t.with_timezone(&Utc)))
        .unwrap_or_else(|_| timestamp.to_string())
}

/// File names longer than 20 characters are cut to 17 plus an ellipsis
pub fn truncate_display_name(name: &str) -> String {
    if name.chars().count() > 20 {
        let head: String = name.chars().take(17).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Inner markup of the weather panel
pub fn weather_panel_html(panel: &WeatherPanel, sanitizer: &HtmlSanitizer) -> String {
    match panel {
        WeatherPanel::Prompt => r#"<div class="weather-placeholder"><i class="fas fa-info-circle"></i> Select a location to view weather conditions</div>"#.to_string(),
        WeatherPanel::Loading => r#"<div class="loading"><i class="fas fa-spinner spinner"></i> Fetching current weather conditions...</div>"#.to_string(),
        WeatherPanel::Unavailable => r#"<div class="weather-placeholder"><i class="fas fa-exclamation-triangle"></i> Weather data temporarily unavailable</div>"#.to_string(),
        WeatherPanel::Ready(snapshot) => {
            let items: String = snapshot
                .readings()
                .into_iter()
                .map(|r| {
                    format!(
                        r#"<div class="weather-item"><div><i class="fas {}"></i> {}</div><strong>{}</strong></div>"#,
                        r.icon,
                        r.label,
                        sanitizer.escape(&r.value)
                    )
                })
                .collect();
            format!(r#"<div class="weather-data-grid">{}</div>"#, items)
        }
    }
}

/// Success panel shown after a report is accepted
pub fn receipt_panel_html(receipt: &SubmissionReceipt, sanitizer: &HtmlSanitizer) -> String {
    let priority = receipt
        .priority_score
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Calculating...".to_string());
    let nearby = match receipt.nearby_reports_count {
        Some(n) if n > 0 => format!(
            "<p><strong>Similar Reports:</strong> {} reports found in nearby areas</p>",
            n
        ),
        _ => String::new(),
    };
    let message = receipt
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or("Your report has been received and will be processed by our team.");

    format!(
        concat!(
            r#"<div class="alert alert-success">"#,
            r#"<h5><i class="fas fa-check-circle"></i> Report Submitted Successfully!</h5>"#,
            r#"<div class="receipt-details">"#,
            "<p><strong>Report ID:</strong> {}</p>",
            "<p><strong>Priority Score:</strong> {}</p>",
            "{}",
            r#"<p class="receipt-message"><i class="fas fa-info-circle"></i> {}</p>"#,
            "</div></div>"
        ),
        sanitizer.escape(&receipt.report_id),
        sanitizer.escape(&priority),
        nearby,
        sanitizer.escape(message)
    )
}

/// Preview tile for a staged file
pub fn media_preview_html(file: &StagedFile, sanitizer: &HtmlSanitizer) -> String {
    let name = sanitizer.escape(&file.name);
    let caption = sanitizer.escape(&truncate_display_name(&file.name));
    let (media, caption) = match file.kind() {
        Some(MediaKind::Video) => (
            format!(
                r#"<video src="{}" muted style="pointer-events: none;"></video>"#,
                file.preview_data_url()
            ),
            format!(r#"<i class="fas fa-video"></i> {}"#, caption),
        ),
        _ => (
            format!(r#"<img src="{}" alt="{}">"#, file.preview_data_url(), name),
            caption,
        ),
    };
    format!(
        r#"{}<button type="button" class="remove-media" title="Remove {}"><i class="fas fa-times"></i></button><div class="media-caption">{}</div>"#,
        media, name, caption
    )
}

/// Popup shown on the selected-location marker
pub fn marker_popup_html(at: Coordinate) -> String {
    format!(
        "<div class=\"marker-popup\"><i class=\"fas fa-map-marker-alt\"></i> Selected Location<br>\
         <small>Lat: {:.4}, Lng: {:.4}</small></div>",
        at.latitude, at.longitude
    )
}
