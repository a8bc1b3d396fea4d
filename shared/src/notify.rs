//! Transient status messages and HTML sanitizing

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default auto-dismiss delay for alerts
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Short auto-dismiss delay for confirmations
pub const SHORT_ALERT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Visual style of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Info => "alert-info",
            AlertKind::Warning => "alert-warning",
            AlertKind::Danger => "alert-danger",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "fa-check-circle",
            AlertKind::Info => "fa-info-circle",
            AlertKind::Warning => "fa-exclamation-triangle",
            AlertKind::Danger => "fa-times-circle",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertKind::Success => "success",
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Danger => "danger",
        };
        f.write_str(name)
    }
}

impl FromStr for AlertKind {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `Info`; `error` is an alias of `Danger`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => AlertKind::Success,
            "warning" => AlertKind::Warning,
            "danger" | "error" => AlertKind::Danger,
            _ => AlertKind::Info,
        })
    }
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: AlertKind,
    pub message: String,
    /// `None` keeps the alert until dismissed
    pub timeout: Option<Duration>,
}

impl Notification {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timeout: Some(DEFAULT_ALERT_TIMEOUT),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Danger, message)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn sticky(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Alert markup; the message is escaped with `sanitizer`
    pub fn render_html(&self, sanitizer: &HtmlSanitizer) -> String {
        format!(
            r#"<div class="alert {} alert-dismissible fade show" role="alert"><i class="fas {}"></i> {}<button type="button" class="btn-close" aria-label="Close"><i class="fas fa-times"></i></button></div>"#,
            self.kind.css_class(),
            self.kind.icon(),
            sanitizer.escape(&self.message)
        )
    }
}

/// Escapes text for interpolation into HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn escape(&self, unsafe_text: &str) -> String {
        escape_html(unsafe_text)
    }
}

/// Replace `& < > " '` with their entities
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='alert(1)'>&"#),
            "&lt;img src=&quot;x&quot; onerror=&#039;alert(1)&#039;&gt;&amp;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("error".parse::<AlertKind>(), Ok(AlertKind::Danger));
        assert_eq!("bogus".parse::<AlertKind>(), Ok(AlertKind::Info));
    }

    #[test]
    fn test_render_escapes_message() {
        let html = Notification::warning("<b>x</b>").render_html(&HtmlSanitizer::new());
        assert!(html.contains("alert-warning"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(Notification::info("x").timeout, Some(DEFAULT_ALERT_TIMEOUT));
        assert_eq!(Notification::danger("x").sticky().timeout, None);
        assert_eq!(
            Notification::info("x").with_timeout(SHORT_ALERT_TIMEOUT).timeout,
            Some(Duration::from_millis(2000))
        );
    }
}
