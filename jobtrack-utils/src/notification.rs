// Notification types
//
// Transient user-facing status messages (job saved, import failed, deadline
// coming up). The store keeps at most one of these active at a time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual notification style determining color and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStyle {
    /// Error notification (red, ✗ icon)
    Error,
    /// Success notification (green, ✓ icon)
    Success,
    /// Warning notification (yellow, ⚠ icon)
    Warning,
}

impl NotificationStyle {
    /// Get ANSI color code for this style
    pub fn color_code(&self) -> &'static str {
        match self {
            NotificationStyle::Error => "\x1b[31m",   // Red
            NotificationStyle::Success => "\x1b[32m", // Green
            NotificationStyle::Warning => "\x1b[33m", // Yellow
        }
    }

    /// Get icon character for this style
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationStyle::Error => "✗",
            NotificationStyle::Success => "✓",
            NotificationStyle::Warning => "⚠",
        }
    }
}

/// Identity of a shown notification. Assigned by the notification center in
/// increasing order, so a later notification always has a larger id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notification with style and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub style: NotificationStyle,
    pub message: String,
    /// Milliseconds since epoch when it was shown, 0 until then
    pub timestamp: u64,
}

impl Notification {
    /// Unstamped notification; the notification center sets the timestamp
    /// from its clock when it is shown.
    pub fn new(style: NotificationStyle, message: String) -> Self {
        Self {
            style,
            message,
            timestamp: 0,
        }
    }

    /// Create error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationStyle::Error, message.into())
    }

    /// Create success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationStyle::Success, message.into())
    }

    /// Create warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationStyle::Warning, message.into())
    }

    /// Replace the creation timestamp
    pub fn stamped(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Icon and message, colored for a terminal
    pub fn render(&self) -> String {
        format!(
            "{}{} {}\x1b[0m",
            self.style.color_code(),
            self.style.icon(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let notif = Notification::success("Job added successfully!");
        assert_eq!(notif.style, NotificationStyle::Success);
        assert_eq!(notif.message, "Job added successfully!");
        assert_eq!(notif.timestamp, 0);
    }

    #[test]
    fn test_stamped_overrides_timestamp() {
        let notif = Notification::warning("Upcoming deadline").stamped(42);
        assert_eq!(notif.timestamp, 42);
    }

    #[test]
    fn test_render_includes_icon_and_message() {
        let rendered = Notification::error("Error importing jobs!").render();
        assert!(rendered.starts_with("\x1b[31m✗"));
        assert!(rendered.contains("Error importing jobs!"));
        assert!(rendered.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_notification_style_serialization() {
        assert_eq!(
            serde_json::to_string(&NotificationStyle::Warning).unwrap(),
            "\"warning\""
        );
    }
}
