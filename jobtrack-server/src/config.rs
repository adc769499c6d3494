use std::time::Duration;

use jobtrack_utils::consts::{EXPORT_FILENAME, NOTIFICATION_TTL, REMINDER_WINDOW};

/// Configuration for store behavior
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a notification stays up before it clears itself
    pub notification_ttl: Duration,

    /// How far ahead a deadline triggers its one-time reminder
    pub reminder_window: Duration,

    /// File name handed to the file transfer on export
    pub export_filename: String,

    /// Number of past notifications kept for callers that poll late
    pub notification_history: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notification_ttl: NOTIFICATION_TTL,
            reminder_window: REMINDER_WINDOW,
            export_filename: EXPORT_FILENAME.to_string(),
            notification_history: 32,
        }
    }
}
