//! Storage keys and fixed values shared across crates.

use std::time::Duration;

use crate::job::JobId;

/// Storage key holding the JSON array of job records.
pub const JOBS_STORAGE_KEY: &str = "jobApplications";

/// Prefix of the per-record deadline reminder flags.
pub const REMINDER_KEY_PREFIX: &str = "reminder-";

/// Value written under a reminder key once the warning has fired.
pub const REMINDER_FLAG_VALUE: &str = "true";

/// File name used for exported collections.
pub const EXPORT_FILENAME: &str = "job-applications.json";

/// Shown in place of a date that is missing or does not parse.
pub const DATE_PLACEHOLDER: &str = "Not specified";

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub const REMINDER_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Storage key of the reminder flag for `id`.
pub fn reminder_key(id: JobId) -> String {
    format!("{}{}", REMINDER_KEY_PREFIX, id)
}
