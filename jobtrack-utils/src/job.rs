//! Job application records and the loosely-typed inputs they are built from.
//!
//! `JobDraft` is what arrives from forms, storage and import files: every
//! field optional and tolerant of odd JSON. `JobRecord` is the normalized
//! form the store holds. Normalization never rejects a draft, it replaces
//! missing or invalid values with defaults.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::dates::{end_of_day, parse_date, start_of_day};

/// Identifier of a job record, unique within the live collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// Largest id read back from storage or an import (2^53 - 1). Ids are
    /// millisecond timestamps, so real ones stay far below it.
    pub const MAX: JobId = JobId(9_007_199_254_740_991);
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(JobId)
    }
}

/// Error for status/priority strings that name no known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ParseEnumError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// A normalized job application.
///
/// Field order is the serialized (export and storage) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    pub notes: String,
    pub id: JobId,
}

impl JobRecord {
    /// True once the start of the deadline date lies in the past.
    pub fn is_deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline
            .map(|deadline| start_of_day(deadline) < now)
            .unwrap_or(false)
    }

    /// True when the deadline date overlaps `[now, now + window)`.
    pub fn is_deadline_within(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        match self.deadline {
            Some(deadline) => start_of_day(deadline) < now + window && end_of_day(deadline) > now,
            None => false,
        }
    }
}

/// Unnormalized job input, as typed into a form or found in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraft {
    #[serde(deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    #[serde(deserialize_with = "lenient::string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub applied_date: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub deadline: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub priority: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub notes: Option<String>,
}

impl JobDraft {
    pub fn new(company: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            company: Some(company.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_applied_date(mut self, date: impl Into<String>) -> Self {
        self.applied_date = Some(date.into());
        self
    }

    pub fn with_deadline(mut self, date: impl Into<String>) -> Self {
        self.deadline = Some(date.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build a record with `id`, filling every missing or invalid field with
    /// its default. A bad applied date becomes `today`, a bad deadline
    /// becomes absent.
    pub fn into_record(self, id: JobId, today: NaiveDate) -> JobRecord {
        let applied_date = match self.applied_date.as_deref().and_then(parse_date) {
            Some(date) => date,
            None => {
                if let Some(raw) = self.applied_date.as_deref().filter(|raw| !raw.is_empty()) {
                    warn!("Job {}: invalid applied date '{}', using {}", id, raw, today);
                }
                today
            },
        };
        let deadline = self.deadline.as_deref().and_then(parse_date);
        if deadline.is_none() {
            if let Some(raw) = self.deadline.as_deref().filter(|raw| !raw.trim().is_empty()) {
                warn!("Job {}: invalid deadline '{}', dropping it", id, raw);
            }
        }

        JobRecord {
            company: self.company.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            status: normalize_status(self.status.as_deref()),
            applied_date,
            deadline,
            priority: normalize_priority(self.priority.as_deref()),
            notes: self.notes.unwrap_or_default(),
            id,
        }
    }
}

impl From<&JobRecord> for JobDraft {
    fn from(record: &JobRecord) -> Self {
        Self {
            id: Some(record.id),
            company: Some(record.company.clone()),
            title: Some(record.title.clone()),
            status: Some(record.status.to_string()),
            applied_date: Some(record.applied_date.to_string()),
            deadline: record.deadline.map(|date| date.to_string()),
            priority: Some(record.priority.to_string()),
            notes: Some(record.notes.clone()),
        }
    }
}

/// Status for a raw value; blank or unknown values fall back to `Applied`.
pub fn normalize_status(raw: Option<&str>) -> JobStatus {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => JobStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("{}, using {}", e, JobStatus::default());
            JobStatus::default()
        }),
    }
}

/// Priority for a raw value; blank or unknown values fall back to `medium`.
pub fn normalize_priority(raw: Option<&str>) -> Priority {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Priority::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("{}, using {}", e, Priority::default());
            Priority::default()
        }),
    }
}

/// Partial update merged field-by-field over an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub company: Option<String>,
    pub title: Option<String>,
    pub status: Option<JobStatus>,
    pub applied_date: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        self == &JobPatch::default()
    }

    /// Merge into `record`. Dates that fail to parse leave the existing value
    /// in place rather than falling back to a default.
    pub fn apply_to(&self, record: &mut JobRecord) {
        if let Some(company) = &self.company {
            record.company = company.clone();
        }
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(date) = self.applied_date.as_deref().and_then(parse_date) {
            record.applied_date = date;
        }
        if let Some(date) = self.deadline.as_deref().and_then(parse_date) {
            record.deadline = Some(date);
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(notes) = &self.notes {
            record.notes = notes.clone();
        }
    }
}

/// Deserializers that accept whatever JSON shape old exports contain
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::JobId;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JobId>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= JobId::MAX.0 as f64)
                        .map(|f| f as u64)
                })
                .map(JobId),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
        .filter(|id| *id <= JobId::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 3, 1)
    }

    #[test]
    fn test_draft_defaults() {
        let record = JobDraft::new("Acme", "Eng").into_record(JobId(7), today());

        assert_eq!(record.company, "Acme");
        assert_eq!(record.title, "Eng");
        assert_eq!(record.status, JobStatus::Applied);
        assert_eq!(record.applied_date, today());
        assert_eq!(record.deadline, None);
        assert_eq!(record.priority, Priority::Medium);
        assert_eq!(record.notes, "");
        assert_eq!(record.id, JobId(7));
    }

    #[test]
    fn test_draft_missing_required_fields_become_empty() {
        let record = JobDraft::default().into_record(JobId(1), today());
        assert_eq!(record.company, "");
        assert_eq!(record.title, "");
    }

    #[test]
    fn test_draft_invalid_dates_normalize() {
        let record = JobDraft::new("Acme", "Eng")
            .with_applied_date("yesterday-ish")
            .with_deadline("whenever")
            .into_record(JobId(1), today());

        assert_eq!(record.applied_date, today());
        assert_eq!(record.deadline, None);
    }

    #[test]
    fn test_draft_valid_dates_survive() {
        let record = JobDraft::new("Acme", "Eng")
            .with_applied_date("2024-01-10")
            .with_deadline("2024-04-01")
            .into_record(JobId(1), today());

        assert_eq!(record.applied_date, ymd(2024, 1, 10));
        assert_eq!(record.deadline, Some(ymd(2024, 4, 1)));
    }

    #[test]
    fn test_status_and_priority_normalization() {
        assert_eq!(normalize_status(Some("interviewing")), JobStatus::Interviewing);
        assert_eq!(normalize_status(Some("Ghosted")), JobStatus::Applied);
        assert_eq!(normalize_status(Some("")), JobStatus::Applied);
        assert_eq!(normalize_priority(Some("HIGH")), Priority::High);
        assert_eq!(normalize_priority(Some("urgent")), Priority::Medium);
        assert_eq!(normalize_priority(None), Priority::Medium);
    }

    #[test]
    fn test_lenient_draft_deserialization() {
        let draft: JobDraft = serde_json::from_str(
            r#"{"id": 1700000000000, "company": "Acme", "title": 42, "deadline": null, "extra": true}"#,
        )
        .unwrap();

        assert_eq!(draft.id, Some(JobId(1700000000000)));
        assert_eq!(draft.company.as_deref(), Some("Acme"));
        assert_eq!(draft.title.as_deref(), Some("42"));
        assert_eq!(draft.deadline, None);
        assert_eq!(draft.priority, None);
    }

    #[test]
    fn test_lenient_id_forms() {
        let from_string: JobDraft = serde_json::from_str(r#"{"id": "12"}"#).unwrap();
        let from_float: JobDraft = serde_json::from_str(r#"{"id": 12.0}"#).unwrap();
        let negative: JobDraft = serde_json::from_str(r#"{"id": -3}"#).unwrap();

        assert_eq!(from_string.id, Some(JobId(12)));
        assert_eq!(from_float.id, Some(JobId(12)));
        assert_eq!(negative.id, None);
    }

    #[test]
    fn test_lenient_id_rejects_ids_past_the_safe_range() {
        let largest: JobDraft = serde_json::from_str(r#"{"id": 9007199254740991}"#).unwrap();
        let too_large: JobDraft = serde_json::from_str(r#"{"id": 9007199254740992}"#).unwrap();
        let max_u64: JobDraft =
            serde_json::from_str(r#"{"id": 18446744073709551615}"#).unwrap();
        let as_float: JobDraft = serde_json::from_str(r#"{"id": 1.8446744073709552e19}"#).unwrap();
        let as_string: JobDraft =
            serde_json::from_str(r#"{"id": "18446744073709551615"}"#).unwrap();

        assert_eq!(largest.id, Some(JobId::MAX));
        assert_eq!(too_large.id, None);
        assert_eq!(max_u64.id, None);
        assert_eq!(as_float.id, None);
        assert_eq!(as_string.id, None);
    }

    #[test]
    fn test_record_serialized_field_order() {
        let record = JobDraft::new("Acme", "Eng")
            .with_applied_date("2024-01-10")
            .into_record(JobId(5), today());

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"company":"Acme","title":"Eng","status":"Applied","appliedDate":"2024-01-10","deadline":null,"priority":"medium","notes":"","id":5}"#
        );
    }

    #[test]
    fn test_patch_keeps_dates_on_invalid_input() {
        let mut record = JobDraft::new("Acme", "Eng")
            .with_applied_date("2024-01-10")
            .with_deadline("2024-02-01")
            .into_record(JobId(1), today());

        let patch = JobPatch {
            applied_date: Some("not-a-date".to_string()),
            deadline: Some(String::new()),
            status: Some(JobStatus::Offer),
            ..Default::default()
        };
        patch.apply_to(&mut record);

        assert_eq!(record.applied_date, ymd(2024, 1, 10));
        assert_eq!(record.deadline, Some(ymd(2024, 2, 1)));
        assert_eq!(record.status, JobStatus::Offer);
        assert_eq!(record.company, "Acme");
    }

    #[test]
    fn test_deadline_flags() {
        let now = start_of_day(today()) + chrono::Duration::hours(12);
        let window = chrono::Duration::hours(24);
        let with_deadline = |date: &str| {
            JobDraft::new("Acme", "Eng")
                .with_deadline(date)
                .into_record(JobId(1), today())
        };

        let due_today = with_deadline("2024-03-01");
        assert!(due_today.is_deadline_within(now, window));
        assert!(due_today.is_deadline_passed(now));

        let due_tomorrow = with_deadline("2024-03-02");
        assert!(due_tomorrow.is_deadline_within(now, window));
        assert!(!due_tomorrow.is_deadline_passed(now));

        let next_week = with_deadline("2024-03-08");
        assert!(!next_week.is_deadline_within(now, window));

        let last_week = with_deadline("2024-02-20");
        assert!(!last_week.is_deadline_within(now, window));
        assert!(last_week.is_deadline_passed(now));
    }

    #[test]
    fn test_status_round_trips_through_display() {
        for status in JobStatus::ALL {
            assert_eq!(status.to_string().parse::<JobStatus>(), Ok(status));
        }
    }
}
