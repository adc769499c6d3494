//! JSON encoding of job collections for storage and export.

use log::warn;
use serde_json::Value;
use thiserror::Error;

use crate::job::{JobDraft, JobRecord};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON array of job records, found {0}")]
    NotAnArray(&'static str),

    #[error("job record at index {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Decode a JSON array of job objects into drafts. Fields are read leniently;
/// anything other than an array of objects is rejected as a whole.
pub fn decode_jobs(text: &str) -> Result<Vec<JobDraft>, DecodeError> {
    decode_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(DecodeError::NotAnObject { index });
            }
            Ok(serde_json::from_value(item)?)
        })
        .collect()
}

/// Decode the collection kept in storage. Only the outer array has to be
/// intact; an element that is not an object loads as an empty draft.
pub fn decode_stored_jobs(text: &str) -> Result<Vec<JobDraft>, DecodeError> {
    decode_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                warn!(
                    "Stored job at index {} is {}, loading it as an empty record",
                    index,
                    kind_of(&item)
                );
                return Ok(JobDraft::default());
            }
            Ok(serde_json::from_value(item)?)
        })
        .collect()
}

fn decode_array(text: &str) -> Result<Vec<Value>, DecodeError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items),
        other => Err(DecodeError::NotAnArray(kind_of(&other))),
    }
}

/// Compact form written to storage.
pub fn encode_jobs(jobs: &[JobRecord]) -> serde_json::Result<String> {
    serde_json::to_string(jobs)
}

/// Two-space indented form used for exports. Identical input always yields
/// identical bytes.
pub fn encode_jobs_pretty(jobs: &[JobRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(jobs)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
