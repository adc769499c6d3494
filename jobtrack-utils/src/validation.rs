//! Form-level checks a front end runs before handing a draft to the store.
//!
//! The store itself only normalizes; these checks are stricter and report
//! one message per offending field.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::job::JobDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Company,
    Title,
    AppliedDate,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Company => write!(f, "company"),
            FormField::Title => write!(f, "title"),
            FormField::AppliedDate => write!(f, "appliedDate"),
        }
    }
}

/// Field-level validation messages, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

fn summarize(errors: &BTreeMap<FormField, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a job form. `today` is the latest acceptable applied date.
pub fn validate_job_form(draft: &JobDraft, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if is_blank(draft.company.as_deref()) {
        errors.insert(FormField::Company, "Company name is required");
    }
    if is_blank(draft.title.as_deref()) {
        errors.insert(FormField::Title, "Job title is required");
    }

    match draft.applied_date.as_deref().map(str::trim) {
        None | Some("") => errors.insert(FormField::AppliedDate, "Application date is required"),
        Some(raw) => match parse_date(raw) {
            None => errors.insert(FormField::AppliedDate, "Invalid date"),
            Some(date) if date > today => {
                errors.insert(FormField::AppliedDate, "Date cannot be in the future")
            },
            Some(_) => {},
        },
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
