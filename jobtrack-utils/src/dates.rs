//! Calendar date parsing and display.
//!
//! Stored dates are ISO-8601 calendar dates (`YYYY-MM-DD`). Input is accepted
//! in that form or as a full timestamp, in which case only the date is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::consts::DATE_PLACEHOLDER;

const ISO_DATE: &str = "%Y-%m-%d";
const DISPLAY_DATE: &str = "%-m/%-d/%Y";

/// Parse a stored or user-supplied date. Returns `None` for blank or
/// unparseable input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.date())
}

/// `YYYY-MM-DD`, the stored form.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Human form of a stored date, or the placeholder when it does not parse.
pub fn format_display_date(raw: Option<&str>) -> String {
    match raw.and_then(parse_date) {
        Some(date) => date.format(DISPLAY_DATE).to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Start of `date` (00:00 UTC).
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// End of `date`, exclusive (00:00 UTC of the following day).
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + chrono::Duration::days(1)
}
