//! Formatting and display logic
//!
//! Pure functions for turning backend values into table and popup text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Format a backend timestamp for display
///
/// Accepts RFC 3339 (`2024-03-05T09:30:00Z`, `...+05:00`), the SQL-style
/// `2024-03-05 09:30:00` and bare dates. Anything else is shown verbatim.
///
/// # Examples
/// ```
/// use ptwtui::logic::formatting::format_timestamp;
///
/// assert_eq!(format_timestamp("2024-03-05T09:30:00Z"), "2024-03-05 09:30");
/// assert_eq!(format_timestamp("2024-03-05 09:30:12"), "2024-03-05 09:30");
/// assert_eq!(format_timestamp("2024-03-05"), "2024-03-05");
/// assert_eq!(format_timestamp("soon"), "soon");
/// ```
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Turn a workflow status code into readable text
///
/// Role acronyms (SDO, XEN, PDC, ...) stay upper case, other words are
/// lower-cased after the first.
///
/// # Examples
/// ```
/// use ptwtui::logic::formatting::humanize_status;
///
/// assert_eq!(humanize_status("DRAFT"), "Draft");
/// assert_eq!(humanize_status("SDO_FORWARDED_TO_XEN"), "SDO forwarded to XEN");
/// assert_eq!(humanize_status("XEN_APPROVED_TO_PDC"), "XEN approved to PDC");
/// ```
pub fn humanize_status(code: &str) -> String {
    const ACRONYMS: &[&str] = &["SDO", "XEN", "PDC", "LS", "GSO", "SSO", "SE", "CE", "PTW", "CAPA"];

    let words: Vec<String> = code
        .split('_')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(idx, word)| {
            let upper = word.to_uppercase();
            if ACRONYMS.contains(&upper.as_str()) {
                upper
            } else if idx == 0 {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            } else {
                word.to_lowercase()
            }
        })
        .collect();

    words.join(" ")
}

/// Turn a snake_case field key into a label ("sub_division_id" -> "Sub Division Id")
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display text for a raw JSON field value
///
/// Strings are shown without quotes, null as empty, nested references by
/// their `name` when they have one.
pub fn json_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => value.to_string(),
        },
        Value::Array(items) => items.iter().map(json_cell).collect::<Vec<_>>().join(", "),
    }
}

/// Flatten a serialized record into (label, value) pairs for the detail popup
pub fn record_fields(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (humanize_key(key), json_cell(value)))
            .collect(),
        other => vec![("Value".to_string(), json_cell(other))],
    }
}
