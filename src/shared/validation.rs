use std::borrow::Cow;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use validator::ValidationError;

lazy_static! {
    /// Calendar date written as `YYYY-MM-DD` or `YYYY/MM/DD`
    /// - Valid: "2024-09-01", "2024/09/01"
    /// - Invalid: "2024-9-1", "01/09/2024", "2024-09/01"
    pub static ref DATE_REGEX: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2}|\d{4}/\d{2}/\d{2})$").unwrap();
}

/// Parse a date accepted by [`DATE_REGEX`] into a real calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_REGEX.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(&value.replace('/', "-"), "%Y-%m-%d").ok()
}

/// Read a non-empty text value; numbers are taken as their decimal text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read an integer from a JSON number or an integer string.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// Read a boolean from `true`/`false`, `"true"`/`"false"`, `"1"`/`"0"` or `1`/`0`.
pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn validate_text(value: &Value) -> Result<(), ValidationError> {
    as_text(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("text").with_message(Cow::Borrowed("must not be empty"))
    })
}

pub fn validate_date(value: &Value) -> Result<(), ValidationError> {
    value.as_str().and_then(parse_date).map(|_| ()).ok_or_else(|| {
        ValidationError::new("date").with_message(Cow::Borrowed("must be a valid date"))
    })
}

pub fn validate_integer(value: &Value) -> Result<(), ValidationError> {
    as_integer(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("integer").with_message(Cow::Borrowed("must be an integer"))
    })
}

pub fn validate_boolean(value: &Value) -> Result<(), ValidationError> {
    as_boolean(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new("boolean").with_message(Cow::Borrowed("must be a boolean"))
    })
}
