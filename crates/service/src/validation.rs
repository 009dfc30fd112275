//! Payload validation for untrusted employee input.
//!
//! Request bodies arrive as loosely typed JSON maps. [`sanitize_payload`]
//! checks them field by field, stops at the first problem, and produces a
//! trimmed, rounded, date-normalized [`CreateEmployeePayload`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use models::CreateEmployeePayload;
use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// Untyped request body as decoded from JSON.
pub type PayloadMap = Map<String, Value>;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Validate and normalize a raw payload map.
pub fn sanitize_payload(body: &PayloadMap) -> Result<CreateEmployeePayload, ValidationError> {
    let name = require_string(body, "name")?;
    let title = require_string(body, "title")?;
    let department = require_string(body, "department")?;
    let location = require_string(body, "location")?;
    let hire_date_raw = require_string(body, "hireDate")?;

    let salary = coerce_number(body.get("salary"))
        .filter(|v| v.is_finite())
        .and_then(round_half_up)
        .ok_or(ValidationError::NotANumber("salary"))?;

    let hire_date = parse_date(&hire_date_raw).ok_or(ValidationError::InvalidDate("hireDate"))?;

    Ok(CreateEmployeePayload {
        name,
        title,
        department,
        location,
        salary,
        hire_date,
    })
}

/// Same as [`sanitize_payload`] for a body that may not be an object at all.
/// Non-object bodies are treated as an empty map.
pub fn sanitize_value(body: &Value) -> Result<CreateEmployeePayload, ValidationError> {
    match body {
        Value::Object(map) => sanitize_payload(map),
        _ => sanitize_payload(&PayloadMap::new()),
    }
}

fn require_string(body: &PayloadMap, field: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError::Required(field)),
    }
}

/// Loose numeric coercion: numbers pass through, numeric strings are parsed,
/// empty strings, `null` and `false` are zero, `true` is one.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Round to the nearest integer, halves toward positive infinity.
/// `None` when the result does not fit in an `i64`.
fn round_half_up(v: f64) -> Option<i64> {
    let floor = v.floor();
    let rounded = if v - floor >= 0.5 { floor + 1.0 } else { floor };
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}

/// Parse a calendar date, discarding any time-of-day or offset.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    // the local calendar date is kept; the offset is dropped, not applied as a UTC shift
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.date_naive())
}
