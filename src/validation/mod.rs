//! Field validation over loosely-typed JSON payloads. Each rule set checks
//! presence and type of every applicable field, collects all failures, and
//! returns either a typed, sanitized input struct or the full ordered list of
//! messages. Nothing short-circuits on the first failure.

pub mod products;
pub mod users;

use serde_json::Value;

/// HTML-escapes characters that could be replayed into markup when the value
/// is later rendered.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim + escape, applied to every free-text string field before storage.
pub fn sanitize_string(input: &str) -> String {
    escape_html(input.trim())
}

pub(crate) fn required_string(
    payload: &Value,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match payload.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("The {label} field is required"));
            None
        }
        Some(Value::String(s)) => Some(sanitize_string(s)),
        Some(_) => {
            errors.push(format!("The {label} must be a string"));
            None
        }
    }
}

pub(crate) fn optional_string(
    payload: &Value,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match payload.get(key) {
        None => None,
        Some(Value::String(s)) => Some(sanitize_string(s)),
        Some(_) => {
            errors.push(format!("The {label} must be a string"));
            None
        }
    }
}

pub(crate) fn required_number(
    payload: &Value,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    match payload.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("The {label} field is required"));
            None
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            errors.push(format!("The {label} must be a number"));
            None
        }
    }
}

pub(crate) fn optional_number(
    payload: &Value,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<f64> {
    match payload.get(key) {
        None => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            errors.push(format!("The {label} must be a number"));
            None
        }
    }
}

pub(crate) fn required_bool(
    payload: &Value,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<bool> {
    match payload.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("The {label} field is required"));
            None
        }
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(format!("The {label} field must be a boolean"));
            None
        }
    }
}
