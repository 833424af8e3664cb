//! Field-level request checks.
//!
//! Every request type validates its fields in declaration order and stops at
//! the first failing rule, so the client always receives exactly one message.

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::AppError;
use crate::formatting::parse_date;

const PASSWORD_MIN_LEN: usize = 8;
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn ensure(ok: bool, message: &str) -> Result<(), AppError> {
    if ok {
        Ok(())
    } else {
        Err(AppError::Validation(message.to_string()))
    }
}

/// Returns the trimmed value, failing with `message` when absent or blank.
pub fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_date(
    value: Option<String>,
    missing: &str,
    invalid: &str,
) -> Result<NaiveDate, AppError> {
    let raw = required(value, missing)?;
    parse_date(&raw).ok_or_else(|| AppError::Validation(invalid.to_string()))
}

pub fn optional_date(value: Option<String>, invalid: &str) -> Result<Option<NaiveDate>, AppError> {
    match optional(value) {
        None => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(invalid.to_string())),
    }
}

/// Lookup ids arrive either as JSON integers or numeric strings.
pub fn required_id(value: Option<&Value>, message: &str) -> Result<i64, AppError> {
    let id = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.ok_or_else(|| AppError::Validation(message.to_string()))
}

pub fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// Twelve digits, first digit 2-9.
pub fn is_aadhaar(s: &str) -> bool {
    is_digits(s, 12) && !s.starts_with('0') && !s.starts_with('1')
}

/// Indian PAN: five uppercase letters, four digits, one uppercase letter.
pub fn is_pan(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Length and composition rules for new passwords.
pub fn check_new_password(password: Option<String>) -> Result<String, AppError> {
    let password = password.unwrap_or_default();
    ensure(!password.is_empty(), "Password is required.")?;
    ensure(
        password.chars().count() >= PASSWORD_MIN_LEN,
        "Please enter a password with 8 or more characters.",
    )?;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    ensure(
        has_letter && has_digit && has_special,
        "Password must contain at least one letter, one digit, and one special character.",
    )?;
    Ok(password)
}
