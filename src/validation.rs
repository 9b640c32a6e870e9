//! Input checks that run before any store access.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Identifier as it arrives in a JSON body: clients send either `7` or `"7"`.
/// Anything else (`1.5`, `true`, `{}`) is kept so it can be rejected as input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl RawId {
    pub fn parse(&self, label: &str) -> AppResult<i32> {
        match self {
            RawId::Number(n) => i32::try_from(*n)
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| invalid_id(label)),
            RawId::Text(s) => parse_id(s, label),
            RawId::Other(_) => Err(invalid_id(label)),
        }
    }
}

impl From<i32> for RawId {
    fn from(id: i32) -> Self {
        RawId::Number(id as i64)
    }
}

impl From<&str> for RawId {
    fn from(id: &str) -> Self {
        RawId::Text(id.to_string())
    }
}

/// Parse a path or body identifier. `label` names it in the error, e.g. "module ID".
pub fn parse_id(raw: &str, label: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_id(label))
}

pub fn require_id(raw: Option<&RawId>, label: &str) -> AppResult<i32> {
    match raw {
        Some(raw) => raw.parse(label),
        None => Err(AppError::InvalidInput(format!("Missing or invalid {label}"))),
    }
}

/// Non-blank text, trimmed.
pub fn require_text(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("{field} is required")))
}

/// `Some` only when the caller supplied a non-blank value.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn require_price(value: i64, field: &str) -> AppResult<i64> {
    if value < 0 {
        return Err(AppError::InvalidInput(format!("{field} must not be negative")));
    }
    Ok(value)
}

fn invalid_id(label: &str) -> AppError {
    AppError::InvalidInput(format!("Invalid {label}"))
}
