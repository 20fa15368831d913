//! Response envelope decoding
//!
//! The API wraps payloads as `{ statusCode, message, item | items, pagination }`
//! and reports failures as `{ statusCode, message }`, where `message` may be a
//! single string or a list of validation messages. Everything is turned into a
//! tagged [`ApiOutcome`] here so nothing past this point handles loose JSON.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{Result, VeilaError};
use crate::schemas::{Page, Pagination};

/// Outcome of one API call, validated at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { status: u16, message: String },
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// Map a failure onto [`VeilaError::Remote`]
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiOutcome::Success(value) => Ok(value),
            ApiOutcome::Failure { status, message } => Err(VeilaError::Remote { status, message }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiMessage {
    fn into_text(self) -> String {
        match self {
            ApiMessage::One(text) => text,
            ApiMessage::Many(lines) => lines.join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<ApiMessage>,
    #[serde(default)]
    error: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Pull the human readable message out of a failure body
pub fn failure_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed.and_then(|b| {
        b.message
            .map(ApiMessage::into_text)
            .filter(|m| !m.trim().is_empty())
            .or(b.error)
    });
    match message {
        Some(text) => text,
        None if !body.trim().is_empty() && !body.trim_start().starts_with(['{', '[', '<']) => {
            body.trim().to_string()
        }
        None => format!("Request failed with status {}", status),
    }
}

fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| VeilaError::InvalidJson(format!("response body: {}", e)))
}

fn from_value<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| VeilaError::InvalidJson(format!("unexpected {} shape: {}", what, e)))
}

/// Decode a response carrying a single object under `item` (or a bare object).
pub fn decode_item<T: DeserializeOwned>(status: u16, body: &str) -> Result<ApiOutcome<T>> {
    if !is_success(status) {
        return Ok(ApiOutcome::Failure {
            status,
            message: failure_message(status, body),
        });
    }

    let mut value = parse_body(body)?;
    let payload = match value.get_mut("item") {
        Some(item) => item.take(),
        None => value,
    };
    Ok(ApiOutcome::Success(from_value(payload, "item")?))
}

/// Decode a response carrying a list under `items` (or a bare array).
pub fn decode_page<T: DeserializeOwned>(status: u16, body: &str) -> Result<ApiOutcome<Page<T>>> {
    if !is_success(status) {
        return Ok(ApiOutcome::Failure {
            status,
            message: failure_message(status, body),
        });
    }

    let value = parse_body(body)?;
    let page = match value {
        Value::Array(_) => Page::single(from_value(value, "list")?),
        Value::Object(mut object) => {
            let items = object.remove("items").unwrap_or(Value::Array(Vec::new()));
            let items: Vec<T> = from_value(items, "list")?;
            match object.remove("pagination") {
                Some(pagination) => Page {
                    items,
                    pagination: from_value::<Pagination>(pagination, "pagination")?,
                },
                None => Page::single(items),
            }
        }
        Value::Null => Page::single(Vec::new()),
        other => {
            return Err(VeilaError::InvalidJson(format!(
                "expected a list response, got {}",
                other
            )))
        }
    };
    Ok(ApiOutcome::Success(page))
}

/// Decode a response whose body carries nothing the caller needs.
pub fn decode_empty(status: u16, body: &str) -> ApiOutcome<()> {
    if is_success(status) {
        ApiOutcome::Success(())
    } else {
        ApiOutcome::Failure {
            status,
            message: failure_message(status, body),
        }
    }
}
