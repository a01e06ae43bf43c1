//! Extracts the LED `state` value from a request body.
//!
//! Three encodings are understood, chosen by the request's media type:
//! JSON objects, url-encoded forms, and bare `0`/`1` text for anything else.
//! A body that does not carry a recognizable value yields `None`; callers
//! must turn that into a 400 rather than guess a state.

use serde_json::Value;

const STATE_FIELD: &str = "state";

/// Request body encodings recognized by [`decode_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
    PlainText,
}

impl BodyEncoding {
    /// Picks the encoding from a `Content-Type` header value.
    ///
    /// Parameters such as `; charset=utf-8` are ignored and the media type is
    /// compared case-insensitively. A missing or unknown type is plain text.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .unwrap_or("");

        if media_type.eq_ignore_ascii_case("application/json") {
            BodyEncoding::Json
        } else if media_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            BodyEncoding::Form
        } else {
            BodyEncoding::PlainText
        }
    }
}

pub fn decode_state(body: &[u8], content_type: Option<&str>) -> Option<bool> {
    match BodyEncoding::from_content_type(content_type) {
        BodyEncoding::Json => decode_json(body),
        BodyEncoding::Form => decode_form(body),
        BodyEncoding::PlainText => decode_plain(body),
    }
}

fn decode_json(body: &[u8]) -> Option<bool> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.as_object()?.get(STATE_FIELD)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64()? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        Value::String(s) => binary_digit(s),
        _ => None,
    }
}

fn decode_form(body: &[u8]) -> Option<bool> {
    let body = std::str::from_utf8(body).ok()?;

    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == STATE_FIELD)
        .and_then(|(_, value)| binary_digit(value))
}

fn decode_plain(body: &[u8]) -> Option<bool> {
    let body = std::str::from_utf8(body).ok()?;
    binary_digit(body.trim())
}

fn binary_digit(s: &str) -> Option<bool> {
    match s {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
