//! Lenient request tokenizer.
//!
//! The whole request is expected to arrive in one buffered read. Parsing
//! never fails: a request line that is not exactly three tokens degrades to
//! `GET / HTTP/1.1`, header lines without a colon are skipped, and the body
//! is whatever bytes followed the blank line.

use crate::http::request::{Method, Request};
use std::collections::HashMap;

const DEFAULT_METHOD: Method = Method::GET;
const DEFAULT_PATH: &str = "/";
const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Tokens of a well-formed request line.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub version: &'a str,
}

pub fn parse_http_request(buf: &[u8]) -> Request {
    let (header_bytes, body_bytes) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + 4..]),
        None => (buf, &[][..]),
    };

    let headers_str = String::from_utf8_lossy(header_bytes);
    let mut lines = headers_str.split("\r\n");

    let (method, path, version) = match lines.next().and_then(tokenize_request_line) {
        Some(line) => (
            Method::from_token(line.method),
            line.path.to_string(),
            line.version.to_string(),
        ),
        None => {
            tracing::debug!("Malformed request line, defaulting to GET /");
            (DEFAULT_METHOD, DEFAULT_PATH.to_string(), DEFAULT_VERSION.to_string())
        }
    };

    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        match parse_header_line(line) {
            Some((key, value)) => {
                headers.insert(key, value);
            }
            None => tracing::debug!(line, "Skipping malformed header line"),
        }
    }

    Request {
        method,
        path,
        version,
        headers,
        body: body_bytes.to_vec(),
    }
}

/// Splits a request line into exactly three whitespace-separated tokens.
pub fn tokenize_request_line(line: &str) -> Option<RequestLine<'_>> {
    let mut parts = line.split_ascii_whitespace();

    let method = parts.next()?;
    let path = parts.next()?;
    let version = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    Some(RequestLine { method, path, version })
}

/// Splits `Key: value` on the first colon. The key is lower-cased.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_ascii_lowercase(), value.trim().to_string()))
}

/// Total bytes a request occupies once its headers are in `buf`: header
/// block, blank line and any declared `Content-Length`.
///
/// `None` until the blank line has arrived. A declared length too large to
/// add up counts as no body, so reading stops at the blank line.
pub fn expected_request_len(buf: &[u8]) -> Option<usize> {
    let end = find_headers_end(buf)?;
    let headers = String::from_utf8_lossy(&buf[..end]);

    let declared = headers
        .split("\r\n")
        .skip(1)
        .filter_map(parse_header_line)
        .filter(|(key, _)| key == "content-length")
        .last()
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let headers_len = end + 4;
    Some(headers_len.checked_add(declared).unwrap_or(headers_len))
}

pub(crate) fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
