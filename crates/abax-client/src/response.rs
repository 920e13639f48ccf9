//! Buffered HTTP responses.

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, ErrorKind, Result};

/// Header carrying the instant a rate-limit window clears.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// A fully read HTTP response.
///
/// The transport buffers the whole body before the executor looks at it, so
/// a response can be classified, logged and parsed without further I/O.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        // Normalize header names to lowercase for case-insensitive lookups
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Convenience constructor for a JSON response.
    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(status, headers, body.to_string())
    }

    /// Convenience constructor for a response without a body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, HashMap::new(), Bytes::new())
    }

    /// Add a header, builder style.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body. A mismatch is a validation error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::with_source(ErrorKind::Validation(e.to_string()), e)
        })
    }

    /// Parse the `X-Rate-Limit-Reset` header, if present and well formed.
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        self.header(RATE_LIMIT_RESET_HEADER)
            .and_then(parse_timestamp)
    }

    /// The vendor error body, when the response carries one.
    pub fn api_error(&self) -> ApiError {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&self.body) else {
            return ApiError::default();
        };
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        ApiError {
            error: text("error"),
            message: text("message"),
        }
    }
}

/// Error body returned by the ABAX API. Both fields are optional, and a
/// field that is not a string is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ApiError {
    /// The most descriptive message available, sanitized.
    pub fn detail(&self) -> Option<String> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(sanitize_error_message)
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

static JWT_PATTERN: LazyLock<Option<regex_lite::Regex>> = LazyLock::new(|| {
    regex_lite::Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").ok()
});

static BEARER_PATTERN: LazyLock<Option<regex_lite::Regex>> =
    LazyLock::new(|| regex_lite::Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").ok());

/// Sanitize a vendor error message before it is stored on an error.
///
/// Redacts JWTs and bearer credentials and truncates anything longer than
/// 500 characters.
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Some(pattern) = JWT_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .to_string();
    }

    if let Some(pattern) = BEARER_PATTERN.as_ref() {
        sanitized = pattern
            .replace_all(&sanitized, "Bearer [REDACTED]")
            .to_string();
    }

    if let Some((cut, _)) = sanitized.char_indices().nth(MAX_LENGTH) {
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
