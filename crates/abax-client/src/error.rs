//! Error types for abax-client.

/// Result type alias for abax-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for abax-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the call gave up after repeated rate limiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout { .. })
    }

    /// Returns true if the API rejected the bearer credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized { .. })
    }

    /// Returns true if the response body did not match the expected schema.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Returns the HTTP status code behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Unauthorized { .. } => Some(401),
            ErrorKind::BadRequest { .. } => Some(400),
            ErrorKind::Timeout { .. } => Some(429),
            ErrorKind::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the vendor-supplied message, if the API sent one.
    pub fn vendor_message(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Unauthorized { message }
            | ErrorKind::BadRequest { message }
            | ErrorKind::RequestFailed { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The response body did not match the expected shape. Never retried.
    #[error("Response validation failed: {0}")]
    Validation(String),

    /// The API rejected the credential (HTTP 401).
    #[error("Request was unauthorized{}", detail(message))]
    Unauthorized { message: Option<String> },

    /// The API rejected the request as malformed (HTTP 400).
    #[error("Bad request{}", detail(message))]
    BadRequest { message: Option<String> },

    /// Every allowed attempt was rate limited (HTTP 429).
    #[error("Request timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// Any other non-success status (403, 404, 5xx, ...).
    #[error("Not able to perform request (HTTP {status}){}", detail(message))]
    RequestFailed { status: u16, message: Option<String> },

    /// The credential provider failed to supply a token.
    #[error("Failed to obtain credential: {0}")]
    Credential(String),

    /// Connection or transport failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization error while building a request.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input passed by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::with_source(ErrorKind::Connection(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
