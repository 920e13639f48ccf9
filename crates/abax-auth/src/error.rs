//! Error types for abax-auth.
//!
//! Messages never carry tokens, codes or client secrets.

/// Result type alias for abax-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for abax-auth operations.
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
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from the identity server.
    #[error("OAuth error: {error}{}", description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    OAuth {
        error: String,
        description: Option<String>,
    },

    /// The identity server answered with an unexpected status and no OAuth error body.
    #[error("Token request failed (HTTP {0})")]
    TokenRequest(u16),

    /// No credentials have been obtained or set yet.
    #[error("Not authenticated: no credentials available")]
    NotAuthenticated,

    /// The access token expired and cannot be renewed.
    #[error("Token expired")]
    TokenExpired,

    /// A refresh was requested but no refresh token is stored.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Token invalid or malformed.
    #[error("Token invalid: {0}")]
    TokenInvalid(String),

    /// JWT decoding error.
    #[error("JWT error: {0}")]
    Jwt(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Token endpoint URLs may carry codes or tokens in the query.
        let message = err.to_string();
        let sanitized = if message.contains("access_token") || message.contains("token=") {
            "HTTP request failed (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {err}")), err)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::with_source(ErrorKind::Jwt(err.to_string()), err)
    }
}

/// Lets an auth failure surface through the API client as a credential error.
impl From<Error> for abax_client::Error {
    fn from(err: Error) -> Self {
        abax_client::Error::with_source(
            abax_client::ErrorKind::Credential(err.kind.to_string()),
            err,
        )
    }
}
