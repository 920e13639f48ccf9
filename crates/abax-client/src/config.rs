//! Client configuration.

use crate::error::{Error, ErrorKind, Result};
use crate::retry::RetryConfig;
use std::time::Duration;

/// Base URL of the production ABAX API.
pub const PRODUCTION_API_URL: &str = "https://api.abax.cloud";

/// Base URL of the ABAX sandbox API.
pub const SANDBOX_API_URL: &str = "https://api-test.abax.cloud";

/// ABAX API environment the client talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Production API.
    #[default]
    Production,
    /// Sandbox API, backed by test data.
    Sandbox,
    /// Any other base URL (proxies, mock servers).
    Custom(String),
}

impl Environment {
    /// Returns the base URL for this environment, without a trailing slash.
    pub fn base_url(&self) -> &str {
        match self {
            Environment::Production => PRODUCTION_API_URL,
            Environment::Sandbox => SANDBOX_API_URL,
            Environment::Custom(url) => url.trim_end_matches('/'),
        }
    }

    /// Returns true if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "sandbox" | "test" => Ok(Environment::Sandbox),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Environment::Custom(s.trim().to_string()))
            }
            _ => Err(Error::new(ErrorKind::Config(format!(
                "Unknown environment: {s}"
            )))),
        }
    }
}

/// Configuration for the ABAX HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API environment.
    pub environment: Environment,
    /// Rate-limit retry configuration.
    pub retry: RetryConfig,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to emit per-attempt request/response events.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            retry: RetryConfig::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// `ABAX_ENVIRONMENT` selects `production` or `sandbox`; `ABAX_API_URL`
    /// overrides the base URL entirely. Everything else keeps its default.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(env) = std::env::var("ABAX_ENVIRONMENT") {
            config.environment = env.parse()?;
        }
        if let Ok(url) = std::env::var("ABAX_API_URL") {
            url::Url::parse(&url)?;
            config.environment = Environment::Custom(url);
        }

        Ok(config)
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Use the sandbox API.
    pub fn sandbox(self) -> Self {
        self.with_environment(Environment::Sandbox)
    }

    /// Use a custom base URL.
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        self.with_environment(Environment::Custom(url.into()))
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Disable rate-limit retries.
    pub fn without_retry(mut self) -> Self {
        self.config.retry = RetryConfig::no_retry();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
