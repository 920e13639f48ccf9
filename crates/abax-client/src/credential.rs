//! Bearer credentials.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::{Error, ErrorKind, Result};

/// Environment variable read by [`Credential::from_env`].
pub const API_KEY_ENV: &str = "ABAX_API_KEY";

/// Supplies access tokens for credentials that rotate outside the client.
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid access token.
    fn access_token(&self) -> BoxFuture<'_, Result<String>>;
}

struct FnProvider<F>(F);

impl<F, Fut> TokenProvider for FnProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    fn access_token(&self) -> BoxFuture<'_, Result<String>> {
        Box::pin((self.0)())
    }
}

/// The bearer credential attached to every API request.
///
/// Resolved once at the start of each logical call. Retries inside that
/// call reuse the same token.
#[derive(Clone)]
pub enum Credential {
    /// A fixed access token or API key.
    Static(String),
    /// A provider asked for a token on every logical call.
    Provider(Arc<dyn TokenProvider>),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Static(_) => f.debug_tuple("Static").field(&"[REDACTED]").finish(),
            Credential::Provider(_) => f.debug_tuple("Provider").field(&"<dyn TokenProvider>").finish(),
        }
    }
}

impl Credential {
    /// A static token.
    pub fn api_key(token: impl Into<String>) -> Self {
        Credential::Static(token.into())
    }

    /// Wrap a token provider.
    pub fn provider(provider: impl TokenProvider + 'static) -> Self {
        Credential::Provider(Arc::new(provider))
    }

    /// Use an already shared provider, e.g. an `Arc<AbaxAuth>` that the
    /// caller also keeps to manage logins.
    pub fn shared(provider: Arc<dyn TokenProvider>) -> Self {
        Credential::Provider(provider)
    }

    /// Use an async closure as the provider.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Credential::Provider(Arc::new(FnProvider(f)))
    }

    /// Read a static token from `ABAX_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(API_KEY_ENV).map_err(|_| {
            Error::new(ErrorKind::Config(format!("{API_KEY_ENV} environment variable not set")))
        })?;
        Ok(Credential::Static(token))
    }

    /// Produce the token for one logical call.
    pub async fn resolve(&self) -> Result<String> {
        let token = match self {
            Credential::Static(token) => token.clone(),
            Credential::Provider(provider) => provider.access_token().await?,
        };

        if token.trim().is_empty() {
            return Err(Error::new(ErrorKind::Credential(
                "access token is empty".to_string(),
            )));
        }

        Ok(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Credential::Static(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Credential::Static(token.to_string())
    }
}
