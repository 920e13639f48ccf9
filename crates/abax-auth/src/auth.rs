//! Credential lifecycle for ABAX logins.

use abax_client::TokenProvider;
use chrono::Utc;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::credentials::AbaxCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::oauth::{AuthConfig, OAuthClient, TokenResponse};

/// How the stored credentials were obtained. Decides how they are renewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    AuthorizationCode,
    ClientCredentials,
    Manual,
}

#[derive(Debug)]
struct Session {
    credentials: AbaxCredentials,
    grant: Grant,
}

/// Obtains, stores and renews ABAX credentials.
///
/// `AbaxAuth` is a [`TokenProvider`]: wrap it in an `Arc` and hand it to the
/// API client as its credential, and every call gets a fresh access token.
/// Renewals hold an internal lock, so concurrent callers never spend the
/// same single-use refresh token twice.
#[derive(Debug)]
pub struct AbaxAuth {
    oauth: OAuthClient,
    session: Mutex<Option<Session>>,
}

impl AbaxAuth {
    /// Create a new authenticator.
    pub fn new(config: AuthConfig) -> Result<Self> {
        Ok(Self::with_oauth_client(OAuthClient::new(config)?))
    }

    /// Create an authenticator from `ABAX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(AuthConfig::from_env()?)
    }

    /// Create an authenticator over a configured OAuth client.
    pub fn with_oauth_client(oauth: OAuthClient) -> Self {
        Self {
            oauth,
            session: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        self.oauth.config()
    }

    /// URL to redirect the user to. `state` is echoed back to the redirect URI.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String> {
        self.oauth.authorization_url(state)
    }

    /// Exchange an authorization code and store the resulting credentials.
    #[instrument(skip(self, code))]
    pub async fn credentials_from_code(&self, code: &str) -> Result<AbaxCredentials> {
        let mut session = self.session.lock().await;
        let token = self.oauth.exchange_code(code).await?;
        Ok(store(&mut session, token, Grant::AuthorizationCode))
    }

    /// Obtain application credentials and store them.
    #[instrument(skip(self))]
    pub async fn credentials_from_client_credentials(&self) -> Result<AbaxCredentials> {
        let mut session = self.session.lock().await;
        let token = self.oauth.client_credentials().await?;
        Ok(store(&mut session, token, Grant::ClientCredentials))
    }

    /// Spend the stored refresh token and store the renewed credentials.
    #[instrument(skip(self))]
    pub async fn refresh_credentials(&self) -> Result<AbaxCredentials> {
        let mut session = self.session.lock().await;
        self.refresh_locked(&mut session).await
    }

    /// Replace the stored credentials, e.g. with ones loaded from disk.
    pub async fn set_credentials(&self, credentials: AbaxCredentials) {
        let grant = if credentials.can_refresh() {
            Grant::AuthorizationCode
        } else {
            Grant::Manual
        };
        *self.session.lock().await = Some(Session { credentials, grant });
    }

    /// The stored credentials, if any.
    pub async fn credentials(&self) -> Option<AbaxCredentials> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.credentials.clone())
    }

    /// A valid access token, renewing the credentials first when they have
    /// expired.
    ///
    /// Expired credentials are refreshed with the refresh token when one is
    /// stored, or re-requested when they came from the client credentials
    /// grant. Anything else fails with [`ErrorKind::TokenExpired`].
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> Result<String> {
        let mut session = self.session.lock().await;

        let (expired, can_refresh, grant) = match session.as_ref() {
            None => return Err(Error::new(ErrorKind::NotAuthenticated)),
            Some(s) => (s.credentials.is_expired(), s.credentials.can_refresh(), s.grant),
        };

        if !expired {
            return current_token(&session);
        }

        if can_refresh {
            self.refresh_locked(&mut session).await?;
        } else if grant == Grant::ClientCredentials {
            debug!("Client credentials expired, requesting new ones");
            let token = self.oauth.client_credentials().await?;
            store(&mut session, token, Grant::ClientCredentials);
        } else {
            return Err(Error::new(ErrorKind::TokenExpired));
        }

        current_token(&session)
    }

    async fn refresh_locked(&self, session: &mut Option<Session>) -> Result<AbaxCredentials> {
        let refresh_token = session
            .as_ref()
            .and_then(|s| s.credentials.refresh_token.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::new(ErrorKind::NoRefreshToken))?;

        let mut token = self.oauth.refresh_token(&refresh_token).await?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token);
        }
        info!("Refreshed ABAX credentials");
        Ok(store(session, token, Grant::AuthorizationCode))
    }
}

fn store(session: &mut Option<Session>, token: TokenResponse, grant: Grant) -> AbaxCredentials {
    let credentials = AbaxCredentials::from_token_response(token, Utc::now());
    *session = Some(Session {
        credentials: credentials.clone(),
        grant,
    });
    credentials
}

fn current_token(session: &Option<Session>) -> Result<String> {
    session
        .as_ref()
        .map(|s| s.credentials.access_token.clone())
        .ok_or_else(|| Error::new(ErrorKind::NotAuthenticated))
}

impl TokenProvider for AbaxAuth {
    fn access_token(&self) -> BoxFuture<'_, abax_client::Result<String>> {
        Box::pin(async move { Ok(AbaxAuth::access_token(self).await?) })
    }
}
