//! OAuth 2.0 flows against the ABAX identity server.
//!
//! Supported grants:
//! - **Authorization code** - for applications acting on behalf of a user
//! - **Client credentials** - for server-to-server integrations
//! - **Refresh token** - for renewing expired access tokens
//!
//! PKCE and token revocation are not supported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};

/// Default ABAX identity server.
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.abax.cloud";

/// Scopes understood by the ABAX identity server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Issue an id token.
    OpenId,
    /// Include profile claims (name, email, organization) in the id token.
    AbaxProfile,
    /// Production Open API.
    OpenApi,
    OpenApiEquipment,
    OpenApiVehicles,
    OpenApiTrips,
    OpenApiDrivingBehaviour,
    OpenApiOrganization,
    /// Sandbox Open API.
    OpenApiSandbox,
    OpenApiSandboxEquipment,
    OpenApiSandboxVehicles,
    OpenApiSandboxTrips,
    OpenApiSandboxDrivingBehaviour,
    OpenApiSandboxOrganization,
    /// Issue a refresh token.
    OfflineAccess,
}

impl Scope {
    pub const ALL: [Scope; 15] = [
        Scope::OpenId,
        Scope::AbaxProfile,
        Scope::OpenApi,
        Scope::OpenApiEquipment,
        Scope::OpenApiVehicles,
        Scope::OpenApiTrips,
        Scope::OpenApiDrivingBehaviour,
        Scope::OpenApiOrganization,
        Scope::OpenApiSandbox,
        Scope::OpenApiSandboxEquipment,
        Scope::OpenApiSandboxVehicles,
        Scope::OpenApiSandboxTrips,
        Scope::OpenApiSandboxDrivingBehaviour,
        Scope::OpenApiSandboxOrganization,
        Scope::OfflineAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::OpenId => "openid",
            Scope::AbaxProfile => "abax_profile",
            Scope::OpenApi => "open_api",
            Scope::OpenApiEquipment => "open_api.equipment",
            Scope::OpenApiVehicles => "open_api.vehicles",
            Scope::OpenApiTrips => "open_api.trips",
            Scope::OpenApiDrivingBehaviour => "open_api.driving_behaviour",
            Scope::OpenApiOrganization => "open_api.organization",
            Scope::OpenApiSandbox => "open_api.sandbox",
            Scope::OpenApiSandboxEquipment => "open_api.sandbox.equipment",
            Scope::OpenApiSandboxVehicles => "open_api.sandbox.vehicles",
            Scope::OpenApiSandboxTrips => "open_api.sandbox.trips",
            Scope::OpenApiSandboxDrivingBehaviour => "open_api.sandbox.driving_behaviour",
            Scope::OpenApiSandboxOrganization => "open_api.sandbox.organization",
            Scope::OfflineAccess => "offline_access",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| Error::new(ErrorKind::Config(format!("Unknown scope: {s}"))))
    }
}

/// OAuth 2.0 configuration for an ABAX client application.
///
/// `client_secret` is redacted in Debug output.
#[derive(Clone)]
pub struct AuthConfig {
    /// Client ID.
    pub client_id: String,
    client_secret: String,
    /// Redirect URI, required for the authorization code flow.
    pub redirect_uri: Option<String>,
    /// Scopes to request.
    pub scopes: Vec<Scope>,
    /// Identity server base URL.
    pub identity_url: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("identity_url", &self.identity_url)
            .finish()
    }
}

impl AuthConfig {
    /// Create a new config with no scopes and the default identity server.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
            scopes: Vec::new(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
        }
    }

    /// Set the redirect URI.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Set the scopes.
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    /// Use a different identity server.
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Space separated scope list, or `None` when no scopes are configured.
    pub fn scope_string(&self) -> Option<String> {
        if self.scopes.is_empty() {
            return None;
        }
        Some(
            self.scopes
                .iter()
                .map(Scope::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ABAX_CLIENT_ID`
    /// - `ABAX_CLIENT_SECRET`
    ///
    /// Optional:
    /// - `ABAX_REDIRECT_URI`
    /// - `ABAX_SCOPES` (space separated)
    /// - `ABAX_IDENTITY_URL` (default: <https://identity.abax.cloud>)
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("ABAX_CLIENT_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("ABAX_CLIENT_ID".to_string())))?;
        let client_secret = std::env::var("ABAX_CLIENT_SECRET")
            .map_err(|_| Error::new(ErrorKind::EnvVar("ABAX_CLIENT_SECRET".to_string())))?;

        let mut config = Self::new(client_id, client_secret);

        if let Ok(uri) = std::env::var("ABAX_REDIRECT_URI") {
            config = config.with_redirect_uri(uri);
        }
        if let Ok(scopes) = std::env::var("ABAX_SCOPES") {
            config.scopes = scopes
                .split_whitespace()
                .map(Scope::from_str)
                .collect::<Result<_>>()?;
        }
        if let Ok(url) = std::env::var("ABAX_IDENTITY_URL") {
            config = config.with_identity_url(url);
        }

        Ok(config)
    }
}

/// Token endpoint client.
#[derive(Clone)]
pub struct OAuthClient {
    config: AuthConfig,
    http_client: reqwest::Client,
}

impl fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(abax_client::USER_AGENT)
            .build()?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create an OAuth client over an existing `reqwest::Client`.
    pub fn with_http_client(config: AuthConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Get the OAuth config.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// URL to send the user to for the authorization code flow.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String> {
        let redirect_uri = self.require_redirect_uri()?;

        let mut url = url::Url::parse(&self.config.identity_url)?.join("/connect/authorize")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.config.client_id)
                .append_pair("response_type", "code")
                .append_pair("redirect_uri", redirect_uri);
            if let Some(scope) = self.config.scope_string() {
                query.append_pair("scope", &scope);
            }
            if let Some(state) = state.filter(|s| !s.is_empty()) {
                query.append_pair("state", state);
            }
        }

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens.
    ///
    /// The code parameter is not logged to prevent credential exposure.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let redirect_uri = self.require_redirect_uri()?;

        let params = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        self.post_token(&params).await
    }

    /// Obtain tokens for the application itself.
    #[instrument(skip(self))]
    pub async fn client_credentials(&self) -> Result<TokenResponse> {
        let scope = self.config.scope_string();

        let mut params = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret()),
        ];
        if let Some(ref scope) = scope {
            params.push(("scope", scope.as_str()));
        }

        self.post_token(&params).await
    }

    /// Refresh an access token using a refresh token.
    ///
    /// The refresh_token parameter is not logged to prevent credential exposure.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret()),
        ];

        self.post_token(&params).await
    }

    fn require_redirect_uri(&self) -> Result<&str> {
        self.config.redirect_uri.as_deref().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "redirect_uri must be set when using authorization code".to_string(),
            ))
        })
    }

    async fn post_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let body = serde_urlencoded::to_string(params)?;

        let response = self
            .http_client
            .post(format!("{}/connect/token", self.config.identity_url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<OAuthErrorResponse>(&bytes) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error.error_description,
                }),
                Err(_) => Error::new(ErrorKind::TokenRequest(status.as_u16())),
            });
        }

        let token: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Error::with_source(ErrorKind::TokenInvalid(e.to_string()), e))?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::new(ErrorKind::TokenInvalid(format!(
                "unsupported token type: {}",
                token.token_type
            ))));
        }

        Ok(token)
    }
}

/// Token response from the identity server.
///
/// Token fields are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Id token, present when the `openid` scope was granted.
    #[serde(default)]
    pub id_token: Option<String>,
    /// Access token.
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
    /// Refresh token, present when `offline_access` was granted.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .finish()
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
