//! Stored ABAX credentials.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::oauth::TokenResponse;

/// Seconds before the real expiry at which a token already counts as expired.
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Credentials issued by the identity server.
///
/// Serializes with camelCase keys so callers can persist them. Token fields
/// are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbaxCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AbaxCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbaxCredentials")
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AbaxCredentials {
    /// Credentials for a bare access token.
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id_token: None,
            access_token: access_token.into(),
            expires_at,
            token_type: "Bearer".to_string(),
            refresh_token: None,
        }
    }

    /// Attach a refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Build credentials from a token response received at `received_at`.
    pub fn from_token_response(token: TokenResponse, received_at: DateTime<Utc>) -> Self {
        Self {
            id_token: token.id_token,
            access_token: token.access_token,
            expires_at: received_at + TimeDelta::seconds(token.expires_in),
            token_type: token.token_type,
            refresh_token: token.refresh_token,
        }
    }

    /// Returns true if the access token is expired, or about to, at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - TimeDelta::seconds(EXPIRY_LEEWAY_SECS) <= now
    }

    /// Returns true if the access token is expired, or about to.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if a refresh token is available.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
