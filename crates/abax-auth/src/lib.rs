//! # abax-auth
//!
//! ABAX identity support: OAuth 2.0 token flows and credential upkeep.
//!
//! ## Security
//!
//! - Client secrets and tokens are redacted in Debug output
//! - Tracing spans skip authorization codes and tokens
//! - Refreshes are serialized, so a single-use refresh token is spent once
//!
//! ## Supported Flows
//!
//! - **Authorization code** - build the login URL, exchange the returned code
//! - **Client credentials** - application access without a user
//! - **Refresh token** - renew expired user credentials
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use abax_auth::{AbaxAuth, AuthConfig, Scope};
//! use abax_client::Credential;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), abax_auth::Error> {
//!     let config = AuthConfig::new("client-id", "client-secret")
//!         .with_scopes([Scope::OpenApi, Scope::OpenApiTrips]);
//!     let auth = Arc::new(AbaxAuth::new(config)?);
//!     auth.credentials_from_client_credentials().await?;
//!
//!     // Every API call now asks `auth` for a fresh access token.
//!     let credential = Credential::shared(auth.clone());
//!     Ok(())
//! }
//! ```

mod auth;
mod credentials;
mod error;
mod oauth;
mod profile;

pub use auth::AbaxAuth;
pub use credentials::{AbaxCredentials, EXPIRY_LEEWAY_SECS};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{AuthConfig, OAuthClient, Scope, TokenResponse, DEFAULT_IDENTITY_URL};
pub use profile::{decode_profile, AbaxProfile};
