//! # abax-sdk
//!
//! A typed Rust client for the ABAX fleet telemetry API.
//!
//! This library provides typed access to vehicles, trips, equipment and
//! usage data, with rate-limit retries, id batching and "fetch all"
//! pagination built in.
//!
//! ## Security
//!
//! - Tokens and client secrets are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Vendor error messages are sanitized before they are stored on errors
//!
//! ## Crates
//!
//! - **abax-client** - Request executor, retry policy, batching, pagination, transport
//! - **abax-auth** - OAuth 2.0 flows, credential refresh, id token profiles
//! - **abax-api** - Endpoint descriptors, typed models and `AbaxClient`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use abax_sdk::{AbaxAuth, AbaxClient, AuthConfig, Credential, ListTripsInput, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Arc::new(AbaxAuth::new(
//!         AuthConfig::new("client-id", "client-secret")
//!             .with_scopes([Scope::OpenApi, Scope::OpenApiTrips]),
//!     )?);
//!     auth.credentials_from_client_credentials().await?;
//!
//!     let client = AbaxClient::new(Credential::shared(auth))?;
//!     let trips = client
//!         .list_trips(ListTripsInput::new(from, to).all())
//!         .await?;
//!
//!     println!("{} trips", trips.items.len());
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use abax_client as client;

#[cfg(feature = "auth")]
pub use abax_auth as auth;

#[cfg(feature = "api")]
pub use abax_api as api;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use abax_client::{ClientConfig, Credential, Environment, Error, ErrorKind, Page, Result};

#[cfg(feature = "auth")]
pub use abax_auth::{AbaxAuth, AbaxCredentials, AuthConfig, Scope};

#[cfg(feature = "api")]
pub use abax_api::{
    AbaxClient, GetUsageSummaryInput, ListEquipmentInput, ListEquipmentLogsInput,
    ListTripsInput, ListVehiclesInput,
};
