//! # abax-client
//!
//! Core HTTP machinery for the ABAX fleet telemetry API.
//!
//! This crate provides:
//! - A request executor that retries rate-limited (HTTP 429) calls, waiting
//!   until the `X-Rate-Limit-Reset` instant, for up to four attempts
//! - Tagged classification of every HTTP exchange into success, rate limited
//!   or rejected, with 401 and 400 mapped to dedicated errors
//! - Static or provider-backed bearer credentials
//! - Declarative call descriptors for endpoints
//! - Batching of id lists (at most 150 per request) and "fetch all" pagination
//! - A pluggable transport, with a reqwest implementation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (abax-api endpoints, abax-auth token exchange)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              run_batched / fetch_all_pages                  │
//! │  - Split id lists, walk pages, keep input order             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   RequestExecutor                           │
//! │  - Resolves the credential once per call                    │
//! │  - Outcome classification + rate-limit retry loop           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Transport                              │
//! │  - ReqwestTransport in production, injectable in tests      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use abax_client::{CallDescriptor, ClientConfig, Credential, Page, QueryParams, RequestExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), abax_client::Error> {
//!     let executor = RequestExecutor::new(ClientConfig::from_env()?, Credential::from_env()?)?;
//!
//!     let vehicles = CallDescriptor::<u32, _>::get("v1/vehicles")
//!         .query(|page| QueryParams::new().push("page", page))
//!         .parse_json::<Page<serde_json::Value>>();
//!
//!     let page = executor.call(&vehicles, &1).await?;
//!     println!("{} vehicles", page.items.len());
//!     Ok(())
//! }
//! ```

mod batch;
pub mod casing;
mod config;
mod credential;
mod descriptor;
mod error;
mod executor;
mod outcome;
mod pagination;
mod query;
mod request;
mod response;
mod retry;
mod transport;

pub use batch::{batch_count, run_batched, BatchMode, MAX_BATCH_SIZE};
pub use config::{
    ClientConfig, ClientConfigBuilder, Environment, PRODUCTION_API_URL, SANDBOX_API_URL,
};
pub use credential::{Credential, TokenProvider, API_KEY_ENV};
pub use descriptor::{CallDescriptor, CallDescriptorBuilder, PathSpec};
pub use error::{Error, ErrorKind, Result};
pub use executor::RequestExecutor;
pub use outcome::{Outcome, Rejection};
pub use pagination::{fetch_all_pages, ItemList, Page, MAX_PAGE_SIZE, PAGE_SIZE_ALL};
pub use query::QueryParams;
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, ApiError, HttpResponse, RATE_LIMIT_RESET_HEADER};
pub use retry::{start_of_next_minute, wait_until, RetryConfig, RetryState, DEFAULT_MAX_ATTEMPTS};
pub use transport::{ReqwestTransport, Transport};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("abax-rust-sdk/", env!("CARGO_PKG_VERSION"));
