//! ABAX Open API client.
//!
//! This client wraps `RequestExecutor` from `abax-client` and provides
//! typed methods for every supported endpoint.

use abax_client::{
    fetch_all_pages, CallDescriptor, ClientConfig, Credential, Page, ReqwestTransport,
    RequestExecutor, Result, Transport, MAX_PAGE_SIZE, PAGE_SIZE_ALL,
};
use tracing::debug;

mod capabilities;
mod equipment;
mod trips;
mod usage;
mod vehicles;

/// Input of a paged listing.
pub(crate) trait PagedInput: Clone {
    /// Requested page size, if any. [`PAGE_SIZE_ALL`] asks for every page.
    fn page_size(&self) -> Option<u32>;

    /// The same query for one explicit page.
    fn at_page(&self, page: u32, page_size: u32) -> Self;
}

/// ABAX Open API client.
///
/// Provides typed methods for:
/// - Vehicles
/// - Trips, trip expenses and odometer readings
/// - Equipment and equipment usage logs
/// - Vehicle usage summaries
/// - API capabilities
///
/// Paged listings fetch every page when asked for a page size of
/// [`PAGE_SIZE_ALL`]. Calls taking trip ids split them into requests of at
/// most 150 ids.
///
/// # Example
///
/// ```rust,ignore
/// use abax_api::{AbaxClient, ListTripsInput};
/// use chrono::NaiveDate;
///
/// let client = AbaxClient::new("api-key")?;
///
/// let trips = client
///     .list_trips(ListTripsInput::new(from, to).all())
///     .await?;
///
/// let ids: Vec<String> = trips.items.iter().map(|t| t.id.clone()).collect();
/// let expenses = client.list_trip_expenses(&ids).await?;
/// ```
pub struct AbaxClient<T: Transport = ReqwestTransport> {
    executor: RequestExecutor<T>,
}

impl<T: Transport> Clone for AbaxClient<T> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
        }
    }
}

impl<T: Transport> std::fmt::Debug for AbaxClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbaxClient")
            .field("executor", &self.executor)
            .finish()
    }
}

impl AbaxClient<ReqwestTransport> {
    /// Create a production client authenticated with an API key or a
    /// token provider.
    pub fn new(credential: impl Into<Credential>) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credential)
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(config: ClientConfig, credential: impl Into<Credential>) -> Result<Self> {
        Ok(Self::from_executor(RequestExecutor::new(config, credential)?))
    }

    /// Create a client from `ABAX_ENVIRONMENT`, `ABAX_API_URL` and `ABAX_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?, Credential::from_env()?)
    }
}

impl<T: Transport> AbaxClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, config: ClientConfig, credential: impl Into<Credential>) -> Self {
        Self::from_executor(RequestExecutor::with_transport(transport, config, credential))
    }

    /// Create a client from an existing executor.
    pub fn from_executor(executor: RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Run a paged listing, walking every page for [`PAGE_SIZE_ALL`].
    pub(crate) async fn list_paged<I, O>(
        &self,
        descriptor: &CallDescriptor<I, Page<O>>,
        input: &I,
    ) -> Result<Page<O>>
    where
        I: PagedInput + Sync,
    {
        if input.page_size() != Some(PAGE_SIZE_ALL) {
            return self.executor.call(descriptor, input).await;
        }

        debug!(path = descriptor.path_label(), "Fetching every page");
        let items = fetch_all_pages(MAX_PAGE_SIZE, |page, page_size| {
            let input = input.at_page(page, page_size);
            async move { self.executor.call(descriptor, &input).await }
        })
        .await?;

        Ok(Page::all(items))
    }
}
