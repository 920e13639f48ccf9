//! Paged listings and the "fetch all" helper.

use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Page size sentinel meaning "every page". Never sent to the API.
pub const PAGE_SIZE_ALL: u32 = 0;

/// Largest page the ABAX API serves.
pub const MAX_PAGE_SIZE: u32 = 1500;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Page<T> {
    pub page: u32,
    #[serde(alias = "pageSize")]
    pub page_size: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// The page returned for a "fetch all" request: page 1, size 0, every item.
    pub fn all(items: Vec<T>) -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE_ALL,
            items,
        }
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// An unpaged `{ items: [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

/// Fetch pages `1, 2, ...` of size `page_size` until one comes back short,
/// and return every item in page order.
///
/// Termination relies on the API returning a short page at the end. A
/// listing that is an exact multiple of `page_size` costs one extra request
/// that returns an empty page.
pub async fn fetch_all_pages<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    if page_size == PAGE_SIZE_ALL {
        return Err(Error::new(ErrorKind::InvalidInput(
            "page size must be at least 1 when fetching all pages".to_string(),
        )));
    }

    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let result = fetch(page, page_size).await?;
        let received = result.items.len();
        items.extend(result.items);

        debug!(page, received, total = items.len(), "Fetched page");

        if received < page_size as usize {
            return Ok(items);
        }
        page += 1;
    }
}
