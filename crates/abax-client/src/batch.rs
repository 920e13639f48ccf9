//! Splitting oversized id lists into bounded requests.

use futures::future::try_join_all;
use std::future::Future;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Maximum number of identifiers the ABAX API accepts in one list parameter.
pub const MAX_BATCH_SIZE: usize = 150;

/// How the batches of one logical call are dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Await each batch before starting the next.
    #[default]
    Sequential,
    /// Start every batch at once.
    Concurrent,
}

/// Number of requests needed for `len` items at `limit` per request.
pub fn batch_count(len: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    len.div_ceil(limit)
}

/// Run `fetch` once per contiguous chunk of at most `limit` items and
/// concatenate the results in chunk order.
///
/// Empty input returns an empty list without calling `fetch`. The first
/// failing chunk fails the whole call; no partial results are returned.
pub async fn run_batched<'a, T, R, F, Fut>(
    items: &'a [T],
    limit: usize,
    mode: BatchMode,
    fetch: F,
) -> Result<Vec<R>>
where
    F: Fn(&'a [T]) -> Fut,
    Fut: Future<Output = Result<Vec<R>>>,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    if limit == 0 {
        return Err(Error::new(ErrorKind::InvalidInput(
            "batch limit must be at least 1".to_string(),
        )));
    }

    debug!(
        items = items.len(),
        batches = batch_count(items.len(), limit),
        ?mode,
        "Dispatching batched call"
    );

    match mode {
        BatchMode::Sequential => {
            let mut results = Vec::with_capacity(items.len());
            for chunk in items.chunks(limit) {
                results.extend(fetch(chunk).await?);
            }
            Ok(results)
        }
        BatchMode::Concurrent => {
            let per_chunk = try_join_all(items.chunks(limit).map(&fetch)).await?;
            Ok(per_chunk.into_iter().flatten().collect())
        }
    }
}
