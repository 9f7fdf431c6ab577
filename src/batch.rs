//! Batch orchestration for bulk lookups.
//!
//! Splits a large identifier list into contiguous fixed-size batches and
//! dispatches them under a shared counting gate ([`tokio::sync::Semaphore`])
//! so that at most `max_concurrency` batch requests are in flight at once.
//! Results merge associatively into one map, so the outcome does not depend
//! on batch completion order.
//!
//! Failure policy: any batch failing (after its own retries) fails the
//! whole orchestration. The first error cancels the remaining in-flight
//! batch futures; no retries run after cancellation. The policy is uniform
//! across all bulk operations.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use futures_util::future::try_join_all;
use tokio::sync::Semaphore;

use crate::{FutmarketError, Result};

/// Default number of identifiers per upstream request.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Default maximum concurrently in-flight batches.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Fetch values for `ids` in batches of at most `batch_size`, running at
/// most `gate.available_permits()`-bounded batches concurrently, and merge
/// the partial maps.
///
/// The gate is shared: overlapping orchestrations holding the same
/// semaphore share one in-flight bound. Identifier order within a batch is
/// preserved from the input; the merged map is independent of completion
/// order. Callers are responsible for mapping identifiers absent from the
/// merged result to their default values.
pub(crate) async fn fetch_many<K, V, F, Fut>(
    ids: &[K],
    batch_size: usize,
    gate: &Arc<Semaphore>,
    fetch_batch: F,
) -> Result<HashMap<K, V>>
where
    K: Clone + Eq + Hash,
    F: Fn(Vec<K>) -> Fut,
    Fut: Future<Output = Result<HashMap<K, V>>>,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let fetch_batch = &fetch_batch;
    let batches = ids.chunks(batch_size.max(1)).map(|batch| {
        let batch = batch.to_vec();
        let gate = Arc::clone(gate);
        async move {
            let _permit = gate
                .acquire_owned()
                .await
                .map_err(|_| FutmarketError::ConnectionFailed("concurrency gate closed".into()))?;
            fetch_batch(batch).await
        }
    });

    let partials = try_join_all(batches).await?;

    let mut merged = HashMap::with_capacity(ids.len());
    for partial in partials {
        merged.extend(partial);
    }
    Ok(merged)
}
