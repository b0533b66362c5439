//! Concurrent page fetching
//!
//! All pages are fetched at once, multiplexed on the calling task. They share
//! the context's throttle gate, so one throttled response pauses the whole
//! batch while it backs off.

use crate::crawler::fetcher::{fetch_page, FetchContext, FetchError, NO_PARAMS};
use crate::model::Link;
use futures::future::try_join_all;

/// Fetches every URL concurrently
///
/// The output has one body per input URL, in input order. The first fatal
/// fetch failure aborts the batch; unfinished requests are dropped.
///
/// # Arguments
///
/// * `ctx` - The run's fetch context
/// * `urls` - Pages to fetch
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Page bodies, positionally matching `urls`
/// * `Err(FetchError)` - One of the pages could not be fetched
pub async fn fetch_all(ctx: &FetchContext, urls: &[Link]) -> Result<Vec<String>, FetchError> {
    tracing::debug!("Fetching {} pages concurrently", urls.len());

    let pages = try_join_all(urls.iter().map(|url| fetch_page(ctx, url, NO_PARAMS))).await?;

    tracing::debug!(
        "Fetched {} pages ({} backoff waits so far)",
        pages.len(),
        ctx.backoff_waits()
    );
    Ok(pages)
}
