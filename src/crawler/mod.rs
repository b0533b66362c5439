//! Crawler module for fetching and extracting search results
//!
//! This module contains the core crawling logic, including:
//! - Truncated exponential backoff
//! - HTTP fetching with retries, single and concurrent
//! - A throttle gate that pauses all fetches while one backs off
//! - HTML extraction of result links and language statistics
//! - Overall search coordination

mod backoff;
mod concurrent;
mod coordinator;
mod fetcher;
mod parser;
mod throttle;

pub use backoff::{backoff_units, BackoffPolicy, MAX_BACKOFF};
pub use concurrent::fetch_all;
pub use coordinator::{owner_of, search};
pub use fetcher::{
    build_http_client, classify_status, fetch_page, FetchAttempt, FetchContext, FetchError,
    StatusClass, MAX_TRIES, NO_PARAMS,
};
pub use parser::{extract_language_stats, extract_links};
pub use throttle::ThrottleGate;
