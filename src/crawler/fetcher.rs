//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the run's proxy installed
//! - Retrying throttled and failing responses with exponential backoff
//! - Classifying response statuses
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 200 | Return the body |
//! | HTTP 429 | Back off, retry |
//! | HTTP 5xx | Back off, retry |
//! | Any other status | Fail immediately |
//! | Connection / body error | Fail immediately |
//! | `max_tries` attempts used | Fail |
//!
//! Every failure is fatal for the crawl: the caller gets a [`FetchError`]
//! and no partial results.

use crate::config::Settings;
use crate::crawler::backoff::BackoffPolicy;
use crate::crawler::throttle::ThrottleGate;
use reqwest::{Client, Proxy, StatusCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default number of attempts per URL
pub const MAX_TRIES: u32 = 10;

/// Unrecoverable fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not retrieve data from `{url}`: HTTP status {status}")]
    Rejected { url: String, status: StatusCode },

    #[error(
        "Could not retrieve data from `{url}` after {attempts} attempts (waited {waited:?}): HTTP status {}",
        status_text(.last_status)
    )]
    Exhausted {
        url: String,
        last_status: Option<StatusCode>,
        attempts: u32,
        waited: Duration,
    },

    #[error("Could not retrieve data from `{url}`: {source}")]
    Transport { url: String, source: reqwest::Error },
}

impl FetchError {
    /// URL of the failing request
    pub fn url(&self) -> &str {
        match self {
            Self::Rejected { url, .. } | Self::Exhausted { url, .. } | Self::Transport { url, .. } => {
                url
            }
        }
    }

    /// Last HTTP status seen, if a response arrived at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Exhausted { last_status, .. } => *last_status,
            Self::Transport { source, .. } => source.status(),
        }
    }
}

fn status_text(status: &Option<StatusCode>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.as_u16().to_string())
}

/// Query parameters for a plain GET
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// How a response status is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Retryable,
    Fatal,
}

/// Classifies a response status
pub fn classify_status(status: StatusCode) -> StatusClass {
    if status == StatusCode::OK {
        StatusClass::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StatusClass::Retryable
    } else {
        StatusClass::Fatal
    }
}

/// Retry-loop state of one fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchAttempt {
    /// 0-based index of the current attempt
    pub index: u32,
    pub last_status: Option<StatusCode>,
    /// Total backoff time so far
    pub waited: Duration,
}

/// Everything a fetch needs, built once per run and shared by reference
pub struct FetchContext {
    client: Client,
    proxy: Option<String>,
    policy: BackoffPolicy,
    max_tries: u32,
    gate: ThrottleGate,
}

impl fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchContext")
            .field("proxy", &self.proxy)
            .field("policy", &self.policy)
            .field("max_tries", &self.max_tries)
            .field("waits", &self.gate.waits())
            .finish()
    }
}

impl FetchContext {
    /// Builds a context from settings, routing every request through `proxy`
    ///
    /// With no proxy, requests go out directly and environment proxy
    /// variables are ignored.
    pub fn new(settings: &Settings, proxy: Option<&str>) -> Result<Self, reqwest::Error> {
        let client = build_http_client(settings, proxy)?;
        Ok(Self::with_client(
            client,
            proxy,
            BackoffPolicy::from_settings(&settings.crawler),
            settings.crawler.max_tries,
        ))
    }

    /// Wraps an already built client
    pub fn with_client(
        client: Client,
        proxy: Option<&str>,
        policy: BackoffPolicy,
        max_tries: u32,
    ) -> Self {
        Self {
            client,
            proxy: proxy.map(str::to_string),
            policy,
            max_tries,
            gate: ThrottleGate::new(),
        }
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Number of backoff waits taken so far in this run
    pub fn backoff_waits(&self) -> u32 {
        self.gate.waits()
    }
}

/// Builds an HTTP client with the user agent, timeouts and proxy installed
pub fn build_http_client(settings: &Settings, proxy: Option<&str>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(settings.user_agent.header_value())
        .timeout(Duration::from_secs(settings.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(settings.crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true);

    builder = match proxy {
        Some(proxy) => builder.proxy(Proxy::all(proxy)?),
        None => builder.no_proxy(),
    };

    builder.build()
}

/// Fetches one page, retrying throttled and failing responses
///
/// Sends a GET to `url` with the given query parameters. Statuses 429 and
/// 5xx back off through the context's throttle gate and retry, up to the
/// context's `max_tries` attempts. A 200 returns the decoded body; anything
/// else fails at once.
///
/// # Arguments
///
/// * `ctx` - The run's fetch context
/// * `url` - The URL to fetch
/// * `params` - Query parameters appended to the URL
///
/// # Returns
///
/// * `Ok(String)` - Body of the 200 response
/// * `Err(FetchError)` - The crawl cannot continue
pub async fn fetch_page<P>(ctx: &FetchContext, url: &str, params: &P) -> Result<String, FetchError>
where
    P: serde::Serialize + ?Sized,
{
    let mut attempt = FetchAttempt::default();

    while attempt.index < ctx.max_tries {
        ctx.gate.pass().await;

        tracing::info!(
            "Fetching data from `{}` using proxy `{}`",
            url,
            ctx.proxy().unwrap_or("none")
        );
        let response = ctx
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        attempt.last_status = Some(status);

        match classify_status(status) {
            StatusClass::Success => {
                return response.text().await.map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
            StatusClass::Retryable => {
                let wait = ctx.policy.wait_time(attempt.index);
                tracing::warn!(
                    "Got HTTP {} from `{}`, waiting {:?} before trying again",
                    status.as_u16(),
                    url,
                    wait
                );
                ctx.gate.backoff(wait).await;
                attempt.waited += wait;
                attempt.index += 1;
            }
            StatusClass::Fatal => {
                return Err(FetchError::Rejected {
                    url: url.to_string(),
                    status,
                });
            }
        }
    }

    Err(FetchError::Exhausted {
        url: url.to_string(),
        last_status: attempt.last_status,
        attempts: attempt.index,
        waited: attempt.waited,
    })
}
