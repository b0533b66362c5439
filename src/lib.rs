//! gh-search: a GitHub search-results crawler
//!
//! This crate fetches a GitHub search page for a set of keywords, extracts the
//! result links and, for repository searches, visits every repository to read
//! its language breakdown. Fetches retry with truncated exponential backoff;
//! markup extraction degrades to partial results instead of failing.

pub mod config;
pub mod crawler;
pub mod input;
pub mod model;
pub mod output;
pub mod proxy;

use thiserror::Error;

pub use crawler::FetchError;

/// Main error type for gh-search operations
#[derive(Debug, Error)]
pub enum GhSearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings-file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in settings: {0}")]
    InvalidUrl(String),
}

/// Input-file errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Badly formatted JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing needed key in input file: `{0}`")]
    MissingKey(&'static str),

    #[error("Invalid type: `{0}`")]
    InvalidCategory(String),

    #[error("Key `{key}` must be a list of plain values, got {found}")]
    InvalidEntry { key: &'static str, found: String },

    #[error("Proxy list is empty")]
    NoProxies,
}

/// Result type alias for gh-search operations
pub type Result<T> = std::result::Result<T, GhSearchError>;

/// Result type alias for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for input operations
pub type InputResult<T> = std::result::Result<T, InputError>;

// Re-export commonly used types
pub use config::Settings;
pub use crawler::{search, FetchContext};
pub use input::{load_input, SearchInput};
pub use model::{Category, LanguageStats, Link, RepoExtra, ResultRecord, SearchQuery};
pub use proxy::ProxyPool;
