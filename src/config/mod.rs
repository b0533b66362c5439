//! Runtime settings for gh-search
//!
//! Settings come from an optional TOML file. Every key has a default, so an
//! absent file or a partial one is fine.
//!
//! # Example
//!
//! ```no_run
//! use gh_search::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("settings.toml")).unwrap();
//! println!("Max tries: {}", settings.crawler.max_tries);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{CrawlerSettings, Settings, UserAgentSettings};

pub use parser::{load_settings, load_settings_or_default, parse_settings};
