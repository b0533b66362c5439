//! Search query and result types

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An absolute result URL
pub type Link = String;

/// Language name → share of the repository, in percent
pub type LanguageStats = BTreeMap<String, f64>;

/// The kind of search result being crawled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Repositories,
    Issues,
    Wikis,
}

impl Category {
    /// Value of the `type` query parameter on the search endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repositories => "repositories",
            Self::Issues => "issues",
            Self::Wikis => "wikis",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses a category name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "repositories" => Ok(Self::Repositories),
            "issues" => Ok(Self::Issues),
            "wikis" => Ok(Self::Wikis),
            _ => Err(s.to_string()),
        }
    }
}

/// One search to run against the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: Vec<String>,
    category: Category,
    base_url: String,
}

impl SearchQuery {
    /// Creates a query; a trailing slash on `base_url` is dropped
    pub fn new(keywords: Vec<String>, category: Category, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            keywords,
            category,
            base_url,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Keywords joined with `+`, as sent in the `q` parameter
    pub fn joined_keywords(&self) -> String {
        self.keywords.join("+")
    }

    /// URL of the search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Query parameters for the search endpoint
    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("q", self.joined_keywords()),
            ("type", self.category.as_str().to_string()),
        ]
    }
}

/// Extra data attached to repository results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoExtra {
    pub owner: String,
    pub language_stats: LanguageStats,
}

/// One crawled search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub url: Link,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<RepoExtra>,
}

impl ResultRecord {
    /// A bare result, used for issues and wikis
    pub fn link_only(url: Link) -> Self {
        Self { url, extra: None }
    }

    /// A repository result with owner and language breakdown
    pub fn repository(url: Link, owner: String, language_stats: LanguageStats) -> Self {
        Self {
            url,
            extra: Some(RepoExtra {
                owner,
                language_stats,
            }),
        }
    }
}
