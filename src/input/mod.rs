//! Input file loading
//!
//! The input file is a JSON object naming the search keywords, the proxies
//! to choose from and the result category:
//!
//! ```json
//! {
//!   "keywords": ["openstack", "nova", "css"],
//!   "proxies": ["194.126.37.94:8080", "13.78.125.167:8080"],
//!   "type": "Repositories"
//! }
//! ```

mod loader;

pub use loader::{load_input, parse_input};

use crate::model::{Category, SearchQuery};

/// Validated contents of an input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub keywords: Vec<String>,
    /// Never empty
    pub proxies: Vec<String>,
    pub category: Category,
}

impl SearchInput {
    /// Builds the query to run against `base_url`
    pub fn query(&self, base_url: &str) -> SearchQuery {
        SearchQuery::new(self.keywords.clone(), self.category, base_url)
    }
}
