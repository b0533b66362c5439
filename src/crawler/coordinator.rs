//! Search coordinator - ties fetching and extraction together
//!
//! A search runs in two phases:
//! 1. Fetch the search results page and extract the result links
//! 2. For repository searches, fetch every repository page concurrently and
//!    read its language breakdown
//!
//! Fetch failures end the search; extraction problems only shrink the result.

use crate::crawler::concurrent::fetch_all;
use crate::crawler::fetcher::{fetch_page, FetchContext, FetchError};
use crate::crawler::parser::{extract_language_stats, extract_links};
use crate::model::{Category, Link, ResultRecord, SearchQuery};
use url::Url;

/// Runs a search and collects its results
///
/// # Arguments
///
/// * `ctx` - The run's fetch context
/// * `query` - Keywords, category and site to search
///
/// # Returns
///
/// * `Ok(Vec<ResultRecord>)` - One record per extracted link, in page order
/// * `Err(FetchError)` - A page could not be fetched
///
/// # Example
///
/// ```no_run
/// use gh_search::{search, Category, FetchContext, SearchQuery, Settings};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::default();
/// let ctx = FetchContext::new(&settings, Some("194.126.37.94:8080"))?;
/// let query = SearchQuery::new(
///     vec!["openstack".into(), "nova".into()],
///     Category::Repositories,
///     "https://github.com",
/// );
/// let records = search(&ctx, &query).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search(ctx: &FetchContext, query: &SearchQuery) -> Result<Vec<ResultRecord>, FetchError> {
    tracing::info!(
        "Searching {} for `{}`",
        query.category(),
        query.joined_keywords()
    );

    let page = fetch_page(ctx, &query.search_url(), &query.params()).await?;
    let links = extract_links(&page, query.category(), query.base_url());
    tracing::info!("Found {} result links", links.len());

    let records = match query.category() {
        Category::Repositories => repository_records(ctx, links).await?,
        Category::Issues | Category::Wikis => {
            links.into_iter().map(ResultRecord::link_only).collect()
        }
    };

    Ok(records)
}

/// Fetches every repository page and pairs it with its link
async fn repository_records(
    ctx: &FetchContext,
    links: Vec<Link>,
) -> Result<Vec<ResultRecord>, FetchError> {
    let pages = fetch_all(ctx, &links).await?;

    Ok(links
        .into_iter()
        .zip(pages)
        .map(|(link, page)| {
            let owner = owner_of(&link).unwrap_or_else(|| {
                tracing::warn!("Could not read the owner from `{}`", link);
                String::new()
            });
            let stats = extract_language_stats(&page);
            ResultRecord::repository(link, owner, stats)
        })
        .collect())
}

/// First path segment of a repository link
///
/// `https://github.com/rust-lang/rust` → `rust-lang`. Empty segments from
/// doubled slashes are skipped.
pub fn owner_of(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let owner = url.path_segments()?.find(|segment| !segment.is_empty())?;
    Some(owner.to_string())
}
