//! HTML extraction for search results and repository pages
//!
//! This module handles two kinds of pages:
//! - Search result pages, from which result links are collected
//! - Repository pages, from which the language breakdown is read
//!
//! GitHub's markup changes without notice, so nothing here fails. A missing
//! piece of structure yields an empty or partial result. Absences that are
//! normal (a repository without a language breakdown) are silent; absences
//! that point at changed markup are logged as warnings.

use crate::model::{Category, LanguageStats, Link};
use scraper::{ElementRef, Html, Selector};

/// Extracts result links from a search results page
///
/// # Expected Structure
///
/// ```html
/// <div class="codesearch-results">
///   ...hit list for the category...
///     <li class="repo-list-item hx_hit-repo">
///       <div class="f4"><a href="/owner/name">owner/name</a></div>
///     </li>
/// </div>
/// ```
///
/// Hits whose link cannot be found are skipped, so the output may be shorter
/// than the number of hits.
///
/// # Arguments
///
/// * `html` - The search results page
/// * `category` - Which hit list to look for
/// * `base_url` - Site URL prefixed to each result path
///
/// # Example
///
/// ```
/// use gh_search::crawler::extract_links;
/// use gh_search::Category;
///
/// let html = r#"<div class="codesearch-results"><ul class="repo-list">
///     <li class="hx_hit-repo"><div class="f4"><a href="/foo/bar">foo/bar</a></div></li>
/// </ul></div>"#;
/// let links = extract_links(html, Category::Repositories, "https://github.com");
/// assert_eq!(links, vec!["https://github.com/foo/bar".to_string()]);
/// ```
pub fn extract_links(html: &str, category: Category, base_url: &str) -> Vec<Link> {
    let document = Html::parse_document(html);

    let Some(results) = find_results_container(&document) else {
        tracing::warn!("Search page has no results container, no links extracted");
        return Vec::new();
    };

    let hits = match category {
        Category::Repositories => find_repo_hits(results),
        Category::Issues => find_issue_hits(results),
        Category::Wikis => find_wiki_hits(results),
    };

    let base_url = base_url.trim_end_matches('/');
    hits.into_iter()
        .filter_map(|hit| extract_hit_link(hit, base_url))
        .collect()
}

/// Extracts the language breakdown from a repository page
///
/// # Expected Structure
///
/// ```html
/// <h2>Languages</h2>
/// <div>...</div>
/// <ul>
///   <li><a><span>Rust</span> <span>92.5%</span></a></li>
///   <li><span><span>Other</span> <span>7.5%</span></span></li>
/// </ul>
/// ```
///
/// A page without the heading gives an empty map and no warning. Entries
/// that don't parse are skipped.
///
/// # Example
///
/// ```
/// use gh_search::crawler::extract_language_stats;
///
/// let html = "<h2>Languages</h2><ul><li><a><span>Go</span><span>100%</span></a></li></ul>";
/// let stats = extract_language_stats(html);
/// assert_eq!(stats.get("Go"), Some(&100.0));
/// ```
pub fn extract_language_stats(html: &str) -> LanguageStats {
    let document = Html::parse_document(html);

    let Some(list) = find_language_list(&document) else {
        return LanguageStats::new();
    };

    let Ok(item_selector) = Selector::parse("li") else {
        return LanguageStats::new();
    };

    list.select(&item_selector)
        .filter_map(parse_language_entry)
        .collect()
}

/// Finds the `div.codesearch-results` wrapper of all hits
///
/// Absence means the page layout changed (or this isn't a results page).
fn find_results_container(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("div.codesearch-results").ok()?;
    document.select(&selector).next()
}

/// Repository hits: `ul.repo-list > li.hx_hit-repo`
fn find_repo_hits(results: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    find_hits(results, "ul.repo-list", "li.hx_hit-repo")
}

/// Issue hits: `div.issue-list` → `div.hx_hit-issue`
fn find_issue_hits(results: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    find_hits(results, "div.issue-list", "div.hx_hit-issue")
}

/// Wiki hits: `div#wiki_search_results` → `div.hx_hit-wiki`
fn find_wiki_hits(results: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    find_hits(results, "div#wiki_search_results", "div.hx_hit-wiki")
}

/// Collects `item` elements inside the first `list` element
///
/// A missing list is unexpected and logged; an empty list is not.
fn find_hits<'a>(results: ElementRef<'a>, list: &str, item: &str) -> Vec<ElementRef<'a>> {
    let (Ok(list_selector), Ok(item_selector)) = (Selector::parse(list), Selector::parse(item))
    else {
        return Vec::new();
    };

    match results.select(&list_selector).next() {
        Some(hit_list) => hit_list.select(&item_selector).collect(),
        None => {
            tracing::warn!("Results container has no `{}` hit list", list);
            Vec::new()
        }
    }
}

/// Reads the link of one hit: the first `a[href]` inside `div.f4`
fn extract_hit_link(hit: ElementRef<'_>, base_url: &str) -> Option<Link> {
    let wrapper_selector = Selector::parse("div.f4").ok()?;
    let anchor_selector = Selector::parse("a[href]").ok()?;

    let href = hit
        .select(&wrapper_selector)
        .next()
        .and_then(|wrapper| wrapper.select(&anchor_selector).next())
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty());

    match href {
        Some(href) => Some(format!("{}{}", base_url, href)),
        None => {
            tracing::warn!("Skipping a search hit without a link: {}", snippet(hit));
            None
        }
    }
}

/// Finds the first `ul` after the "Languages" heading
///
/// No heading: the repository simply has no breakdown (silent). Heading
/// without a list: the layout changed (logged).
fn find_language_list(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("h2, ul").ok()?;

    // select() walks the tree in document order
    let mut elements = document
        .select(&selector)
        .skip_while(|element| !is_languages_heading(*element));

    elements.next()?;

    let list = elements.find(|element| element.value().name() == "ul");
    if list.is_none() {
        tracing::warn!("Found a `Languages` heading but no list after it");
    }
    list
}

// Whitespace around the heading text is tolerated
fn is_languages_heading(element: ElementRef<'_>) -> bool {
    element.value().name() == "h2" && element.text().collect::<String>().trim() == "Languages"
}

/// Parses one `<li>` into `(language, percent)`
///
/// The two `<span>`s sit inside a wrapping `<a>` or `<span>`, or directly in
/// the item.
fn parse_language_entry(item: ElementRef<'_>) -> Option<(String, f64)> {
    let wrapper_selector = Selector::parse("a, span").ok()?;
    let span_selector = Selector::parse("span").ok()?;

    let Some(wrapper) = item.select(&wrapper_selector).next() else {
        tracing::warn!("Language entry has no content: {}", snippet(item));
        return None;
    };

    let mut spans: Vec<ElementRef<'_>> = wrapper.select(&span_selector).collect();
    if spans.is_empty() {
        // the wrapper was itself the first of two bare spans
        spans = item
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "span")
            .collect();
    }

    let [name, value] = spans.as_slice() else {
        tracing::warn!(
            "Language entry has {} spans, expected 2: {}",
            spans.len(),
            snippet(item)
        );
        return None;
    };

    let name = name.text().collect::<String>().trim().to_string();
    let value = value.text().collect::<String>();

    match parse_percentage(&value) {
        Some(percent) => Some((name, percent)),
        None => {
            tracing::warn!(
                "Language `{}` has a non-numeric share `{}`",
                name,
                value.trim()
            );
            None
        }
    }
}

/// Parses `"92.5%"` (or `"92.5"`) into `92.5`
fn parse_percentage(text: &str) -> Option<f64> {
    text.replace('%', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Short, single-line rendering of an element for diagnostics
fn snippet(element: ElementRef<'_>) -> String {
    let html = element.html();
    let flat = html.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(120) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
