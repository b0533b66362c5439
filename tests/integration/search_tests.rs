use gh_search::config::Settings;
use gh_search::{search, Category, FetchContext, FetchError, ResultRecord, SearchQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings with millisecond backoff so retries finish quickly
fn fast_settings() -> Settings {
    let mut settings = Settings::default();
    settings.crawler.backoff_unit_ms = 1;
    settings
}

fn repo_search_page(paths: &[&str]) -> String {
    let items: String = paths
        .iter()
        .map(|p| {
            format!(
                r#"<li class="repo-list-item hx_hit-repo d-flex">
                     <div class="mt-n1 flex-auto">
                       <div class="f4 text-normal"><a class="v-align-middle" href="{}">{}</a></div>
                     </div>
                   </li>"#,
                p,
                p.trim_start_matches('/')
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="codesearch-results"><div>
             <div class="d-flex">12 repository results</div>
             <ul class="repo-list">{}</ul>
           </div></div></body></html>"#,
        items
    )
}

fn repo_page(language: &str) -> String {
    format!(
        r#"<html><body><div class="BorderGrid">
             <h2 class="h4 mb-3">Languages</h2>
             <div class="mb-2"><span class="Progress"></span></div>
             <ul class="list-style-none">
               <li class="d-inline"><a href="/search?l=x"><span class="text-bold">{}</span> <span>100.0%</span></a></li>
             </ul>
           </div></body></html>"#,
        language
    )
}

#[tokio::test]
async fn test_repository_search_end_to_end() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust+crawler"))
        .and(query_param("type", "repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_search_page(&["/foo/bar"])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/foo/bar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_page("Rust")))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).expect("Failed to build context");
    let query = SearchQuery::new(
        vec!["rust".to_string(), "crawler".to_string()],
        Category::Repositories,
        base_url.clone(),
    );

    let records = search(&ctx, &query).await.expect("Search failed");

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "url": format!("{}/foo/bar", base_url),
            "extra": {"owner": "foo", "language_stats": {"Rust": 100.0}}
        }])
    );
}

#[tokio::test]
async fn test_repository_search_keeps_link_order() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_search_page(&[
            "/alice/one",
            "/bob/two",
            "/carol/three",
        ])))
        .mount(&server)
        .await;

    for (repo, language, delay_ms) in [
        ("/alice/one", "Go", 80),
        ("/bob/two", "C", 0),
        ("/carol/three", "Zig", 40),
    ] {
        Mock::given(method("GET"))
            .and(path(repo))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(repo_page(language))
                    .set_delay(std::time::Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["x".to_string()], Category::Repositories, base_url.clone());
    let records = search(&ctx, &query).await.unwrap();

    let owners: Vec<&str> = records
        .iter()
        .map(|r| r.extra.as_ref().unwrap().owner.as_str())
        .collect();
    assert_eq!(owners, vec!["alice", "bob", "carol"]);

    let languages: Vec<Vec<&String>> = records
        .iter()
        .map(|r| r.extra.as_ref().unwrap().language_stats.keys().collect())
        .collect();
    assert_eq!(languages, vec![vec!["Go"], vec!["C"], vec!["Zig"]]);
}

#[tokio::test]
async fn test_repository_without_languages_gets_empty_stats() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_search_page(&["/foo/empty"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foo/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>No code yet</body></html>"))
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["x".to_string()], Category::Repositories, base_url);
    let records = search(&ctx, &query).await.unwrap();

    assert_eq!(records.len(), 1);
    let extra = records[0].extra.as_ref().unwrap();
    assert_eq!(extra.owner, "foo");
    assert!(extra.language_stats.is_empty());
}

#[tokio::test]
async fn test_issue_search_skips_secondary_fetch() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let page = r#"
        <div class="codesearch-results">
          <div id="issue-search-results">
            <div class="issue-list">
              <div>
                <div class="issue-list-item hx_hit-issue">
                  <div class="f4 text-normal"><a href="/foo/bar/issues/7">Crash on start</a></div>
                </div>
                <div class="issue-list-item hx_hit-issue">
                  <div class="f4 text-normal"><a href="/baz/qux/pull/3">Fix crash</a></div>
                </div>
              </div>
            </div>
          </div>
        </div>
    "#;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "issues"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["crash".to_string()], Category::Issues, base_url.clone());
    let records = search(&ctx, &query).await.unwrap();

    assert_eq!(
        records,
        vec![
            ResultRecord::link_only(format!("{}/foo/bar/issues/7", base_url)),
            ResultRecord::link_only(format!("{}/baz/qux/pull/3", base_url)),
        ]
    );
    // only the search page was requested
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_wiki_search_records_have_no_extra() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let page = r#"
        <div class="codesearch-results">
          <div id="wiki_search_results">
            <div>
              <div class="hx_hit-wiki"><div class="f4"><a href="/foo/bar/wiki/Home">Home</a></div></div>
            </div>
          </div>
        </div>
    "#;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["home".to_string()], Category::Wikis, base_url.clone());
    let records = search(&ctx, &query).await.unwrap();

    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        serde_json::json!([{"url": format!("{}/foo/bar/wiki/Home", base_url)}])
    );
}

#[tokio::test]
async fn test_search_page_throttled_then_served() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("wait for it"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("wait more"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_search_page(&[
            "/foo", "/bar", "/qux",
        ])))
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["foo".to_string(), "bar".to_string()], Category::Wikis, base_url);
    // the wiki locator finds nothing on a repository page
    let records = search(&ctx, &query).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(ctx.backoff_waits(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_page_not_found_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["x".to_string()], Category::Repositories, server.uri());
    let err = search(&ctx, &query).await.unwrap_err();

    assert!(matches!(err, FetchError::Rejected { .. }));
    assert!(err.url().ends_with("/search"));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn test_failing_repository_page_aborts_search() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_search_page(&[
            "/foo/ok",
            "/foo/broken",
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foo/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string(repo_page("Go")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/foo/broken"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let ctx = FetchContext::new(&fast_settings(), None).unwrap();
    let query = SearchQuery::new(vec!["x".to_string()], Category::Repositories, base_url);
    let err = search(&ctx, &query).await.unwrap_err();

    assert!(err.url().ends_with("/foo/broken"));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
}
