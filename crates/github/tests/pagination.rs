//! HTTP-level tests of the octocrab-backed listings against a mock GitHub.

use serde_json::json;
use shipnotes_github::{
    Error, GitHubClient, IssueState, collect_issues_by_milestone, find_milestone_by_title,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MILESTONES: &str = "/repos/octo/widgets/milestones";
const ISSUES: &str = "/repos/octo/widgets/issues";

async fn client(server: &MockServer, per_page: u8) -> GitHubClient {
    GitHubClient::with_base_uri(None, &server.uri())
        .await
        .unwrap()
        .with_per_page(per_page)
}

fn next_link(server: &MockServer, route: &str, query: &str) -> String {
    format!("<{}{route}?{query}>; rel=\"next\"", server.uri())
}

fn milestone(id: u64, title: &str) -> serde_json::Value {
    json!({ "id": id, "number": id, "title": title, "state": "closed" })
}

fn issue(number: u64, closed_at: Option<&str>) -> serde_json::Value {
    json!({
        "id": 1000 + number,
        "number": number,
        "title": format!("Issue {number}"),
        "state": if closed_at.is_some() { "closed" } else { "open" },
        "closed_at": closed_at,
    })
}

// ── Milestones ──────────────────────────────────────────────────

#[tokio::test]
async fn milestone_lookup_follows_next_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "1"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([milestone(1, "v1.0")]))
                .insert_header(
                    "link",
                    next_link(&server, MILESTONES, "state=all&per_page=1&page=2"),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([milestone(2, "v2.0")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 1).await;
    let found = find_milestone_by_title(&client, "octo", "widgets", "v2.0")
        .await
        .unwrap()
        .expect("v2.0 is on the second page");

    assert_eq!(found.id, 2);
    assert_eq!(found.title, "v2.0");
}

#[tokio::test]
async fn milestone_lookup_stops_at_last_page() {
    let server = MockServer::start().await;

    // No link header: the first page is also the last one
    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([milestone(1, "v1.0")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 100).await;
    let found = find_milestone_by_title(&client, "octo", "widgets", "v3.0")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn milestone_lookup_does_not_fetch_past_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([milestone(1, "v1.0")]))
                .insert_header(
                    "link",
                    next_link(&server, MILESTONES, "state=all&per_page=100&page=2"),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server, 100).await;
    let found = find_milestone_by_title(&client, "octo", "widgets", "v1.0")
        .await
        .unwrap();

    assert_eq!(found.map(|m| m.id), Some(1));
}

#[tokio::test]
async fn rate_limit_response_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MILESTONES))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({
                    "message": "API rate limit exceeded for 127.0.0.1.",
                    "documentation_url": "https://docs.github.com/rest/rate-limit"
                }))
                .insert_header("x-ratelimit-remaining", "0"),
        )
        .mount(&server)
        .await;

    let client = client(&server, 100).await;
    let err = find_milestone_by_title(&client, "octo", "widgets", "v1.0")
        .await
        .unwrap_err();

    match err {
        Error::Api(octocrab::Error::GitHub { source, .. }) => {
            assert_eq!(source.status_code.as_u16(), 403);
            assert_eq!(source.message, "API rate limit exceeded for 127.0.0.1.");
            assert_eq!(
                source.documentation_url.as_deref(),
                Some("https://docs.github.com/rest/rate-limit")
            );
        }
        other => panic!("expected the GitHub error unchanged, got {other:?}"),
    }
}

// ── Issues ──────────────────────────────────────────────────────

#[tokio::test]
async fn issue_collection_sends_filters_and_concatenates_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES))
        .and(query_param("milestone", "7"))
        .and(query_param("state", "closed"))
        .and(query_param("since", "2024-01-15T10:00:00+02:00"))
        .and(query_param("per_page", "2"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    issue(1, Some("2024-01-10T00:00:00Z")),
                    issue(2, Some("2024-02-01T00:00:00Z")),
                ]))
                .insert_header("link", next_link(&server, ISSUES, "milestone=7&page=2")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ISSUES))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue(3, Some("2024-03-01T00:00:00Z"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 2).await;
    let issues = collect_issues_by_milestone(
        &client,
        "octo",
        "widgets",
        7,
        Some(IssueState::Closed),
        Some("2024-01-15T10:00:00+02:00"),
    )
    .await
    .unwrap();

    let numbers: Vec<u64> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![2, 3]);
}

#[tokio::test]
async fn issue_collection_omits_unset_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES))
        .and(query_param("milestone", "7"))
        .and(query_param_is_missing("state"))
        .and(query_param_is_missing("since"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue(1, None), issue(2, None)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 100).await;
    let issues = collect_issues_by_milestone(&client, "octo", "widgets", 7, None, None)
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
}

#[tokio::test]
async fn failed_later_page_fails_the_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([issue(1, None)]))
                .insert_header("link", next_link(&server, ISSUES, "milestone=7&page=2")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ISSUES))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let client = client(&server, 100).await;
    let err = collect_issues_by_milestone(&client, "octo", "widgets", 7, None, None)
        .await
        .unwrap_err();

    match err {
        Error::Api(octocrab::Error::GitHub { source, .. }) => {
            assert_eq!(source.status_code.as_u16(), 404);
            assert_eq!(source.message, "Not Found");
        }
        other => panic!("expected the GitHub error unchanged, got {other:?}"),
    }
}
