//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! the full fetch -> extract -> accumulate -> flush cycle end-to-end.

use leadsift::config::{OutputConfig, UserAgentConfig};
use leadsift::output::write_outputs;
use leadsift::records::{PageKind, Record, WorkItem, SENTINEL};
use leadsift::scrape::{build_http_client, CancelFlag, Pipeline, RateLimiter, RetryPolicy};
use leadsift::state::FailReason;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_pipeline(max_attempts: u32) -> Pipeline {
    let client = build_http_client(
        &UserAgentConfig {
            crawler_name: "TestScraper".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        Duration::from_secs(5),
    )
    .expect("Failed to build client");

    // Tiny delays so tests stay fast
    let limiter = RateLimiter::new(Duration::from_millis(1), Duration::from_millis(2));
    let retry = RetryPolicy::new(max_attempts, Duration::from_millis(5));
    Pipeline::new(client, limiter, retry)
}

fn work_item(base: &str, path: &str, kind: PageKind) -> WorkItem {
    WorkItem::new(
        url::Url::parse(&format!("{}{}", base, path)).expect("Failed to parse URL"),
        kind,
    )
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_profile_with_missing_fields_gets_sentinels() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/a",
        r#"<html><body><h1 class="text-heading-xlarge">Jane Doe</h1></body></html>"#,
    )
    .await;

    let pipeline = test_pipeline(3);
    let items = vec![work_item(&server.uri(), "/a", PageKind::Profile)];
    let run_state = pipeline.run(&items).await;

    assert_eq!(run_state.completed_count(), 1);
    assert_eq!(run_state.failed_count(), 0);

    match &run_state.records()[0] {
        Record::Profile(p) => {
            assert_eq!(p.name, "Jane Doe");
            assert_eq!(p.job_title, SENTINEL);
            assert_eq!(p.location, SENTINEL);
            assert_eq!(p.summary, SENTINEL);
        }
        other => panic!("expected a profile record, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_404_fails_item_and_run_continues() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/good",
        r#"<html><body><h1 class="text-heading-xlarge">Jane Doe</h1></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // 4xx must not be retried
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/also-good",
        r#"<html><body><h1 class="text-heading-xlarge">John Roe</h1></body></html>"#,
    )
    .await;

    let pipeline = test_pipeline(3);
    let base = server.uri();
    let items = vec![
        work_item(&base, "/good", PageKind::Profile),
        work_item(&base, "/missing", PageKind::Profile),
        work_item(&base, "/also-good", PageKind::Profile),
    ];
    let run_state = pipeline.run(&items).await;

    // One bad URL never aborts the run; other items are unaffected
    assert_eq!(run_state.completed_count(), 2);
    assert_eq!(run_state.failed_count(), 1);
    assert_eq!(run_state.total(), items.len());

    let failed_url = url::Url::parse(&format!("{}/missing", base)).unwrap();
    assert_eq!(
        run_state.failure_reason(&failed_url),
        Some(&FailReason::HttpClient(404))
    );
}

#[tokio::test]
async fn test_http_503_retries_then_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3) // Exactly max_attempts requests, no more
        .mount(&server)
        .await;

    let pipeline = test_pipeline(3);
    let items = vec![work_item(&server.uri(), "/flaky", PageKind::Profile)];
    let run_state = pipeline.run(&items).await;

    assert_eq!(run_state.completed_count(), 0);
    let failed_url = url::Url::parse(&format!("{}/flaky", server.uri())).unwrap();
    assert_eq!(
        run_state.failure_reason(&failed_url),
        Some(&FailReason::HttpServer(503))
    );
}

#[tokio::test]
async fn test_transient_failure_recovers_on_retry() {
    let server = MockServer::start().await;
    // First two attempts fail with 503, the third succeeds
    Mock::given(method("GET"))
        .and(path("/recovering"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/recovering"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><h1 class="text-heading-xlarge">Jane Doe</h1></body></html>"#,
        ))
        .mount(&server)
        .await;

    let pipeline = test_pipeline(3);
    let items = vec![work_item(&server.uri(), "/recovering", PageKind::Profile)];
    let run_state = pipeline.run(&items).await;

    assert_eq!(run_state.completed_count(), 1);
    assert_eq!(run_state.failed_count(), 0);
}

#[tokio::test]
async fn test_empty_body_is_parse_failure() {
    let server = MockServer::start().await;
    mount_html(&server, "/blank", "").await;

    let pipeline = test_pipeline(3);
    let items = vec![work_item(&server.uri(), "/blank", PageKind::Company)];
    let run_state = pipeline.run(&items).await;

    assert_eq!(run_state.completed_count(), 0);
    let failed_url = url::Url::parse(&format!("{}/blank", server.uri())).unwrap();
    assert!(matches!(
        run_state.failure_reason(&failed_url),
        Some(FailReason::Parse(_))
    ));
}

#[tokio::test]
async fn test_every_item_reaches_exactly_one_terminal_state() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/p1",
        r#"<html><body><h1 class="text-heading-xlarge">One</h1></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/c1",
        r#"<html><body><h1 class="org-top-card-summary__title">Acme</h1></body></html>"#,
    )
    .await;

    let pipeline = test_pipeline(2);
    let base = server.uri();
    let items = vec![
        work_item(&base, "/p1", PageKind::Profile),
        work_item(&base, "/gone", PageKind::Profile),
        work_item(&base, "/c1", PageKind::Company),
    ];
    let run_state = pipeline.run(&items).await;

    assert_eq!(
        run_state.completed_count() + run_state.failed_count(),
        items.len()
    );
    for item in &items {
        let completed = run_state.is_completed(&item.url);
        let failed = run_state.failure_reason(&item.url).is_some();
        assert!(completed != failed, "item must end in exactly one outcome");
    }
}

#[tokio::test]
async fn test_records_follow_input_order() {
    let server = MockServer::start().await;
    for (route, name) in [("/1", "First"), ("/2", "Second"), ("/3", "Third")] {
        mount_html(
            &server,
            route,
            &format!(
                r#"<html><body><h1 class="text-heading-xlarge">{}</h1></body></html>"#,
                name
            ),
        )
        .await;
    }

    let pipeline = test_pipeline(3);
    let base = server.uri();
    let items = vec![
        work_item(&base, "/1", PageKind::Profile),
        work_item(&base, "/2", PageKind::Profile),
        work_item(&base, "/3", PageKind::Profile),
    ];
    let run_state = pipeline.run(&items).await;

    let names: Vec<_> = run_state
        .records()
        .iter()
        .map(|r| r.field_values()[0].to_string())
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_cancelled_run_starts_no_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0) // Cancelled before the first item: no requests at all
        .mount(&server)
        .await;

    let pipeline = test_pipeline(3);
    let items = vec![work_item(&server.uri(), "/never", PageKind::Profile)];

    let cancel = CancelFlag::new();
    cancel.cancel();
    let run_state = pipeline.run_with_cancel(&items, &cancel).await;

    assert_eq!(run_state.total(), 0);
}

#[tokio::test]
async fn test_end_to_end_run_and_flush() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/jane",
        r#"<html><body>
            <h1 class="text-heading-xlarge">Jane Doe</h1>
            <div class="text-body-medium">Engineer</div>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/acme",
        r#"<html><body>
            <h1 class="org-top-card-summary__title">Acme Corp</h1>
            <div class="org-top-card-summary__industry">Manufacturing</div>
        </body></html>"#,
    )
    .await;

    let pipeline = test_pipeline(3);
    let base = server.uri();
    let items = vec![
        work_item(&base, "/jane", PageKind::Profile),
        work_item(&base, "/acme", PageKind::Company),
    ];
    let run_state = pipeline.run(&items).await;

    let dir = tempfile::tempdir().unwrap();
    let config = OutputConfig {
        profiles_path: dir.path().join("profiles.csv").to_string_lossy().into_owned(),
        companies_path: dir
            .path()
            .join("companies.csv")
            .to_string_lossy()
            .into_owned(),
    };

    let written = write_outputs(&run_state, &config).unwrap();
    assert_eq!(written.len(), 2);

    let profiles = std::fs::read_to_string(&config.profiles_path).unwrap();
    assert_eq!(
        profiles.lines().next(),
        Some("Name,JobTitle,Location,Summary")
    );
    assert!(profiles.contains("Jane Doe,Engineer,N/A,N/A"));

    let companies = std::fs::read_to_string(&config.companies_path).unwrap();
    assert!(companies.contains("Acme Corp,Manufacturing,N/A,N/A"));
}
