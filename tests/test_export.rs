//! End-to-end tests for the fetch, filter and write pipeline

use mockito::{Matcher, Server, ServerGuard};
use tempfile::TempDir;

use gitlab_issue_checklist::services::ChecklistExporter;
use gitlab_issue_checklist::types::{ClosedDateRange, OutputFormat};
use test_util::{export_options, issue_json, project_issues_path, unlabelled_query};

/// Mock a single-page project whose body is `issues`
async fn single_page_server(issues: Vec<serde_json::Value>) -> ServerGuard {
    let mut server = Server::new_async().await;
    let path = project_issues_path();

    server
        .mock("HEAD", path.as_str())
        .match_query(Matcher::Any)
        .with_header("x-total-pages", "1")
        .create_async()
        .await;
    server
        .mock("GET", path.as_str())
        .match_query(Matcher::Exact(unlabelled_query(1)))
        .with_body(serde_json::Value::Array(issues).to_string())
        .create_async()
        .await;

    server
}

#[tokio::test]
async fn test_export_writes_markdown_checklist() {
    let server = single_page_server(vec![
        issue_json(840, None),
        issue_json(12, Some("2024-01-05T10:00:00.000Z")),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("file.md");

    let exporter = ChecklistExporter::new(export_options(&server.url(), output_path.clone()))
        .expect("Failed to create exporter");
    let summary = exporter.run().await.unwrap();

    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.written, 2);
    assert_eq!(summary.output_path, output_path);
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "- [IBFE-840](https://gitlab.example.com/group/app/-/issues/840) - Issue 840\n\
         - [IBFE-12](https://gitlab.example.com/group/app/-/issues/12) - Issue 12\n"
    );
}

/// Bounds are exclusive and open issues are dropped once a bound is set
#[tokio::test]
async fn test_export_applies_closed_date_range() {
    let server = single_page_server(vec![
        issue_json(1, Some("2024-01-01T00:00:00Z")),
        issue_json(2, None),
        issue_json(5, Some("2024-01-05T00:00:00Z")),
        issue_json(10, Some("2024-01-10T00:00:00Z")),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("closed.md");

    let mut options = export_options(&server.url(), output_path.clone());
    options.closed_range = ClosedDateRange::parse(Some("2024-01-01"), Some("2024-01-10")).unwrap();
    options.prefix = "APP".to_string();

    let summary = ChecklistExporter::new(options)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.fetched, 4);
    assert_eq!(summary.written, 1);
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "- [APP-5](https://gitlab.example.com/group/app/-/issues/5) - Issue 5\n"
    );
}

#[tokio::test]
async fn test_export_json_format() {
    let server = single_page_server(vec![issue_json(7, Some("2024-02-01T00:00:00Z"))]).await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("issues.json");

    let mut options = export_options(&server.url(), output_path.clone());
    options.format = OutputFormat::Json;
    ChecklistExporter::new(options)
        .unwrap()
        .run()
        .await
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(value[0]["iid"], 7);
    assert_eq!(value[0]["closed_at"], "2024-02-01T00:00:00Z");
}

/// Zero pages is a valid run that leaves an empty file
#[tokio::test]
async fn test_export_zero_pages_creates_empty_file() {
    let mut server = Server::new_async().await;
    server
        .mock("HEAD", project_issues_path().as_str())
        .match_query(Matcher::Any)
        .with_header("x-total-pages", "0")
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("file.md");

    let summary = ChecklistExporter::new(export_options(&server.url(), output_path.clone()))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.written, 0);
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "");
}

/// A failed page request leaves no output file behind
#[tokio::test]
async fn test_export_fails_fast_without_output() {
    let mut server = Server::new_async().await;
    let path = project_issues_path();
    server
        .mock("HEAD", path.as_str())
        .match_query(Matcher::Any)
        .with_header("x-total-pages", "2")
        .create_async()
        .await;
    server
        .mock("GET", path.as_str())
        .match_query(Matcher::Exact(unlabelled_query(1)))
        .with_body(serde_json::json!([issue_json(1, None)]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", path.as_str())
        .match_query(Matcher::Exact(unlabelled_query(2)))
        .with_status(503)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("file.md");

    let result = ChecklistExporter::new(export_options(&server.url(), output_path.clone()))
        .unwrap()
        .run()
        .await;

    assert!(result.is_err());
    assert!(!output_path.exists());
}

/// An unwritable output path is reported as a write failure
#[tokio::test]
async fn test_export_reports_write_failure() {
    let server = single_page_server(vec![issue_json(1, None)]).await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("no-such-dir").join("file.md");

    let err = ChecklistExporter::new(export_options(&server.url(), output_path))
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to write output file"));
}

/// Without a date bound, `closed_at` is never parsed, so odd values pass through
#[tokio::test]
async fn test_unbounded_export_ignores_unparseable_closed_at() {
    let server = single_page_server(vec![
        issue_json(3, Some("2024-01-05T10:30:00.000+0000")),
        issue_json(4, Some("sometime in January")),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("file.md");

    let summary = ChecklistExporter::new(export_options(&server.url(), output_path.clone()))
        .unwrap()
        .run()
        .await
        .expect("unbounded export must not read closed_at");

    assert_eq!(summary.written, 2);
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "- [IBFE-3](https://gitlab.example.com/group/app/-/issues/3) - Issue 3\n\
         - [IBFE-4](https://gitlab.example.com/group/app/-/issues/4) - Issue 4\n"
    );
}

/// With a bound, offsets without a colon still parse and garbage is skipped
#[tokio::test]
async fn test_bounded_export_skips_unparseable_closed_at() {
    let server = single_page_server(vec![
        issue_json(3, Some("2024-01-05T10:30:00.000+0000")),
        issue_json(4, Some("sometime in January")),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("file.md");

    let mut options = export_options(&server.url(), output_path.clone());
    options.closed_range = ClosedDateRange::parse(Some("2024-01-01"), None).unwrap();
    let summary = ChecklistExporter::new(options)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "- [IBFE-3](https://gitlab.example.com/group/app/-/issues/3) - Issue 3\n"
    );
}
