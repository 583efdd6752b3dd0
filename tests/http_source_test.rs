use git_relnotes::domain::Version;
use git_relnotes::notes::{
    FetchError, FetchOutcome, HttpNotesSource, NotesCatalog, NotesSource, ReleaseNoteFetcher,
};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releasenotes"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

/// The blocking client must not run on the async runtime's threads
async fn load(url: String, timeout: Duration) -> Result<NotesCatalog, FetchError> {
    tokio::task::spawn_blocking(move || {
        let source = HttpNotesSource::new(url, timeout).unwrap();
        source.load()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_loads_catalog() {
    let server = serve(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "v1.2.3": "Fixed bugs",
        "v1.3.0": "Added webhooks",
    })))
    .await;

    let catalog = load(format!("{}/releasenotes", server.uri()), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(&Version::new("v1.2.3")), Some("Fixed bugs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_200_is_status_error() {
    let server = serve(ResponseTemplate::new(503)).await;

    let err = load(format!("{}/releasenotes", server.uri()), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Status(503));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json_is_malformed() {
    let server = serve(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")).await;

    let err = load(format!("{}/releasenotes", server.uri()), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeout_is_transport_error() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"v1.0.0": "late"}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let err = load(format!("{}/releasenotes", server.uri()), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(err.is_retryable(), "expected transport error, got {:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_over_http_writes_notes() {
    let server = serve(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"v1.2.3": "Fixed bugs"})),
    )
    .await;
    let url = format!("{}/releasenotes", server.uri());
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("release_notes.txt");
    let output_for_fetch = output.clone();

    let (found, missing) = tokio::task::spawn_blocking(move || {
        let source = HttpNotesSource::new(url, Duration::from_secs(5)).unwrap();
        let fetcher = ReleaseNoteFetcher::new(source, output_for_fetch);
        (
            fetcher.fetch(&Version::new("v1.2.3")).unwrap(),
            fetcher.fetch(&Version::new("v9.9.9")).unwrap(),
        )
    })
    .await
    .unwrap();

    assert!(found.is_written());
    assert!(matches!(missing, FetchOutcome::Missing { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "Fixed bugs");
}
