use frag_client::config::ClientConfig;
use frag_client::core::loading::loading_markup;
use frag_client::core::{HtmlPolicy, LoadOutcome, OrderingPolicy};
use frag_client::{ClientError, FragmentLoader, MemoryRegion};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn loader_for(server: &MockServer, adjust: impl FnOnce(&mut ClientConfig)) -> FragmentLoader {
    let mut config = ClientConfig::default();
    config.server.base_url = Some(server.base_url());
    adjust(&mut config);
    FragmentLoader::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_fragment_replaces_region_content() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/entity/get-entity/")
            .query_param("entity_id", "t_clients")
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "html": "<p>ok</p>" }));
    });

    let loader = loader_for(&server, |_| {});
    let region = MemoryRegion::with_content("dynamic-block", "<p>old</p>");

    let outcome = loader
        .load(&region, "/entity/get-entity/?entity_id=t_clients")
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(region.content(), "<p>ok</p>");
}

#[tokio::test]
async fn test_server_error_renders_inline_message() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/entity/manage/");
        then.status(500)
            .json_body(serde_json::json!({ "status": "error", "message": "boom" }));
    });

    let loader = loader_for(&server, |_| {});
    let region = MemoryRegion::with_content("dynamic-block", "<p>old</p>");

    let result = loader.load(&region, "/entity/manage/").await;

    api_mock.assert();
    assert!(matches!(result, Err(ClientError::Status { status: 500, .. })));
    assert_eq!(
        region.content(),
        "<p class=\"text-danger\">Error: Internal Server Error</p>"
    );
}

#[tokio::test]
async fn test_timeout_renders_timeout_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/entity/settings/");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(serde_json::json!({ "html": "<p>late</p>" }));
    });

    let loader = loader_for(&server, |config| config.server.timeout_ms = Some(200));
    let region = MemoryRegion::new("dynamic-block");

    let result = loader.load(&region, "/entity/settings/").await;

    assert!(result.is_err());
    assert!(region.content().contains("timeout"));
}

#[tokio::test]
async fn test_payload_without_html_is_a_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/entity/settings/");
        then.status(200).json_body(serde_json::json!({ "status": "ok" }));
    });

    let loader = loader_for(&server, |_| {});
    let region = MemoryRegion::new("dynamic-block");

    let result = loader.load(&region, "/entity/settings/").await;

    assert!(matches!(result, Err(ClientError::InvalidPayload { .. })));
    assert!(region.content().contains("parsererror"));
}

#[tokio::test]
async fn test_loading_indicator_shown_before_request_completes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/entity/create-entity/");
        then.status(200)
            .delay(Duration::from_millis(100))
            .json_body(serde_json::json!({ "html": "<form id=\"entity-form\"></form>" }));
    });

    let loader = loader_for(&server, |config| config.fragment.loading_indicator = true);
    let region = Arc::new(MemoryRegion::with_content("dynamic-block", "<p>old</p>"));

    let handle = loader.update(region.clone(), "/entity/create-entity/");
    assert_eq!(region.content(), loading_markup());

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, LoadOutcome::Applied);
    assert_eq!(region.content(), "<form id=\"entity-form\"></form>");
}

#[tokio::test]
async fn test_overlapping_loads_last_response_wins() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({ "html": "<p>slow</p>" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/fast");
        then.status(200).json_body(serde_json::json!({ "html": "<p>fast</p>" }));
    });

    let loader = loader_for(&server, |_| {});
    let region = Arc::new(MemoryRegion::new("dynamic-block"));

    let slow = loader.update(region.clone(), "/slow");
    let fast = loader.update(region.clone(), "/fast");

    assert_eq!(fast.await.unwrap().unwrap(), LoadOutcome::Applied);
    assert_eq!(slow.await.unwrap().unwrap(), LoadOutcome::Applied);
    // 先發出但較晚抵達的回應覆蓋了結果
    assert_eq!(region.content(), "<p>slow</p>");
}

#[tokio::test]
async fn test_overlapping_loads_latest_request_wins() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({ "html": "<p>slow</p>" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/fast");
        then.status(200).json_body(serde_json::json!({ "html": "<p>fast</p>" }));
    });

    let loader = loader_for(&server, |config| {
        config.fragment.ordering = OrderingPolicy::LatestRequestWins
    });
    let region = Arc::new(MemoryRegion::new("dynamic-block"));

    let slow = loader.update(region.clone(), "/slow");
    let fast = loader.update(region.clone(), "/fast");

    assert_eq!(fast.await.unwrap().unwrap(), LoadOutcome::Applied);
    assert_eq!(slow.await.unwrap().unwrap(), LoadOutcome::Superseded);
    assert_eq!(region.content(), "<p>fast</p>");
}

#[tokio::test]
async fn test_sequencing_is_per_region() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/a");
        then.status(200)
            .delay(Duration::from_millis(200))
            .json_body(serde_json::json!({ "html": "<p>a</p>" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(200).json_body(serde_json::json!({ "html": "<p>b</p>" }));
    });

    let loader = loader_for(&server, |config| {
        config.fragment.ordering = OrderingPolicy::LatestRequestWins
    });
    let main = Arc::new(MemoryRegion::new("dynamic-block"));
    let sidebar = Arc::new(MemoryRegion::new("sidebar"));

    let first = loader.update(main.clone(), "/a");
    let second = loader.update(sidebar.clone(), "/b");

    assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Applied);
    assert_eq!(second.await.unwrap().unwrap(), LoadOutcome::Applied);
    assert_eq!(main.content(), "<p>a</p>");
    assert_eq!(sidebar.content(), "<p>b</p>");
}

#[tokio::test]
async fn test_strip_active_content_policy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/entity/manage/");
        then.status(200).json_body(serde_json::json!({
            "html": "<p>list</p><script>alert(1)</script>"
        }));
    });

    let loader = loader_for(&server, |config| {
        config.fragment.html_policy = HtmlPolicy::StripActiveContent
    });
    let region = MemoryRegion::new("dynamic-block");

    loader.load(&region, "/entity/manage/").await.unwrap();

    assert_eq!(region.content(), "<p>list</p>");
}

#[tokio::test]
async fn test_relative_url_without_base_renders_error() {
    let loader = FragmentLoader::from_config(&ClientConfig::default()).unwrap();
    let region = MemoryRegion::with_content("dynamic-block", "<p>old</p>");

    let result = loader.load(&region, "/entity/manage/").await;

    assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    assert!(region.content().starts_with("<p class=\"text-danger\">"));
}
