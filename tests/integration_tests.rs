//! Integration tests for the dashboard.
//! These tests drive a mock backend through the client, dashboard and HTTP API.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use news_dashboard::api::{router, AppState};
use news_dashboard::bus::EventBus;
use news_dashboard::config::AppConfig;
use news_dashboard::news::NewsClient;
use news_dashboard::services::dashboard::Dashboard;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn corpus() -> Value {
    json!([
        {"_id": "1", "title": "Tesla deliveries beat estimates", "text": "Strong quarter", "source": "https://example.com/1", "timestamp": "2025-01-05T14:30:00Z", "sentiment": {"label": "positive", "score": 0.95}},
        {"_id": "2", "title": "EV makers rally", "text": "tesla and peers climb", "source": "", "timestamp": "2025-01-05T15:00:00Z", "sentiment": {"label": "positive", "score": 0.88}},
        {"_id": "3", "title": "Apple faces probe", "text": "Regulators look at App Store", "source": "https://example.com/3", "timestamp": "2025-01-06T09:00:00Z", "sentiment": {"label": "negative", "score": 0.81}},
        {"_id": "4", "title": "Oil steady", "text": "", "source": "", "timestamp": "2025-01-06T10:00:00Z"}
    ])
}

fn mock_news<'a>(server: &'a MockServer, body: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}

async fn build_app(server: &MockServer) -> (Router, Arc<Dashboard>) {
    let mut config = AppConfig::default();
    config.backend.base_url = server.base_url();

    let client = NewsClient::with_default_timeout(&config.backend.base_url).unwrap();
    let dashboard = Arc::new(Dashboard::new(Arc::new(client), EventBus::new(64)));
    let _ = dashboard.refresh().await;

    let state = Arc::new(AppState {
        dashboard: dashboard.clone(),
        config,
    });
    (router(state), dashboard)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Initial load computes the global overview over every article
#[tokio::test]
async fn test_initial_load_overview() {
    let server = MockServer::start();
    mock_news(&server, corpus());
    let (app, _) = build_app(&server).await;

    let (status, body) = send(&app, get("/dashboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["overview"]["totalArticles"], 4);
    assert_eq!(body["overview"]["positiveRatio"], 0.5);
    assert_eq!(body["overview"]["negativeRatio"], 0.25);
    assert_eq!(body["overview"]["neutralRatio"], 0.25);
    assert_eq!(body["overview"]["trend"], "neutral");
    assert_eq!(body["overview"]["recommendation"], "monitoring key indicators");
    assert_eq!(body["articles"].as_array().unwrap().len(), 4);
}

/// Backend failure on load shows a single error state with no partial data
#[tokio::test]
async fn test_initial_load_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(500).body("database unavailable");
    });
    let (app, _) = build_app(&server).await;

    let (status, body) = send(&app, get("/dashboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Failed to fetch recent news. Please try again.");
    assert!(body["overview"].is_null());
    assert_eq!(body["articles"], json!([]));
}

/// Empty backend: ready, but no overview to show
#[tokio::test]
async fn test_empty_corpus_has_no_overview() {
    let server = MockServer::start();
    mock_news(&server, json!([]));
    let (app, _) = build_app(&server).await;

    let (_, body) = send(&app, get("/dashboard")).await;
    assert_eq!(body["status"], "ready");
    assert!(body["overview"].is_null());

    let response = app.clone().oneshot(get("/dashboard/text")).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("No market data available."));
    assert!(text.contains("No news available."));
}

/// A batch resolves in order: matching query -> news, non-matching -> general
#[tokio::test]
async fn test_query_batch_flow() {
    let server = MockServer::start();
    let news = mock_news(&server, corpus());
    let process = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200).json_body(json!({"status": "success"}));
    });
    let general = server.mock(|when, then| {
        when.method(POST)
            .path("/general_query")
            .json_body(json!({"queries": ["How to invest in crypto"]}));
        then.status(200)
            .json_body(json!({"status": "success", "response": "Start with a small allocation."}));
    });
    let (app, dashboard) = build_app(&server).await;

    let (status, body) = send(
        &app,
        post_json("/queries", json!({"input": "TESLA\n\nHow to invest in crypto\n"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["query"], "TESLA");
    assert_eq!(results[0]["type"], "news");
    assert_eq!(results[0]["articles"].as_array().unwrap().len(), 2);
    assert_eq!(results[0]["marketData"]["trend"], "bullish");
    assert_eq!(results[0]["marketData"]["recommendation"], "investing in growth sectors");

    assert_eq!(results[1]["type"], "general");
    assert_eq!(results[1]["generalResponse"], "Start with a small allocation.");

    process.assert_calls(2);
    general.assert_calls(1);
    // initial load + one per query + refresh after the batch
    news.assert_calls(4);

    let snapshot = dashboard.snapshot().await;
    assert_eq!(snapshot.results.len(), 2);
    assert!(!snapshot.analyzing);
}

/// No article mentions the query, so the result is general and never news
#[tokio::test]
async fn test_unmatched_query_is_general() {
    let server = MockServer::start();
    mock_news(
        &server,
        json!([{"_id": "1", "title": "Apple earnings", "text": "iPhone sales", "source": "", "timestamp": ""}]),
    );
    server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(POST).path("/general_query");
        then.status(200).json_body(json!({"status": "error", "message": "no llm"}));
    });
    let (app, _) = build_app(&server).await;

    let (_, body) = send(&app, post_json("/queries", json!({"queries": ["Tesla"]}))).await;

    assert_eq!(body["results"][0]["type"], "general");
    assert_eq!(body["results"][0]["generalResponse"], "No response available.");
}

/// A failing query is isolated from its siblings
#[tokio::test]
async fn test_failing_query_is_isolated() {
    let server = MockServer::start();
    mock_news(&server, corpus());
    server.mock(|when, then| {
        when.method(POST)
            .path("/process")
            .json_body(json!({"queries": ["Apple"]}));
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/process")
            .json_body(json!({"queries": ["Tesla"]}));
        then.status(200);
    });
    let (app, _) = build_app(&server).await;

    let (_, body) = send(&app, post_json("/queries", json!({"input": "Apple\nTesla"}))).await;

    assert_eq!(body["results"][0]["type"], "error");
    assert_eq!(body["results"][0]["error"], "Failed to process query. Please try again.");
    assert_eq!(body["results"][1]["type"], "news");

    let (_, dashboard) = send(&app, get("/dashboard")).await;
    assert_eq!(dashboard["status"], "ready");
}

#[tokio::test]
async fn test_blank_submission_is_bad_request() {
    let server = MockServer::start();
    mock_news(&server, corpus());
    let (app, _) = build_app(&server).await;

    let (status, body) = send(&app, post_json("/queries", json!({"input": "  \n \n"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_refresh_endpoint_picks_up_new_articles() {
    let server = MockServer::start();
    let mut first = mock_news(&server, json!([]));
    let (app, _) = build_app(&server).await;

    first.delete();
    mock_news(&server, corpus());

    let (status, body) = send(&app, post_json("/refresh", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overview"]["totalArticles"], 4);
}

#[tokio::test]
async fn test_health_and_text_view() {
    let server = MockServer::start();
    mock_news(&server, corpus());
    let (app, _) = build_app(&server).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let response = app.clone().oneshot(get("/dashboard/text")).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Market Trend: NEUTRAL"));
    assert!(text.contains("Positive 50% | Negative 25% | Neutral 25%"));
    assert!(text.contains("- Oil steady [N/A]"));
}
