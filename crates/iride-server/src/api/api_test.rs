use axum::body::{to_bytes, Body};
use axum::http::Request;
use iride_core::AnalysisStage;
use iride_gemini::GeminiClient;
use iride_pipeline::{IntelligenceGatherer, StrategicAnalyzer, REPORT_FORMAT_MESSAGE};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const RESEARCH_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
const ANALYSIS_PATH: &str = "/v1beta/models/gemini-3-pro-preview:generateContent";

fn state_for(server: &MockServer) -> AppState {
    let client = GeminiClient::with_base_url("test-key", 30, "iride-test/0.1", &server.uri())
        .expect("client");
    let pipeline = AnalysisPipeline::new(
        client,
        IntelligenceGatherer::new("gemini-2.5-flash"),
        StrategicAnalyzer::new("gemini-3-pro-preview", 16_000),
    );
    AppState::new(Arc::new(pipeline))
}

fn open_app(state: AppState) -> Router {
    build_app(state)
}

fn text_body(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

fn report_json() -> Value {
    json!({
        "url": "https://mysite.it",
        "summary": "Audit.",
        "clientSummary": "Sintesi.",
        "zoomAuthority": 30,
        "zoomTrust": 28,
        "backlinksCount": 900,
        "referringDomains": 45,
        "anchorProfile": [{ "type": "Brand", "percentage": 100, "example": "mysite" }],
        "trafficTrend": [],
        "topKeywords": [],
        "opportunityKeywords": [],
        "competitors": [],
        "recommendations": []
    })
}

async fn mount_research(server: &MockServer) {
    let body = json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "dati grezzi" }] },
            "groundingMetadata": {
                "groundingChunks": [{ "web": { "uri": "https://a.example", "title": "a.example" } }]
            }
        }]
    });
    Mock::given(method("POST"))
        .and(path(RESEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_analysis(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ANALYSIS_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

fn post_analysis(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analysis")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .expect("request")
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("conflict", StatusCode::CONFLICT),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("report_format_error", StatusCode::UNPROCESSABLE_ENTITY),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        let response = ApiError::new("req-1", code, "msg").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[tokio::test]
async fn health_echoes_request_id() {
    let server = MockServer::start().await;
    let app = open_app(state_for(&server));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"req-42"[..])
    );
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "req-42");
}

#[tokio::test]
async fn generated_request_id_matches_response_meta() {
    let server = MockServer::start().await;
    let app = open_app(state_for(&server));

    let response = app
        .oneshot(request("GET", "/api/v1/analysis"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("request id header");
    let json = json_body(response).await;
    assert_eq!(json["meta"]["request_id"], header.as_str());
    assert_eq!(json["data"]["stage"], "IDLE");
}

#[tokio::test]
async fn successful_analysis_returns_report_and_completes_session() {
    let server = MockServer::start().await;
    mount_research(&server).await;
    mount_analysis(
        &server,
        ResponseTemplate::new(200).set_body_json(text_body(&report_json().to_string())),
    )
    .await;

    let state = state_for(&server);
    let app = open_app(state.clone());

    let response = app
        .clone()
        .oneshot(post_analysis("mysite.it"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["zoomAuthority"], 30);
    assert_eq!(json["data"]["sources"][0]["uri"], "https://a.example");

    let response = app
        .oneshot(request("GET", "/api/v1/analysis"))
        .await
        .expect("response");
    let json = json_body(response).await;
    assert_eq!(json["data"]["stage"], "COMPLETE");
    assert_eq!(json["data"]["url"], "https://mysite.it");
    assert_eq!(json["data"]["report"]["referringDomains"], 45);
    assert!(json["data"]["error"].is_null());
}

#[tokio::test]
async fn empty_url_is_rejected_without_touching_session() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let app = open_app(state.clone());

    let response = app.oneshot(post_analysis("  ")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");

    assert_eq!(state.session.snapshot().await.stage, AnalysisStage::Idle);
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway_and_error_stage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let app = open_app(state.clone());

    let response = app.oneshot(post_analysis("mysite.it")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "upstream_error");

    let snap = state.session.snapshot().await;
    assert_eq!(snap.stage, AnalysisStage::Error);
    assert_eq!(snap.error.as_deref(), Some("Quota exceeded (RESOURCE_EXHAUSTED)"));
    assert!(snap.report.is_none());
}

#[tokio::test]
async fn malformed_report_maps_to_unprocessable_entity() {
    let server = MockServer::start().await;
    mount_research(&server).await;
    mount_analysis(
        &server,
        ResponseTemplate::new(200).set_body_json(text_body("not json")),
    )
    .await;

    let state = state_for(&server);
    let app = open_app(state.clone());

    let response = app.oneshot(post_analysis("mysite.it")).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["message"], REPORT_FORMAT_MESSAGE);
    assert_eq!(state.session.snapshot().await.stage, AnalysisStage::Error);
}

#[tokio::test]
async fn running_session_refuses_new_run_and_reset() {
    let server = MockServer::start().await;
    let state = state_for(&server);
    state
        .session
        .try_start("https://other.it")
        .await
        .expect("claim session");
    let app = open_app(state.clone());

    let response = app
        .clone()
        .oneshot(post_analysis("mysite.it"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(request("DELETE", "/api/v1/analysis"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(state.session.snapshot().await.stage, AnalysisStage::Searching);
}

#[tokio::test]
async fn reset_returns_finished_session_to_idle() {
    let server = MockServer::start().await;
    let state = state_for(&server);
    state.session.try_start("https://other.it").await.expect("start");
    state.session.fail("boom".to_string()).await;
    let app = open_app(state.clone());

    let response = app
        .oneshot(request("DELETE", "/api/v1/analysis"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["stage"], "IDLE");
    assert!(json["data"]["error"].is_null());
}
