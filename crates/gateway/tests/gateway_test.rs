use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use code_review_controller::AnalysisOrchestrator;
use code_review_core::mocks::{MockContentCache, MockContentSource, MockLlm, MockRepositoryHost};
use code_review_core::types::FileEntry;
use code_review_gateway::{GatewayConfig, GatewayServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(host: MockRepositoryHost, llm: Arc<MockLlm>) -> Router {
    let source = MockContentSource::new().with_content("http://raw/main.py", "print('hi')");
    let orchestrator = AnalysisOrchestrator::builder()
        .with_host(Arc::new(host))
        .with_content_source(Arc::new(source))
        .with_cache(Arc::new(MockContentCache::new()))
        .with_llm(llm)
        .build()
        .unwrap();

    GatewayServer::new(GatewayConfig::default(), Arc::new(orchestrator)).build_router()
}

fn default_app() -> (Router, Arc<MockLlm>) {
    let llm = Arc::new(MockLlm::constant("Readable code. Rating: 7/10"));
    let host = MockRepositoryHost::new(vec![FileEntry::file("main.py", "http://raw/main.py")]);
    (app_with(host, llm.clone()), llm)
}

fn review_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/review")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = default_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_review_endpoint() {
    let (app, llm) = default_app();

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/octo/hello",
            "assignment_description": "Build a CLI",
            "candidate_level": "junior"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["analysis"], "Readable code. Rating: 7/10");
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_review_repeated_request_uses_cache() {
    let (app, llm) = default_app();
    let body = json!({
        "github_url": "https://github.com/octo/hello",
        "assignment_description": "Build a CLI",
        "candidate_level": "senior"
    });

    for _ in 0..2 {
        let response = app.clone().oneshot(review_request(body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_review_not_found_passes_status_through() {
    let llm = Arc::new(MockLlm::constant("unused"));
    let app = app_with(MockRepositoryHost::failing(404), llm.clone());

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/octo/missing",
            "assignment_description": "Build a CLI",
            "candidate_level": "middle"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["detail"], "Failed to fetch repository contents");
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_review_rate_limited_is_forbidden() {
    let llm = Arc::new(MockLlm::constant("unused"));
    let app = app_with(MockRepositoryHost::failing(403), llm);

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/octo/hello",
            "assignment_description": "Build a CLI",
            "candidate_level": "middle"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn test_review_model_failure_is_bad_gateway() {
    let host = MockRepositoryHost::new(vec![FileEntry::file("main.py", "http://raw/main.py")]);
    let app = app_with(host, Arc::new(MockLlm::failing("quota exceeded")));

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/octo/hello",
            "assignment_description": "Build a CLI",
            "candidate_level": "junior"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["code"], "MODEL_SERVICE_ERROR");
    assert_eq!(json["detail"], "quota exceeded");
}

#[tokio::test]
async fn test_review_bad_url_is_unprocessable() {
    let (app, _) = default_app();

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/",
            "assignment_description": "Build a CLI",
            "candidate_level": "junior"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_review_unknown_level_rejected() {
    let (app, llm) = default_app();

    let response = app
        .oneshot(review_request(json!({
            "github_url": "https://github.com/octo/hello",
            "assignment_description": "Build a CLI",
            "candidate_level": "principal"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(llm.call_count(), 0);
}
