//! HTTP-level tests for the chatbot server.
//!
//! These drive the real router in-process with fixture knowledge bases:
//! request validation, reply matching, the liveness route and CORS.

use std::path::Path;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{header, Method, Request, StatusCode};
use loanbot_core::{KnowledgeBase, KnowledgeEntry, MatcherConfig, FALLBACK_REPLY};
use loanbot_server::router::build_router;
use loanbot_server::state::AppState;
use tower::ServiceExt;

// ── Test app builder ───────────────────────────────────────────

fn fixture_kb() -> KnowledgeBase {
    KnowledgeBase::from_entries(vec![
        KnowledgeEntry {
            questions: vec!["loan eligibility kya hai".to_string()],
            answer: "You need a minimum score of 650.".to_string(),
        },
        KnowledgeEntry {
            questions: vec![
                "What is the minimum loan amount?".to_string(),
                "minimum loan kitna milega".to_string(),
            ],
            answer: "The minimum loan amount is Rs 50,000.".to_string(),
        },
    ])
    .expect("fixture knowledge base is valid")
}

fn build_test_app() -> axum::Router {
    build_router(AppState::from_knowledge_base(fixture_kb()))
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ── Helper to read response body ───────────────────────────────

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

async fn post_chat(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(chat_request(body)).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

// ── Validation ─────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_message_key_is_400() {
    let (status, body) = post_chat(build_test_app(), "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
}

#[tokio::test]
async fn test_empty_message_is_400() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_null_message_is_400() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": null}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_falsy_message_values_are_missing() {
    for body in [r#"{"message": false}"#, r#"{"message": 0}"#] {
        let (status, resp) = post_chat(build_test_app(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(resp, serde_json::json!({ "error": "Message is required" }));
    }
}

#[tokio::test]
async fn test_empty_json_body_is_missing_message() {
    let (status, body) = post_chat(build_test_app(), "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
}

#[tokio::test]
async fn test_body_without_json_content_type_is_missing_message() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let resp = build_test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Message is required");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid request body"), "got {}", error);
}

#[tokio::test]
async fn test_non_string_message_is_400() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_truthy_non_string_message_is_invalid() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": true}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid request body: message must be a string, got true"
    );
}

// ── Replies ────────────────────────────────────────────────────

#[tokio::test]
async fn test_any_message_gets_reply_field() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": "hi"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].is_string(), "body was {}", body);
}

#[tokio::test]
async fn test_exact_phrasing_returns_answer() {
    let (status, body) =
        post_chat(build_test_app(), r#"{"message": "loan eligibility kya hai"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "reply": "You need a minimum score of 650." })
    );
}

#[tokio::test]
async fn test_unrelated_message_returns_fallback_with_200() {
    let (status, body) = post_chat(
        build_test_app(),
        r#"{"message": "xyz completely unrelated text"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_whitespace_only_message_returns_fallback() {
    let (status, body) = post_chat(build_test_app(), r#"{"message": "\t\n "}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_reply_is_case_insensitive() {
    let (_, upper) = post_chat(
        build_test_app(),
        r#"{"message": "WHAT IS THE MINIMUM LOAN AMOUNT?"}"#,
    )
    .await;
    let (_, lower) = post_chat(
        build_test_app(),
        r#"{"message": "what is the minimum loan amount?"}"#,
    )
    .await;
    assert_eq!(upper, lower);
    assert_eq!(upper["reply"], "The minimum loan amount is Rs 50,000.");
}

#[tokio::test]
async fn test_empty_knowledge_base_always_falls_back() {
    let app = build_router(AppState::from_knowledge_base(KnowledgeBase::empty()));
    let (status, body) = post_chat(app, r#"{"message": "loan eligibility kya hai"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn test_configured_threshold_and_fallback() {
    let app = build_router(AppState::with_config(
        fixture_kb(),
        MatcherConfig {
            threshold: 0.99,
            fallback_reply: "custom fallback".to_string(),
        },
    ));
    let (_, body) = post_chat(app, r#"{"message": "loan eligibility kya h"}"#).await;
    assert_eq!(body["reply"], "custom fallback");
}

#[tokio::test]
async fn test_concurrent_requests_share_state() {
    let app = build_test_app();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post_chat(app, r#"{"message": "loan eligibility kya hai"}"#).await
        }));
    }
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "You need a minimum score of 650.");
    }
}

// ── Routing & middleware ───────────────────────────────────────

#[tokio::test]
async fn test_health_route() {
    let req = Request::builder()
        .uri("/api/test")
        .body(Body::empty())
        .unwrap();
    let resp = build_test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Server running successfully");
    let time = body["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "bad time {}", time);
}

#[tokio::test]
async fn test_get_chat_not_allowed() {
    let req = Request::builder()
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let resp = build_test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::from(r#"{"message": "hi"}"#))
        .unwrap();
    let resp = build_test_app().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

// ── Shipped knowledge base ─────────────────────────────────────

#[tokio::test]
async fn test_shipped_knowledge_base_answers_quick_questions() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/knowledge_base.json");
    let kb = KnowledgeBase::load(&path).expect("shipped knowledge base loads");
    assert!(!kb.is_empty());

    let app = build_router(AppState::from_knowledge_base(kb));
    for question in [
        "kaun kaun se loan milte hai",
        "What is the minimum loan amount?",
        "loan eligibility kya hai",
        "What documents are required?",
        "How much EMI will I pay?",
    ] {
        let body = serde_json::json!({ "message": question }).to_string();
        let (status, reply) = post_chat(app.clone(), &body).await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(reply["reply"], FALLBACK_REPLY, "no answer for {:?}", question);
    }
}
