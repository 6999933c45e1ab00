pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::analysis::handlers;
use crate::state::AppState;

/// Request bodies above this size are rejected with 413.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
        .layer(security_header(
            HeaderName::from_static("x-dns-prefetch-control"),
            "off",
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::textrazor::OfflineExtractor;

    fn app() -> Router {
        build_router(AppState {
            config: Config::for_tests(false),
            extractor: Arc::new(OfflineExtractor),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_route() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Default route is working!");
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_keywords_and_metrics() {
        let request = post_json(
            "/api/analyze",
            json!({"text": "The quick brown fox jumps over the lazy dog"}),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );

        let body = body_json(response).await;
        let keywords = body["keywords"].as_array().unwrap();
        assert!(!keywords.is_empty() && keywords.len() <= 15);
        assert_eq!(keywords[0]["type"], "Keyword");
        assert_eq!(body["metrics"]["contentLength"], 9);
        assert!(body["metrics"]["keywordDensity"].is_string());
        assert!(body["metrics"]["avgSentenceLength"].is_string());
        assert!(body["metrics"]["readabilityScore"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let response = app()
            .oneshot(post_json("/api/analyze", json!({"text": "   \n"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Text is required for analysis");
        assert_eq!(body["message"], "Please provide some content to analyze");
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let response = app()
            .oneshot(post_json("/api/analyze", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_string_text_is_rejected_as_json() {
        let response = app()
            .oneshot(post_json("/api/analyze", json!({"text": 5})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Text is required for analysis");
        assert!(body["message"].as_str().unwrap().contains("invalid type"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_as_json() {
        let request = Request::post("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Text is required for analysis");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_rejected_as_json() {
        let request = Request::post("/api/analyze")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("just some text"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_form_body_is_analyzed() {
        let request = Request::post("/api/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=The+quick+brown+fox+jumps+over+the+lazy+dog"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metrics"]["contentLength"], 9);
        assert!(!body["keywords"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_form_text_is_rejected() {
        let request = Request::post("/api/analyze")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=+++"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Please provide some content to analyze"
        );
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let text = "word ".repeat(MAX_BODY_BYTES / 4);
        let response = app()
            .oneshot(post_json("/api/analyze", json!({ "text": text })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "Request body too large");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::get("/health")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
