//! HTTP front end for the banana-translate orchestrator
//!
//! Routes:
//!
//! - `POST /api/translate` - translate `{ text, sourceLang, targetLang }`
//! - `POST /translate` - same handler, path used by older clients
//! - `GET /ping` - liveness probe
//!
//! Every error is answered as `{ "error": message }`: 400 for validation and
//! malformed JSON, 503 for simulated outages, 500 for anything unexpected.

pub mod config;
pub mod error;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, Response, Version, header},
    routing::{get, post},
};
use banana_translate::{Orchestrator, TranslateError, TranslateRequestBody, TranslationResult};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub use config::{AppConfig, StartupError};
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
    pub host: String,
    pub proto: String,
}

/// Build the application router with all layers applied
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/translate", post(translate))
        .route("/translate", post(translate))
        .route("/ping", get(ping))
        .with_state(state);
    with_layers(router)
}

/// CORS, request tracing and panic recovery
pub fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequestBody>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Json(body) = payload?;
    let result = state.orchestrator.handle(body)?;
    debug!(
        "Translated {} characters (confidence {:.3})",
        result.characters_translated, result.confidence
    );
    Ok(Json(result))
}

async fn ping(headers: HeaderMap, version: Version) -> Json<PingResponse> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(PingResponse {
        message: "pong".to_string(),
        host,
        proto: format!("{:?}", version),
    })
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response<axum::body::Body> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    let err = ApiError::from(TranslateError::Internal(format!(
        "request handler panicked: {}",
        detail
    )));
    axum::response::IntoResponse::into_response(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use banana_translate::{LanguageCode, SimulationConfig};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state(simulation: SimulationConfig) -> AppState {
        AppState::new(
            Orchestrator::builder()
                .simulation(simulation)
                .seed(11)
                .build()
                .unwrap(),
        )
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_translate_success() {
        let router = app(state(SimulationConfig::reliable()));
        let (status, body) = call(
            router,
            post_json(
                "/api/translate",
                r#"{"text":"Hello world","sourceLang":"en","targetLang":"vi"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["translatedText"],
            "Xin chào, đây là bản dịch tiếng Việt (Hello world...)"
        );
        assert_eq!(body["charactersTranslated"], 11);
        assert!(body.get("detectedSourceLang").is_none());
        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.95..1.0).contains(&confidence));
    }

    #[tokio::test]
    async fn test_translate_alias_route_and_auto_detect() {
        let router = app(state(SimulationConfig::reliable()));
        let (status, body) = call(
            router,
            post_json(
                "/translate",
                r#"{"text":["你好"],"source_lang":"auto","target_lang":"en"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detectedSourceLang"], json!(LanguageCode::Zh));
        assert_eq!(body["translatedText"], "English translation: 你好");
        assert_eq!(body["charactersTranslated"], 2);
    }

    #[tokio::test]
    async fn test_translate_validation_errors() {
        let cases = [
            (
                r#"{"text":"test","sourceLang":"en","targetLang":"en"}"#,
                "Source and target languages cannot be the same",
            ),
            (
                r#"{"sourceLang":"en","targetLang":"vi"}"#,
                "Missing required fields",
            ),
            (
                r#"{"text":"hi","sourceLang":"en","targetLang":"xx"}"#,
                "Unsupported language: xx",
            ),
            (
                r#"{"text":"hi","sourceLang":"en","targetLang":"auto"}"#,
                "Target language cannot be auto-detect",
            ),
        ];
        for (payload, message) in cases {
            let router = app(state(SimulationConfig::always_failing()));
            let (status, body) = call(router, post_json("/api/translate", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
            assert_eq!(body["error"], message);
        }
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let router = app(state(SimulationConfig::reliable()));
        let payload = json!({
            "text": "a".repeat(5001),
            "sourceLang": "en",
            "targetLang": "vi",
        });
        let (status, body) = call(router, post_json("/api/translate", &payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text too long. Maximum 5000 characters.");
    }

    #[tokio::test]
    async fn test_translate_malformed_json() {
        let router = app(state(SimulationConfig::reliable()));
        let (status, body) = call(router, post_json("/api/translate", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON: "));
    }

    #[tokio::test]
    async fn test_translate_service_unavailable() {
        let router = app(state(SimulationConfig::always_failing()));
        let (status, body) = call(
            router,
            post_json(
                "/api/translate",
                r#"{"text":"Hello","sourceLang":"en","targetLang":"vi"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Translation service temporarily unavailable");
    }

    #[tokio::test]
    async fn test_ping() {
        let router = app(state(SimulationConfig::reliable()));
        let request = Request::builder()
            .uri("/ping")
            .header(header::HOST, "localhost:3000")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
        assert_eq!(body["host"], "localhost:3000");
        assert_eq!(body["proto"], "HTTP/1.1");
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let router = app(state(SimulationConfig::reliable()));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/translate")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn boom() -> &'static str {
            panic!("phrase table exploded")
        }
        let router = with_layers(Router::new().route("/boom", get(boom)));
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let (status, body) = call(router, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("exploded"));
    }
}
