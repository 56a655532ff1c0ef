//! Route modules for the Document Q&A server

pub mod ask;
pub mod documents;
pub mod health;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(health::router())
        .merge(documents::router(&state))
        .merge(ask::router());

    with_middleware(routes, state)
}

/// Wrap routes in the panic, trace and CORS layers and attach state
fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let debug = state.config().debug;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn std::any::Any + Send + 'static>| panic_response(panic, debug),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::answer::mock::MockBackend;
    use crate::answer::AnswerGenerator;
    use crate::config::Config;
    use crate::document::DocumentStore;
    use crate::routes::test_support::test_state;

    async fn explode() -> &'static str {
        panic!("index out of bounds in handler")
    }

    async fn call_panicking_route(state: AppState) -> (StatusCode, Value) {
        let app = with_middleware(Router::new().route("/explode", get(explode)), state);
        let request = Request::builder()
            .uri("/explode")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_handler_panic_returns_internal_error() {
        let state = test_state(MockBackend::replying("unused"));
        assert!(!state.config().debug);

        let (status, body) = call_panicking_route(state).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["message"], "An unexpected error occurred. Please try again.");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_handler_panic_details_in_debug() {
        let mut config = Config::default();
        config.debug = true;
        let answers = AnswerGenerator::with_backend(
            MockBackend::replying("unused"),
            "m",
            Some("gsk_test".to_string()),
        );
        let state = AppState::with_services(config, DocumentStore::new(), answers);

        let (status, body) = call_panicking_route(state).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("index out of bounds in handler"));
    }
}
