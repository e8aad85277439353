pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::layout::handlers as layout_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/plan", post(layout_handlers::handle_plan))
        .route("/api/v1/render", post(layout_handlers::handle_render))
        .route("/api/v1/export", post(export_handlers::handle_export))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::render::HtmlRenderer;

    pub(crate) fn make_state() -> AppState {
        AppState {
            config: Config::from_lookup(|_| None).unwrap(),
            source: None,
            renderer: Arc::new(HtmlRenderer::builtin().unwrap()),
        }
    }

    pub(crate) async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(make_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "item-cards");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = build_router(make_state())
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
