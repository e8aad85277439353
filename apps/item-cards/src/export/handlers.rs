//! Axum route handlers for the Export API.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::AppError;
use crate::export::{run_export, ExportSummary};
use crate::state::AppState;

/// POST /api/v1/export
///
/// Pulls every row marked for printing, expands it into cards and writes the
/// dated card file into the configured output directory.
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportSummary>, AppError> {
    let source = state.source.as_deref().ok_or_else(|| {
        AppError::NotConfigured("NOTION_TOKEN and DATABASE_ID must be set to export".to_string())
    })?;

    let summary = run_export(source, &state.config.output_dir, Utc::now().date_naive()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::export::tests::{make_item, make_row, FakeSource};
    use crate::routes::build_router;
    use crate::routes::tests::{body_json, make_state};

    fn export_request() -> Request<Body> {
        Request::post("/api/v1/export").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_export_without_source_is_unavailable() {
        let response = build_router(make_state())
            .oneshot(export_request())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_export_writes_card_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::default();
        source.items.insert("a".into(), make_item("000001", "A"));
        source.rows = vec![make_row("row1", Some(2.0), &["a"])];

        let mut state = make_state();
        state.config.output_dir = dir.path().to_path_buf();
        state.source = Some(Arc::new(source));

        let response = build_router(state).oneshot(export_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let summary = body_json(response).await;
        assert_eq!(summary["count"], 2);
        let path = summary["path"].as_str().unwrap();
        assert!(path.contains("item_cards_"));
        assert!(std::path::Path::new(path).exists());
    }

    #[tokio::test]
    async fn test_export_with_blank_count_is_unprocessable() {
        let mut source = FakeSource::default();
        source.items.insert("a".into(), make_item("000001", "A"));
        source.rows = vec![make_row("row1", None, &["a"])];

        let mut state = make_state();
        state.source = Some(Arc::new(source));

        let response = build_router(state).oneshot(export_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
