use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::layout::LayoutError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotConfigured(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                msg.clone(),
            ),
            AppError::Layout(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_CARD",
                e.to_string(),
            ),
            AppError::Export(
                e @ (ExportError::MissingCount { .. } | ExportError::InvalidCount { .. }),
            ) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_ITEM_DATA",
                e.to_string(),
            ),
            AppError::Export(ExportError::Notion(e)) => {
                tracing::error!("Notion error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "NOTION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Export(ExportError::Storage(e)) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to write the card file".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to render pages".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::NotionError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::NotConfigured("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AppError::Layout(LayoutError::MissingDescription {
                number: "000001".into(),
                name: "X".into(),
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Export(ExportError::MissingCount {
                page_id: "p".into()
            })),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Export(ExportError::Notion(NotionError::Api {
                status: 401,
                message: "API token is invalid.".into(),
            }))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Render(RenderError::TemplateRead {
                path: "cards.hbs".into(),
                source: std::io::ErrorKind::NotFound.into(),
            })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
