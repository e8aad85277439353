//! Axum route handlers for the Layout API.

use axum::{extract::State, response::Html, Json};

use crate::errors::AppError;
use crate::layout::{plan_pages, PagePlan};
use crate::models::ItemCardRecord;
use crate::state::AppState;

/// POST /api/v1/plan
///
/// Classifies and batches the posted cards and returns the pages with their
/// fill summary. A card with a non-string description is rejected by the JSON
/// extractor before it reaches the planner.
pub async fn handle_plan(
    Json(cards): Json<Vec<ItemCardRecord>>,
) -> Result<Json<PagePlan>, AppError> {
    Ok(Json(plan_pages(cards)?))
}

/// POST /api/v1/render
///
/// Lays out the posted cards and returns the printable HTML document. An empty
/// list renders a document with no pages.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(cards): Json<Vec<ItemCardRecord>>,
) -> Result<Html<String>, AppError> {
    let plan = plan_pages(cards)?;
    let html = state.renderer.render(&plan.batches)?;
    Ok(Html(html))
}
