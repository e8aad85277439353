use std::sync::Arc;

use crate::config::Config;
use crate::export::ItemSource;
use crate::render::Renderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Item source for `/api/v1/export`. `None` when Notion is not configured.
    pub source: Option<Arc<dyn ItemSource>>,
    /// Page renderer. Default: `HtmlRenderer` with the built-in template.
    pub renderer: Arc<dyn Renderer>,
}
