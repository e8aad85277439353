//! HTML page renderer: turns page batches into a print-ready document.
//!
//! Pages are rendered through a Handlebars template that receives the batches
//! as `batches`, so an override template controls the whole card markup. Card
//! text goes through Handlebars' HTML escaping. PDF conversion is left to the
//! browser's print dialog (the built-in template sets A4 landscape with no
//! margins).

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::batcher::{BatchPattern, PageBatch};
use crate::layout::size_class::{ClassifiedCard, BLANK_LINE};

pub mod template;

use template::DEFAULT_PAGE_TEMPLATE;

const DOCUMENT_TEMPLATE: &str = "document";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read page template {path}: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Failed to render pages: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders batched pages into a complete document.
pub trait Renderer: Send + Sync {
    fn render(&self, batches: &[PageBatch]) -> Result<String, RenderError>;
}

/// Renders pages with a compiled Handlebars template.
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    /// Compiles the built-in template.
    pub fn builtin() -> Result<Self, RenderError> {
        Self::with_template(DEFAULT_PAGE_TEMPLATE)
    }

    /// Compiles `template` as the document template.
    pub fn with_template(template: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(DOCUMENT_TEMPLATE, template)?;
        Ok(Self { registry })
    }

    /// Loads the template override at `path`, or falls back to the built-in one.
    pub fn from_path(path: Option<&Path>) -> Result<Self, RenderError> {
        match path {
            None => Self::builtin(),
            Some(path) => {
                let template =
                    std::fs::read_to_string(path).map_err(|source| RenderError::TemplateRead {
                        path: path.display().to_string(),
                        source,
                    })?;
                info!("Loaded page template from {}", path.display());
                Self::with_template(&template)
            }
        }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, batches: &[PageBatch]) -> Result<String, RenderError> {
        let context = DocumentContext {
            batches: batches.iter().map(BatchContext::from).collect(),
        };
        let html = self.registry.render(DOCUMENT_TEMPLATE, &context)?;
        debug!("Rendered {} pages ({} bytes)", batches.len(), html.len());
        Ok(html)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template context
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DocumentContext<'a> {
    batches: Vec<BatchContext<'a>>,
}

#[derive(Serialize)]
struct BatchContext<'a> {
    pattern: BatchPattern,
    slug: &'static str,
    cards: Vec<CardContext<'a>>,
}

impl<'a> From<&'a PageBatch> for BatchContext<'a> {
    fn from(batch: &'a PageBatch) -> Self {
        Self {
            pattern: batch.pattern(),
            slug: batch.pattern().slug(),
            cards: batch.cards().iter().map(CardContext::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct CardContext<'a> {
    #[serde(flatten)]
    card: &'a ClassifiedCard,
    /// Type, rarity and attunement, comma-separated, blanks skipped.
    meta: String,
    paragraphs: Vec<Vec<&'a str>>,
}

impl<'a> From<&'a ClassifiedCard> for CardContext<'a> {
    fn from(card: &'a ClassifiedCard) -> Self {
        let record = card.card();
        let meta = [
            record.item_type.as_deref(),
            record.rarity.as_deref(),
            record.attunement.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        let paragraphs = record
            .description
            .as_deref()
            .unwrap_or_default()
            .split(BLANK_LINE)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.lines().collect())
            .collect();

        Self {
            card,
            meta,
            paragraphs,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
