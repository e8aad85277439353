//! Card export: turns database rows marked for printing into card records.
//!
//! Each printable row references one or more items and a quantity. Every item
//! yields a base card plus an "identified" and/or "exalted" variant when those
//! descriptions exist, and the item's cards are repeated once per copy.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::size_class::BLANK_LINE;
use crate::models::card::ItemCardRecord;
use crate::notion::NotionError;
use crate::storage::{save_cards, StorageError};

pub mod handlers;

/// Suffix appended to the name of an exalted card.
pub const EXALTED_SUFFIX: &str = " (Exalted)";
/// Largest Count accepted on a single row.
pub const MAX_COPIES: usize = 1_000;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Notion error: {0}")]
    Notion(#[from] NotionError),

    #[error("Row {page_id} has no Count")]
    MissingCount { page_id: String },

    #[error("Row {page_id} has an invalid Count ({count})")]
    InvalidCount { page_id: String, count: f64 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A database row selected for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintRow {
    pub page_id: String,
    /// Copies to print; `None` when the row's Count is blank.
    pub count: Option<f64>,
    /// Item pages referenced by the row, in relation order.
    pub item_ids: Vec<String>,
}

/// Resolved properties of one item page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemProperties {
    pub number: String,
    pub name: String,
    pub attunement: Option<String>,
    pub item_type: Option<String>,
    pub rarity: Option<String>,
    pub description: Option<String>,
    pub description_identified: Option<String>,
    pub description_exalted: Option<String>,
}

/// Where printable rows and their items come from.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn print_rows(&self) -> Result<Vec<PrintRow>, ExportError>;
    async fn item_properties(&self, page_id: &str) -> Result<ItemProperties, ExportError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub count: usize,
    pub path: PathBuf,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Builds the base card and its variants for one item.
///
/// Variant descriptions extend the base description; if the base is missing the
/// variants are left without a description as well, so classification reports
/// the defect instead of printing a partial card.
pub fn expand_item(item: ItemProperties) -> Vec<ItemCardRecord> {
    let identified = item.description_identified.filter(|d| !d.is_empty());
    let exalted = item.description_exalted.filter(|d| !d.is_empty());

    let base = ItemCardRecord {
        number: item.number,
        name: item.name,
        attunement: item.attunement,
        item_type: item.item_type,
        rarity: item.rarity,
        description: item.description,
    };

    let mut cards = Vec::with_capacity(3);

    if let Some(identified) = &identified {
        cards.push(ItemCardRecord {
            description: extend(&base.description, &[identified.as_str()]),
            ..base.clone()
        });
    }

    if let Some(exalted) = &exalted {
        let mut sections: Vec<&str> = Vec::with_capacity(2);
        if let Some(identified) = &identified {
            sections.push(identified.as_str());
        }
        sections.push(exalted.as_str());

        cards.push(ItemCardRecord {
            name: format!("{}{EXALTED_SUFFIX}", base.name),
            description: extend(&base.description, &sections),
            ..base.clone()
        });
    }

    cards.insert(0, base);
    cards
}

fn extend(base: &Option<String>, sections: &[&str]) -> Option<String> {
    base.as_ref().map(|base| {
        let mut description = base.clone();
        for section in sections {
            description.push_str(BLANK_LINE);
            description.push_str(section);
        }
        description
    })
}

/// Number of copies to print for a row.
///
/// A blank Count is an error, as is a negative, fractional or oversized one
/// (above [`MAX_COPIES`]). Zero is allowed and prints nothing.
pub fn copies(row: &PrintRow) -> Result<usize, ExportError> {
    let count = row.count.ok_or_else(|| ExportError::MissingCount {
        page_id: row.page_id.clone(),
    })?;

    if !count.is_finite() || count < 0.0 || count.fract() != 0.0 || count > MAX_COPIES as f64 {
        return Err(ExportError::InvalidCount {
            page_id: row.page_id.clone(),
            count,
        });
    }

    Ok(count as usize)
}

/// Repeats an item's card set `copies` times, as whole sets.
///
/// Returns `None` if the total card count would overflow.
pub fn duplicate(cards: &[ItemCardRecord], copies: usize) -> Option<Vec<ItemCardRecord>> {
    let mut out = Vec::with_capacity(cards.len().checked_mul(copies)?);
    for _ in 0..copies {
        out.extend_from_slice(cards);
    }
    Some(out)
}

/// Reads every printable row from `source` and expands it into cards.
pub async fn collect_cards(source: &dyn ItemSource) -> Result<Vec<ItemCardRecord>, ExportError> {
    let rows = source.print_rows().await?;
    let mut cards = Vec::new();

    for row in rows {
        let copies = copies(&row)?;
        if copies == 0 {
            warn!("Row {} has a Count of 0, skipping", row.page_id);
            continue;
        }

        for item_id in &row.item_ids {
            let item = source.item_properties(item_id).await?;
            let expanded = expand_item(item);
            debug!(
                "Item {} expanded into {} cards × {} copies",
                item_id,
                expanded.len(),
                copies
            );
            let copied =
                duplicate(&expanded, copies).ok_or_else(|| ExportError::InvalidCount {
                    page_id: row.page_id.clone(),
                    count: copies as f64,
                })?;
            cards.extend(copied);
        }
    }

    Ok(cards)
}

/// Collects all printable cards and saves them as the dated artifact in `output_dir`.
pub async fn run_export(
    source: &dyn ItemSource,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<ExportSummary, ExportError> {
    let cards = collect_cards(source).await?;
    let path = save_cards(output_dir, date, &cards).await?;
    info!("Exported {} item cards", cards.len());

    Ok(ExportSummary {
        count: cards.len(),
        path,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
