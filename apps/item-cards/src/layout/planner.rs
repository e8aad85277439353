//! Classify → sort → batch pipeline.

use serde::Serialize;
use tracing::info;

use crate::layout::batcher::{batch_cards, PageBatch};
use crate::layout::page_fill::{analyze_page_fill, PageFillAnalysis};
use crate::layout::size_class::{ClassifiedCard, LayoutError};
use crate::layout::sorter::sort_by_size;
use crate::models::card::ItemCardRecord;

/// Pages ready for rendering, with their fill analysis.
#[derive(Debug, Clone, Serialize)]
pub struct PagePlan {
    pub batches: Vec<PageBatch>,
    pub summary: PageFillAnalysis,
}

/// Lays out a full set of cards onto pages.
///
/// Every card is classified before anything is batched; the first card without
/// a description aborts the whole plan.
pub fn plan_pages(records: Vec<ItemCardRecord>) -> Result<PagePlan, LayoutError> {
    let classified = records
        .into_iter()
        .map(ClassifiedCard::classify)
        .collect::<Result<Vec<_>, _>>()?;

    let batches = batch_cards(sort_by_size(classified));
    let summary = analyze_page_fill(&batches);

    info!(
        "Planned {} cards onto {} pages ({} underfilled)",
        summary.card_count, summary.page_count, summary.underfilled_pages
    );

    Ok(PagePlan { batches, summary })
}
