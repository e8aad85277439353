//! Page Fill Analysis: reports how well the batched pages use their space.
//!
//! Fill is measured in quarter pages: a small card takes one quarter, a medium
//! card two, a large card three and an extra-large card the whole page. The
//! batching heuristic aims for full pages but only the leftover passes should
//! ever produce partial ones.

use serde::Serialize;

use crate::layout::batcher::PageBatch;
use crate::layout::size_class::SizeClass;

/// Quarter-page units on one page.
pub const PAGE_UNITS: u8 = 4;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Fill verdict for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// All four quarters used.
    Full,
    /// At least one quarter left blank.
    Underfilled,
}

/// Number of cards in each size class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub extra_large: usize,
    pub large: usize,
    pub medium: usize,
    pub small: usize,
}

impl ClassCounts {
    fn add(&mut self, class: SizeClass) {
        match class {
            SizeClass::ExtraLarge => self.extra_large += 1,
            SizeClass::Large => self.large += 1,
            SizeClass::Medium => self.medium += 1,
            SizeClass::Small => self.small += 1,
        }
    }
}

/// Whole-run page fill analysis.
#[derive(Debug, Clone, Serialize)]
pub struct PageFillAnalysis {
    pub card_count: usize,
    pub page_count: usize,
    pub class_counts: ClassCounts,
    pub full_pages: usize,
    pub underfilled_pages: usize,
    /// Mean fraction of each page in use, 0.0 for an empty run.
    pub mean_fill_fraction: f32,
    pub verdicts: Vec<PageFillVerdict>,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

pub fn page_verdict(batch: &PageBatch) -> PageFillVerdict {
    if batch.fill_units() >= PAGE_UNITS {
        PageFillVerdict::Full
    } else {
        PageFillVerdict::Underfilled
    }
}

/// Analyzes the fill of every page in a batched run.
pub fn analyze_page_fill(batches: &[PageBatch]) -> PageFillAnalysis {
    let mut class_counts = ClassCounts::default();
    for card in batches.iter().flat_map(|b| b.cards()) {
        class_counts.add(card.size_class());
    }

    let verdicts: Vec<PageFillVerdict> = batches.iter().map(page_verdict).collect();
    let full_pages = verdicts
        .iter()
        .filter(|v| **v == PageFillVerdict::Full)
        .count();

    let total_units: u32 = batches.iter().map(|b| u32::from(b.fill_units())).sum();
    let mean_fill_fraction = if batches.is_empty() {
        0.0
    } else {
        total_units as f32 / (batches.len() as f32 * f32::from(PAGE_UNITS))
    };

    PageFillAnalysis {
        card_count: batches.iter().map(PageBatch::len).sum(),
        page_count: batches.len(),
        class_counts,
        full_pages,
        underfilled_pages: batches.len() - full_pages,
        mean_fill_fraction,
        verdicts,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::batcher::batch_cards;
    use crate::layout::size_class::ClassifiedCard;
    use crate::models::card::ItemCardRecord;

    fn make_card(id: &str, len: usize) -> ClassifiedCard {
        ClassifiedCard::classify(ItemCardRecord {
            number: id.to_string(),
            name: id.to_string(),
            attunement: None,
            item_type: None,
            rarity: None,
            description: Some("x".repeat(len)),
        })
        .unwrap()
    }

    #[test]
    fn test_empty_run() {
        let analysis = analyze_page_fill(&[]);
        assert_eq!(analysis.page_count, 0);
        assert_eq!(analysis.card_count, 0);
        assert_eq!(analysis.mean_fill_fraction, 0.0);
    }

    #[test]
    fn test_all_full_pages() {
        // [xl], [m, m]
        let batches = batch_cards(vec![
            make_card("xl", 1300),
            make_card("m1", 400),
            make_card("m2", 400),
        ]);
        let analysis = analyze_page_fill(&batches);
        assert_eq!(analysis.page_count, 2);
        assert_eq!(analysis.card_count, 3);
        assert_eq!(analysis.full_pages, 2);
        assert_eq!(analysis.underfilled_pages, 0);
        assert!((analysis.mean_fill_fraction - 1.0).abs() < 1e-6);
        assert_eq!(analysis.class_counts.extra_large, 1);
        assert_eq!(analysis.class_counts.medium, 2);
    }

    #[test]
    fn test_leftover_small_page_is_underfilled() {
        // [xl], [s]
        let batches = batch_cards(vec![make_card("xl", 1300), make_card("s", 10)]);
        let analysis = analyze_page_fill(&batches);
        assert_eq!(
            analysis.verdicts,
            vec![PageFillVerdict::Full, PageFillVerdict::Underfilled]
        );
        // (4 + 1) / 8
        assert!((analysis.mean_fill_fraction - 0.625).abs() < 1e-6);
    }
}
