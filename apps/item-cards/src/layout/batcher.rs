//! Page batching: groups sorted cards into printed pages.
//!
//! # Heuristic
//! Cards are split into one pool per size class and pages are filled by a fixed
//! sequence of greedy passes, each run until its condition no longer holds:
//!
//! 1. `[XL]`            an extra-large card takes a page alone
//! 2. `[L, S]`          a large card is topped up with a small one
//! 3. `[M, M]`          two medium cards
//! 4. `[M, S, S]`       one medium and two small cards
//! 5. `[S, S, S, S]`    while more than three small cards remain
//! 6. cleanup, once: every remaining `[L]`; a single `[M, S]`; every remaining
//!    `[M]`; then all leftover small cards on one last page.
//!
//! There is no backtracking. Output depends only on the input order.
//!
//! # Pool discipline
//! Every pool is consumed from its tail: the card that arrived last in a class
//! is the first one placed. Changing this changes which cards share a page.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::layout::size_class::{ClassifiedCard, SizeClass};

/// Cards per page never exceed this.
pub const MAX_CARDS_PER_PAGE: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The composition rule that produced a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPattern {
    /// `[XL]`
    ExtraLarge,
    /// `[L, S]`
    LargeWithSmall,
    /// `[M, M]`
    MediumPair,
    /// `[M, S, S]`
    MediumWithSmallPair,
    /// `[S, S, S, S]`
    SmallQuad,
    /// `[L]` left over after pairing.
    LargeAlone,
    /// `[M, S]` left over after pairing.
    MediumWithSmall,
    /// `[M]` left over after pairing.
    MediumAlone,
    /// One to three small cards left at the end.
    SmallRemainder,
}

impl BatchPattern {
    /// Kebab-case name, used for page CSS classes.
    pub fn slug(self) -> &'static str {
        match self {
            BatchPattern::ExtraLarge => "extra-large",
            BatchPattern::LargeWithSmall => "large-with-small",
            BatchPattern::MediumPair => "medium-pair",
            BatchPattern::MediumWithSmallPair => "medium-with-small-pair",
            BatchPattern::SmallQuad => "small-quad",
            BatchPattern::LargeAlone => "large-alone",
            BatchPattern::MediumWithSmall => "medium-with-small",
            BatchPattern::MediumAlone => "medium-alone",
            BatchPattern::SmallRemainder => "small-remainder",
        }
    }
}

/// The cards printed on a single page, in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBatch {
    pattern: BatchPattern,
    cards: Vec<ClassifiedCard>,
}

impl PageBatch {
    pub fn pattern(&self) -> BatchPattern {
        self.pattern
    }

    pub fn cards(&self) -> &[ClassifiedCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Page space used, in quarter pages, capped at a full page.
    pub fn fill_units(&self) -> u8 {
        let units: u8 = self
            .cards
            .iter()
            .map(|c| c.size_class().fill_units())
            .sum();
        units.min(MAX_CARDS_PER_PAGE as u8)
    }
}

/// Not-yet-placed cards, one pool per size class.
#[derive(Debug, Default)]
struct SizePools {
    extra_large: VecDeque<ClassifiedCard>,
    large: VecDeque<ClassifiedCard>,
    medium: VecDeque<ClassifiedCard>,
    small: VecDeque<ClassifiedCard>,
}

impl SizePools {
    fn partition(cards: Vec<ClassifiedCard>) -> Self {
        let mut pools = Self::default();
        for card in cards {
            pools.pool_mut(card.size_class()).push_back(card);
        }
        pools
    }

    fn pool_mut(&mut self, class: SizeClass) -> &mut VecDeque<ClassifiedCard> {
        match class {
            SizeClass::ExtraLarge => &mut self.extra_large,
            SizeClass::Large => &mut self.large,
            SizeClass::Medium => &mut self.medium,
            SizeClass::Small => &mut self.small,
        }
    }

    fn len(&self, class: SizeClass) -> usize {
        match class {
            SizeClass::ExtraLarge => self.extra_large.len(),
            SizeClass::Large => self.large.len(),
            SizeClass::Medium => self.medium.len(),
            SizeClass::Small => self.small.len(),
        }
    }

    /// Pops one card per listed class, each from the tail of its pool.
    ///
    /// Callers check pool sizes first; a class with an empty pool is skipped.
    fn take(&mut self, pattern: BatchPattern, classes: &[SizeClass]) -> PageBatch {
        let cards: Vec<ClassifiedCard> = classes
            .iter()
            .filter_map(|&class| self.pool_mut(class).pop_back())
            .collect();
        debug_assert_eq!(cards.len(), classes.len());
        PageBatch { pattern, cards }
    }

    /// Empties the small pool in arrival order.
    fn drain_small(&mut self) -> PageBatch {
        PageBatch {
            pattern: BatchPattern::SmallRemainder,
            cards: Vec::from(std::mem::take(&mut self.small)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core function
// ────────────────────────────────────────────────────────────────────────────

/// Groups size-sorted cards into pages.
///
/// Every input card appears in exactly one returned batch, and each batch holds
/// between one and four cards.
pub fn batch_cards(sorted: Vec<ClassifiedCard>) -> Vec<PageBatch> {
    use SizeClass::{ExtraLarge, Large, Medium, Small};

    let mut pools = SizePools::partition(sorted);
    let mut batches = Vec::new();

    while pools.len(ExtraLarge) > 0 {
        batches.push(pools.take(BatchPattern::ExtraLarge, &[ExtraLarge]));
    }
    while pools.len(Large) > 0 && pools.len(Small) > 0 {
        batches.push(pools.take(BatchPattern::LargeWithSmall, &[Large, Small]));
    }
    while pools.len(Medium) >= 2 {
        batches.push(pools.take(BatchPattern::MediumPair, &[Medium, Medium]));
    }
    while pools.len(Medium) > 0 && pools.len(Small) >= 2 {
        batches.push(pools.take(
            BatchPattern::MediumWithSmallPair,
            &[Medium, Small, Small],
        ));
    }
    while pools.len(Small) > 3 {
        batches.push(pools.take(BatchPattern::SmallQuad, &[Small, Small, Small, Small]));
    }

    // Cleanup
    while pools.len(Large) > 0 {
        batches.push(pools.take(BatchPattern::LargeAlone, &[Large]));
    }
    if pools.len(Medium) > 0 && pools.len(Small) > 0 {
        batches.push(pools.take(BatchPattern::MediumWithSmall, &[Medium, Small]));
    }
    while pools.len(Medium) > 0 {
        batches.push(pools.take(BatchPattern::MediumAlone, &[Medium]));
    }
    if pools.len(Small) > 0 {
        batches.push(pools.drain_small());
    }

    debug!("Batched cards into {} pages", batches.len());
    batches
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
