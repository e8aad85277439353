//! Card size classification.
//!
//! A card's rendered footprint is estimated from its description length, with
//! every blank line (paragraph break) weighted as if it were 50 characters of
//! text. An attunement line costs the same as two blank lines.
//!
//! # Size classes
//! - weighted length ≤ 300          → Small (a quarter page)
//! - 300 < weighted length ≤ 650    → Medium (half a page)
//! - 650 < weighted length ≤ 1200   → Large (three quarters)
//! - weighted length > 1200         → ExtraLarge (a full page)

use serde::Serialize;
use thiserror::Error;

use crate::models::card::ItemCardRecord;

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// Separator between description paragraphs.
pub const BLANK_LINE: &str = "\n\n";
/// Characters charged for each blank line.
pub const BLANK_LINE_WEIGHT: usize = 50;
/// Blank lines charged for a non-empty attunement line.
pub const ATTUNEMENT_BLANK_LINES: usize = 2;

pub const SMALL_MAX_LENGTH: usize = 300;
pub const MEDIUM_MAX_LENGTH: usize = 650;
pub const LARGE_MAX_LENGTH: usize = 1200;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Card {number} ({name}) has no description")]
    MissingDescription { number: String, name: String },
}

/// Size class of a card, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum SizeClass {
    Small = 0,
    Medium = 1,
    Large = 2,
    ExtraLarge = 3,
}

impl SizeClass {
    pub fn from_weighted_length(weighted_length: usize) -> Self {
        if weighted_length > LARGE_MAX_LENGTH {
            SizeClass::ExtraLarge
        } else if weighted_length > MEDIUM_MAX_LENGTH {
            SizeClass::Large
        } else if weighted_length > SMALL_MAX_LENGTH {
            SizeClass::Medium
        } else {
            SizeClass::Small
        }
    }

    /// Page space taken by one card of this class, in quarter pages.
    pub fn fill_units(self) -> u8 {
        match self {
            SizeClass::Small => 1,
            SizeClass::Medium => 2,
            SizeClass::Large => 3,
            SizeClass::ExtraLarge => 4,
        }
    }
}

impl From<SizeClass> for u8 {
    fn from(class: SizeClass) -> u8 {
        class as u8
    }
}

/// A card together with its size class.
///
/// The class is computed once in [`ClassifiedCard::classify`] and cannot be
/// changed afterwards; the record itself is only reachable by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCard {
    #[serde(flatten)]
    card: ItemCardRecord,
    #[serde(rename = "sizeClass")]
    size_class: SizeClass,
}

impl ClassifiedCard {
    pub fn classify(card: ItemCardRecord) -> Result<Self, LayoutError> {
        let size_class = classify(&card)?;
        Ok(Self { card, size_class })
    }

    pub fn card(&self) -> &ItemCardRecord {
        &self.card
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Weighted description length used for classification.
///
/// Length is counted in UTF-16 code units so that cards classify the same way
/// they did when the artifact format was introduced.
pub fn weighted_length(description: &str, attunement: Option<&str>) -> usize {
    let blank_lines = description.matches(BLANK_LINE).count();
    let attunement_lines = if attunement.is_some_and(|a| !a.is_empty()) {
        ATTUNEMENT_BLANK_LINES
    } else {
        0
    };

    description.encode_utf16().count() + BLANK_LINE_WEIGHT * (blank_lines + attunement_lines)
}

/// Classifies a card. Fails if the card has no description.
pub fn classify(card: &ItemCardRecord) -> Result<SizeClass, LayoutError> {
    let description = card
        .description
        .as_deref()
        .ok_or_else(|| LayoutError::MissingDescription {
            number: card.number.clone(),
            name: card.name.clone(),
        })?;

    Ok(SizeClass::from_weighted_length(weighted_length(
        description,
        card.attunement.as_deref(),
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
