//! Notion page-property payloads and their conversion into plain values.
//!
//! The property-item endpoint answers either with a single `property_item`
//! (number, select) or with a paginated `list` of items (title,
//! rich text, relation). Only the shapes this exporter reads are modelled.

use serde::Deserialize;

/// Response of `GET /v1/pages/{page_id}/properties/{property_id}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum PropertyResponse {
    List(PropertyItemList),
    PropertyItem(PropertyItem),
}

#[derive(Debug, Deserialize)]
pub struct PropertyItemList {
    pub results: Vec<PropertyItem>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyItem {
    Title { title: RichText },
    RichText { rich_text: RichText },
    Relation { relation: Relation },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relation {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Resolvers
// ────────────────────────────────────────────────────────────────────────────

/// Concatenated rich text, or `None` when the property holds no fragments.
pub fn rich_text(items: &[PropertyItem]) -> Option<String> {
    let fragments: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            PropertyItem::RichText { rich_text } => Some(rich_text.plain_text.as_str()),
            _ => None,
        })
        .collect();

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.concat())
    }
}

/// Concatenated title text; empty when the title is blank.
pub fn title(items: &[PropertyItem]) -> String {
    items
        .iter()
        .filter_map(|item| match item {
            PropertyItem::Title { title } => Some(title.plain_text.as_str()),
            _ => None,
        })
        .collect()
}

pub fn relation_ids(items: &[PropertyItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            PropertyItem::Relation { relation } => Some(relation.id.clone()),
            _ => None,
        })
        .collect()
}

pub fn select_name(items: &[PropertyItem]) -> Option<String> {
    items.iter().find_map(|item| match item {
        PropertyItem::Select { select } => select.as_ref().map(|s| s.name.clone()),
        _ => None,
    })
}

pub fn number(items: &[PropertyItem]) -> Option<f64> {
    items.iter().find_map(|item| match item {
        PropertyItem::Number { number } => *number,
        _ => None,
    })
}

/// Renders an item number zero-padded to six characters.
///
/// Whole numbers print without a fractional part (`42.0` → `"000042"`).
pub fn pad_number(value: f64) -> String {
    let text = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    };
    format!("{text:0>6}")
}
