use serde::{Deserialize, Serialize};

/// One printable card, as produced by the exporter and persisted in the
/// dated `item_cards_*.json` artifact.
///
/// `description` stays optional here so that a card exported from an item with
/// an empty description can still be stored; classification rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCardRecord {
    /// Item number, zero-padded to six digits.
    pub number: String,
    pub name: String,
    pub attunement: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub rarity: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card() -> ItemCardRecord {
        ItemCardRecord {
            number: "000042".to_string(),
            name: "Cloak of Elvenkind".to_string(),
            attunement: Some("Requires attunement".to_string()),
            item_type: Some("Wondrous item".to_string()),
            rarity: Some("Uncommon".to_string()),
            description: Some("While you wear this cloak...".to_string()),
        }
    }

    #[test]
    fn test_serializes_type_field_name() {
        let json = serde_json::to_value(make_card()).unwrap();
        assert_eq!(json["type"], "Wondrous item");
        assert!(json.get("item_type").is_none());
        assert!(json.get("sizeClass").is_none());
    }

    #[test]
    fn test_null_and_missing_fields_decode_as_none() {
        let card: ItemCardRecord = serde_json::from_str(
            r#"{"number":"000001","name":"Rope","attunement":null,"type":null,"rarity":"Common"}"#,
        )
        .unwrap();
        assert_eq!(card.attunement, None);
        assert_eq!(card.item_type, None);
        assert_eq!(card.description, None);
    }

    #[test]
    fn test_non_string_description_is_rejected() {
        let result = serde_json::from_str::<ItemCardRecord>(
            r#"{"number":"000001","name":"Rope","attunement":null,"type":null,"rarity":null,"description":42}"#,
        );
        assert!(result.is_err(), "numeric description must not be coerced");
    }
}
