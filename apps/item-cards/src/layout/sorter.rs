//! Orders classified cards largest first before batching.

use std::cmp::Reverse;

use crate::layout::size_class::ClassifiedCard;

/// Sorts cards by non-increasing size class.
///
/// The sort is stable: cards of the same class keep their arrival order. The
/// batcher consumes each class from the back, so this order decides which
/// cards end up paired together.
pub fn sort_by_size(mut cards: Vec<ClassifiedCard>) -> Vec<ClassifiedCard> {
    cards.sort_by_key(|card| Reverse(card.size_class()));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::size_class::SizeClass;
    use crate::models::card::ItemCardRecord;

    fn make_card(number: &str, len: usize) -> ClassifiedCard {
        ClassifiedCard::classify(ItemCardRecord {
            number: number.to_string(),
            name: format!("Item {number}"),
            attunement: None,
            item_type: None,
            rarity: None,
            description: Some("x".repeat(len)),
        })
        .unwrap()
    }

    #[test]
    fn test_sorts_largest_first() {
        let cards = vec![
            make_card("1", 10),
            make_card("2", 1300),
            make_card("3", 400),
            make_card("4", 700),
        ];
        let classes: Vec<SizeClass> = sort_by_size(cards)
            .iter()
            .map(ClassifiedCard::size_class)
            .collect();
        assert_eq!(
            classes,
            vec![
                SizeClass::ExtraLarge,
                SizeClass::Large,
                SizeClass::Medium,
                SizeClass::Small
            ]
        );
    }

    #[test]
    fn test_equal_classes_keep_arrival_order() {
        let cards = vec![
            make_card("s1", 10),
            make_card("m1", 400),
            make_card("s2", 20),
            make_card("m2", 500),
            make_card("s3", 30),
        ];
        let numbers: Vec<String> = sort_by_size(cards)
            .iter()
            .map(|c| c.card().number.clone())
            .collect();
        assert_eq!(numbers, vec!["m1", "m2", "s1", "s2", "s3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_by_size(Vec::new()).is_empty());
    }
}
