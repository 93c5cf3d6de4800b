use crate::Card;
use std::collections::BTreeSet;

/// Tags the user has picked in the filter bar.
pub type TagSelection = BTreeSet<String>;

/// Sorted, duplicate-free tags across every card.
pub fn all_tags(cards: &[Card]) -> Vec<String> {
    cards
        .iter()
        .flat_map(|c| c.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Cards carrying every selected tag. An empty selection keeps all cards.
pub fn filter_by_tags(cards: &[Card], selected: &TagSelection) -> Vec<Card> {
    if selected.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| selected.iter().all(|t| c.has_tag(t)))
        .cloned()
        .collect()
}

pub fn toggle_tag(selected: &TagSelection, tag: &str) -> TagSelection {
    let mut next = selected.clone();
    if !next.remove(tag) {
        next.insert(tag.to_string());
    }
    next
}

pub fn filter_by_deck(cards: &[Card], deck: &str) -> Vec<Card> {
    let q = deck.trim();
    cards
        .iter()
        .filter(|c| c.deck_name.eq_ignore_ascii_case(q))
        .cloned()
        .collect()
}
