//! Ranking-only composite

use super::Item;
use serde::{Deserialize, Serialize};

/// Matches like its first child; later children only influence relevance
///
/// The parser uses rank combination when explicit structure (a group or an
/// exclusion) meets loose surrounding terms: the query still filters by the
/// explicit part while the rest contributes to scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RankItem {
    items: Vec<Item>,
    /// Explicitly required by the user, exempt from later collapsing
    pub protected: bool,
}

impl RankItem {
    /// Create an empty rank combination
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rank combination owning the given children
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            protected: false,
        }
    }

    /// Create a rank combination of a base item and one ranking-only item
    pub fn pair(base: Item, ranking: Item) -> Self {
        Self::from_items(vec![base, ranking])
    }

    /// The match-defining first child
    pub fn base(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Append a ranking-only child
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Child at `index`
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Remove and return the child at `index`
    ///
    /// Panics if `index` is out of bounds, like `Vec::remove`.
    pub fn remove(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the combination has no children
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All children in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Mutable child list
    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    /// Consume the combination, yielding its children
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::item::WordItem;

    fn word(text: &str) -> Item {
        Item::Word(WordItem::new(text))
    }

    #[test]
    fn test_base_is_first_child() {
        let rank = RankItem::pair(word("base"), word("extra"));
        assert_eq!(rank.base(), Some(&word("base")));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut rank = RankItem::from_items(vec![word("a"), word("b"), word("c")]);
        rank.remove(1);
        assert_eq!(rank.items(), &[word("a"), word("c")]);
    }
}
