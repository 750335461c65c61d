//! Abstract syntax tree for parsed queries
//!
//! Query items form a tree: leaves are single indexable units (a term or a
//! phrase), composites own an ordered list of children combined under one
//! boolean operator. Two composites are special: [`NotItem`] models
//! "positive AND NOT (any negative)", [`RankItem`] matches like its first
//! child and uses the rest only for relevance.

pub mod composite;
pub mod not;
pub mod phrase;
pub mod rank;
pub mod word;

pub use composite::{AndItem, OrItem};
pub use not::NotItem;
pub use phrase::PhraseItem;
pub use rank::RankItem;
pub use word::WordItem;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the parsed query tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// A single term, optionally field-qualified
    Word(WordItem),
    /// A quoted phrase, optionally field-qualified
    Phrase(PhraseItem),
    /// All children must match
    And(AndItem),
    /// At least one child must match
    Or(OrItem),
    /// Positive must match, no negative may match
    Not(NotItem),
    /// First child filters, the rest only affect ranking
    Rank(RankItem),
}

impl Item {
    /// Whether this item is a bare indexable unit that cannot own children
    pub fn is_leaf(&self) -> bool {
        matches!(self, Item::Word(_) | Item::Phrase(_))
    }

    /// Short name of the item shape, for logging and debugging
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Word(_) => "word",
            Item::Phrase(_) => "phrase",
            Item::And(_) => "and",
            Item::Or(_) => "or",
            Item::Not(_) => "not",
            Item::Rank(_) => "rank",
        }
    }

    /// Children of a generic composite (AND, OR, RANK)
    ///
    /// `None` for leaves and for `NotItem`, whose two slots are not an
    /// ordinary child list.
    pub fn children(&self) -> Option<&[Item]> {
        match self {
            Item::And(and) => Some(and.items()),
            Item::Or(or) => Some(or.items()),
            Item::Rank(rank) => Some(rank.items()),
            _ => None,
        }
    }

    /// Mutable children of a generic composite (AND, OR, RANK)
    pub fn children_mut(&mut self) -> Option<&mut Vec<Item>> {
        match self {
            Item::And(and) => Some(and.items_mut()),
            Item::Or(or) => Some(or.items_mut()),
            Item::Rank(rank) => Some(rank.items_mut()),
            _ => None,
        }
    }

    /// Mark this item as explicitly required by the user
    ///
    /// Protected items are exempt from later collapsing and simplification
    /// stages; the flag must survive every merge performed by the parser.
    pub fn set_protected(&mut self, protected: bool) {
        match self {
            Item::Word(word) => word.protected = protected,
            Item::Phrase(phrase) => phrase.protected = protected,
            Item::And(and) => and.protected = protected,
            Item::Or(or) => or.protected = protected,
            Item::Not(not) => not.protected = protected,
            Item::Rank(rank) => rank.protected = protected,
        }
    }

    /// Whether this item was explicitly required by the user
    pub fn is_protected(&self) -> bool {
        match self {
            Item::Word(word) => word.protected,
            Item::Phrase(phrase) => phrase.protected,
            Item::And(and) => and.protected,
            Item::Or(or) => or.protected,
            Item::Not(not) => not.protected,
            Item::Rank(rank) => rank.protected,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Word(word) => word.fmt(f),
            Item::Phrase(phrase) => phrase.fmt(f),
            Item::And(and) => write_composite(f, "AND", and.items()),
            Item::Or(or) => write_composite(f, "OR", or.items()),
            Item::Rank(rank) => write_composite(f, "RANK", rank.items()),
            Item::Not(not) => not.fmt(f),
        }
    }
}

fn write_composite(f: &mut fmt::Formatter<'_>, operator: &str, items: &[Item]) -> fmt::Result {
    write!(f, "({operator}")?;
    for item in items {
        write!(f, " {item}")?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_classification() {
        assert!(Item::Word(WordItem::new("a")).is_leaf());
        assert!(Item::Phrase(PhraseItem::new(vec!["a".into(), "b".into()])).is_leaf());
        assert!(!Item::Or(OrItem::new()).is_leaf());
        assert!(!Item::Not(NotItem::new()).is_leaf());
    }

    #[test]
    fn test_children_only_on_generic_composites() {
        let or = Item::Or(OrItem::from_items(vec![Item::Word(WordItem::new("a"))]));
        assert_eq!(or.children().map(<[Item]>::len), Some(1));

        let mut not = NotItem::new();
        not.add_negative(Item::Word(WordItem::new("a")));
        assert!(Item::Not(not).children().is_none());
        assert!(Item::Word(WordItem::new("a")).children().is_none());
    }

    #[test]
    fn test_protected_flag_round_trip() {
        let mut item = Item::Word(WordItem::new("a"));
        assert!(!item.is_protected());
        item.set_protected(true);
        assert!(item.is_protected());
    }

    #[test]
    fn test_display_nested() {
        let or = Item::Or(OrItem::from_items(vec![
            Item::Word(WordItem::new("a")),
            Item::Word(WordItem::new("b")),
        ]));
        let and = Item::And(AndItem::from_items(vec![
            or,
            Item::Word(WordItem::new("c")),
        ]));
        assert_eq!(and.to_string(), "(AND (OR a b) c)");
    }
}
