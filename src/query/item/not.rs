//! Exclusion composite

use super::{AndItem, Item};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Matches iff the positive matches (or is absent) and no negative matches
///
/// The positive slot is single-valued: what must be present for a document
/// to match at all. The negatives are an unordered set semantically; their
/// insertion order is preserved for deterministic output. A `NotItem` whose
/// only child is the positive is a degenerate intermediate state the parser
/// resolves away before returning.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotItem {
    positive: Option<Box<Item>>,
    negatives: Vec<Item>,
    /// Explicitly required by the user, exempt from later collapsing
    pub protected: bool,
}

impl NotItem {
    /// Create an empty exclusion with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positive (required) item
    ///
    /// Sets the slot when it is empty. A second positive is AND-combined
    /// with the existing one: both were explicitly required, so requiring
    /// their conjunction is the only reading that loses neither.
    pub fn add_positive(&mut self, item: Item) {
        self.positive = Some(Box::new(match self.positive.take() {
            None => item,
            Some(existing) => match *existing {
                Item::And(mut and) => {
                    and.push(item);
                    Item::And(and)
                }
                other => Item::And(AndItem::pair(other, item)),
            },
        }));
    }

    /// Add a negative (forbidden) item
    pub fn add_negative(&mut self, item: Item) {
        self.negatives.push(item);
    }

    /// The positive slot, if set
    pub fn positive(&self) -> Option<&Item> {
        self.positive.as_deref()
    }

    /// Remove and return the positive slot
    pub fn take_positive(&mut self) -> Option<Item> {
        self.positive.take().map(|boxed| *boxed)
    }

    /// The forbidden items, in insertion order
    pub fn negatives(&self) -> &[Item] {
        &self.negatives
    }

    /// Total child count across both slots
    pub fn len(&self) -> usize {
        self.negatives.len() + usize::from(self.positive.is_some())
    }

    /// Whether the exclusion holds no children at all
    pub fn is_empty(&self) -> bool {
        self.positive.is_none() && self.negatives.is_empty()
    }

    /// Consume the item, yielding the positive slot and the negatives
    pub fn into_parts(self) -> (Option<Item>, Vec<Item>) {
        (self.positive.map(|boxed| *boxed), self.negatives)
    }
}

impl fmt::Display for NotItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        if let Some(positive) = &self.positive {
            write!(f, "+{positive}")?;
        }
        for (i, negative) in self.negatives.iter().enumerate() {
            if i > 0 || self.positive.is_some() {
                write!(f, " ")?;
            }
            write!(f, "-{negative}")?;
        }
        write!(f, ")")
    }
}
