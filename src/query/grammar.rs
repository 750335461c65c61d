//! Query-language variants
//!
//! The sequence assembler is generic over the parts of the grammar that
//! differ between query languages: how new structure merges into existing
//! top-level content, how exclusions are written, and what the top-level
//! production looks like. [`Grammar`] is that seam; [`AnyGrammar`] and
//! [`AllGrammar`] are the two shipped variants.

use serde::{Deserialize, Serialize};

use super::item::{AndItem, Item, NotItem, RankItem};
use super::lexer::TokenKind;
use super::simple::SimpleParser;

/// Grammar-variant hooks injected into the sequence assembler
pub trait Grammar {
    /// Merge `item` into existing top-level content
    ///
    /// Must return a single item equivalent to both operands combined under
    /// the variant's default operator, and must not fail or partially
    /// mutate. Ordering contract relied on by the assembler's exclusion
    /// tracking: when `top` is already a compatible composite the item is
    /// appended at the end in place; otherwise the result is a new
    /// composite, or a fold of one operand into the other, with the two
    /// operands kept in order.
    fn combine(&self, top: Option<Item>, item: Item) -> Item;

    /// Exclusion production: `-` markers glued to a leaf or group
    ///
    /// A leading run of `+` markers is tolerated, the `-` run is required,
    /// and whitespace between the markers and the item fails the
    /// production. Restores the stream position on failure.
    fn parse_negative(&self, parser: &mut SimpleParser<'_>) -> Option<Item> {
        parser.attempt(|p| {
            p.stream_mut().skip_all(TokenKind::Plus);
            if !p.stream_mut().skip_all(TokenKind::Minus) {
                return None;
            }
            if p.stream().current_is_raw(TokenKind::Space) {
                return None;
            }
            p.parse_leaf().or_else(|| p.parse_group())
        })
    }

    /// Top-level production: greedily parse the whole remaining input
    fn parse_top(&self, parser: &mut SimpleParser<'_>) -> Option<Item> {
        parser.parse_sequence(true)
    }
}

/// Disjunctive query language: a document matches when any term matches
///
/// Loose terms collect into an OR composite. Explicit structure (a group or
/// an exclusion) meeting other top-level content is rank-combined: the
/// structure keeps filtering while the rest only contributes to relevance.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyGrammar;

impl Grammar for AnyGrammar {
    fn combine(&self, top: Option<Item>, item: Item) -> Item {
        match top {
            None => item,
            Some(Item::Rank(mut rank)) => {
                rank.push(item);
                Item::Rank(rank)
            }
            Some(other) => Item::Rank(RankItem::pair(other, item)),
        }
    }
}

/// Conjunctive query language: a document matches when every term matches
///
/// The top-level production collects required items into an AND composite
/// and exclusions into a single pending `NotItem`. Nested groups still use
/// the shared sequence assembler, so parenthesized content keeps its own
/// operator.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllGrammar;

impl Grammar for AllGrammar {
    fn combine(&self, top: Option<Item>, item: Item) -> Item {
        match (top, item) {
            (None, item) => item,
            (Some(Item::Not(mut not)), Item::Not(other)) => {
                let (positive, negatives) = other.into_parts();
                if let Some(positive) = positive {
                    not.add_positive(positive);
                }
                for negative in negatives {
                    not.add_negative(negative);
                }
                Item::Not(not)
            }
            (Some(Item::Not(mut not)), item) => {
                not.add_positive(item);
                Item::Not(not)
            }
            (Some(top), Item::Not(mut not)) => {
                not.add_positive(top);
                Item::Not(not)
            }
            (Some(Item::And(mut and)), item) => {
                and.push(item);
                Item::And(and)
            }
            (Some(top), item) => Item::And(AndItem::pair(top, item)),
        }
    }

    fn parse_top(&self, parser: &mut SimpleParser<'_>) -> Option<Item> {
        parser.attempt(|p| {
            let mut required: Option<AndItem> = None;
            let mut not: Option<NotItem> = None;

            while p.stream().has_next() {
                if let Some(item) = self.parse_negative(p) {
                    not.get_or_insert_with(NotItem::new).add_negative(item);
                    continue;
                }
                let item = p
                    .parse_positive()
                    .or_else(|| p.parse_group())
                    .or_else(|| p.parse_leaf());
                match item {
                    Some(item) => required.get_or_insert_with(AndItem::new).push(item),
                    None => p.stream_mut().skip(),
                }
            }

            match (required.map(unwrap_single), not) {
                // exclusions without anything required are unanchored
                (None, _) => None,
                (Some(positive), None) => Some(positive),
                (Some(positive), Some(mut not)) => {
                    not.add_positive(positive);
                    Some(Item::Not(not))
                }
            }
        })
    }
}

fn unwrap_single(mut and: AndItem) -> Item {
    if and.len() == 1 {
        and.remove(0)
    } else {
        Item::And(and)
    }
}

/// Which query language interprets the input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Match documents containing any of the terms
    #[default]
    Any,
    /// Match documents containing all of the terms
    All,
}

impl QueryType {
    /// The grammar variant implementing this query type
    pub fn grammar(self) -> &'static dyn Grammar {
        match self {
            QueryType::Any => &AnyGrammar,
            QueryType::All => &AllGrammar,
        }
    }
}
