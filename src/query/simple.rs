//! Sequence assembler for the simple query syntax
//!
//! # Grammar
//!
//! ```text
//! sequence := (positive | negative | group | leaf)*
//! positive := '+'+ (leaf | group)        // no space after the markers
//! negative := '+'* '-'+ (leaf | group)   // no space after the markers
//! group    := '(' sequence ')'
//! leaf     := term | field ':' term | [field ':'] phrase
//! ```
//!
//! [`SimpleParser::parse_sequence`] consumes a run of productions and folds
//! them into one well-formed [`Item`]. Inclusion and exclusion markers build
//! a single pending [`NotItem`] which is merged into the top-level tree as
//! soon as it appears and resolved after the loop: a lone positive is
//! unwrapped, surrounding loose content becomes the implicit positive of a
//! negatives-only exclusion, and a pure unanchored negation parses to
//! nothing at all.
//!
//! At top level the loop is greedy and tolerant: a token no production
//! recognizes is skipped and scanning continues. Nested (group) parses are
//! strict and stop at the first unmatched token, leaving it for the
//! enclosing production to judge.
//!
//! Every production backtracks completely: returning `None` always restores
//! the token stream to the position the production started at.

use tracing::trace;

use super::grammar::Grammar;
use super::item::{Item, NotItem, OrItem};
use super::lexer::TokenKind;
use super::stream::TokenStream;

/// Recursive-descent parser over a backtrackable token stream
///
/// The grammar variant supplies the negative-marker production and the
/// policy for merging new structure into existing top-level content; the
/// parser owns everything else.
pub struct SimpleParser<'a> {
    pub(crate) tokens: TokenStream<'a>,
    grammar: &'a dyn Grammar,
}

/// Where the pending exclusion currently sits inside the top-level item.
///
/// The merge contract appends at the end of an existing composite or builds
/// a new one with its two operands in order, so the exclusion is always the
/// root or a direct child and its index never shifts once assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NotAnchor {
    Root,
    Child(usize),
}

impl<'a> SimpleParser<'a> {
    /// Create a parser over `tokens` using the given grammar variant
    pub fn new(tokens: TokenStream<'a>, grammar: &'a dyn Grammar) -> Self {
        Self { tokens, grammar }
    }

    /// The underlying token stream
    pub fn stream(&self) -> &TokenStream<'a> {
        &self.tokens
    }

    /// Mutable access to the underlying token stream
    pub fn stream_mut(&mut self) -> &mut TokenStream<'a> {
        &mut self.tokens
    }

    /// Run a production with guaranteed backtracking
    ///
    /// When `body` yields `None` the stream position is restored to where it
    /// was on entry; on success the consumed span stays consumed.
    pub fn attempt<T>(&mut self, body: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.tokens.position();
        let result = body(self);
        if result.is_none() {
            self.tokens.set_position(snapshot);
        }
        result
    }

    /// Parse a run of items into one combined item
    ///
    /// `top_level` selects greedy, tolerant scanning to the end of input;
    /// nested calls stop at the first token no production matches. Returns
    /// `None`, with the stream position restored, when the span reduces to
    /// nothing.
    pub fn parse_sequence(&mut self, top_level: bool) -> Option<Item> {
        self.attempt(|p| p.parse_sequence_body(top_level))
    }

    fn parse_sequence_body(&mut self, top_level: bool) -> Option<Item> {
        let grammar = self.grammar;
        let mut top: Option<Item> = None;
        let mut anchor: Option<NotAnchor> = None;

        loop {
            let mut produced = true;

            if let Some(item) = self.parse_positive() {
                match anchor {
                    Some(at) => at
                        .builder_mut(top.as_mut().expect("anchored exclusions live in the top level"))
                        .add_positive(item),
                    None => {
                        let mut builder = NotItem::new();
                        builder.add_positive(item);
                        let combined = grammar.combine(top.take(), Item::Not(builder));
                        anchor = Some(NotAnchor::locate(&combined));
                        top = Some(combined);
                    }
                }
            } else if let Some(item) = grammar.parse_negative(self) {
                match anchor {
                    Some(at) => at
                        .builder_mut(top.as_mut().expect("anchored exclusions live in the top level"))
                        .add_negative(item),
                    None => {
                        let mut builder = NotItem::new();
                        builder.add_negative(item);
                        let combined = grammar.combine(top.take(), Item::Not(builder));
                        anchor = Some(NotAnchor::locate(&combined));
                        top = Some(combined);
                    }
                }
            } else if let Some(item) = self.parse_group() {
                top = Some(match top.take() {
                    None => item,
                    Some(current) => {
                        let combined = grammar.combine(Some(current), item);
                        if let Some(at) = anchor {
                            anchor = Some(at.after_combine(&combined));
                        }
                        combined
                    }
                });
            } else if let Some(item) = self.parse_leaf() {
                top = Some(match top.take() {
                    None => item,
                    Some(current) if needs_new_top_level(&current) => {
                        debug_assert!(anchor.is_none());
                        Item::Or(OrItem::pair(current, item))
                    }
                    Some(current @ Item::Not(_)) => {
                        // an exclusion cannot accept a plain append
                        let combined = grammar.combine(Some(current), item);
                        if let Some(at) = anchor {
                            anchor = Some(at.after_combine(&combined));
                        }
                        combined
                    }
                    Some(mut current) => {
                        current
                            .children_mut()
                            .expect("tops that reject appends are handled above")
                            .push(item);
                        current
                    }
                });
            } else {
                produced = false;
                if top_level {
                    if let Some(token) = self.tokens.current() {
                        trace!(text = token.text, "skipping unrecognized token");
                    }
                    self.tokens.skip();
                }
            }

            if !(self.tokens.has_next() && (top_level || produced)) {
                break;
            }
        }

        self.resolve_pending_not(top, anchor)
    }

    /// One or more `+` markers glued to a leaf or group
    ///
    /// The marker run must touch the following item; a marker followed by
    /// whitespace is not an inclusion. The produced item is protected from
    /// later collapsing.
    pub fn parse_positive(&mut self) -> Option<Item> {
        self.attempt(|p| {
            if !p.tokens.skip_all(TokenKind::Plus) {
                return None;
            }
            if p.tokens.current_is_raw(TokenKind::Space) {
                return None;
            }
            let mut item = p.parse_leaf().or_else(|| p.parse_group())?;
            item.set_protected(true);
            Some(item)
        })
    }

    /// Resolve the pending exclusion once the scan is over
    fn resolve_pending_not(&self, top: Option<Item>, anchor: Option<NotAnchor>) -> Option<Item> {
        let Some(anchor) = anchor else { return top };
        let mut top = top.expect("a pending exclusion is always merged into the top level");

        let (total_children, has_positive) = {
            let builder = anchor.builder_mut(&mut top);
            (builder.len(), builder.positive().is_some())
        };

        if total_children == 1 && has_positive {
            // Only ever received a positive: unwrap it and drop the shell.
            return Some(match (anchor, top) {
                (NotAnchor::Root, Item::Not(mut not)) => {
                    not.take_positive().expect("positive presence checked above")
                }
                (NotAnchor::Child(index), Item::Rank(mut rank)) => {
                    let Item::Not(mut not) = rank.remove(index) else {
                        unreachable!("the anchor always addresses the pending exclusion")
                    };
                    let positive = not.take_positive().expect("positive presence checked above");
                    self.grammar.combine(Some(Item::Rank(rank)), positive)
                }
                // merge contracts outside this crate may anchor elsewhere;
                // leave such trees as built
                (_, other) => other,
            });
        }

        if !has_positive {
            // Negatives only. Without surrounding content the exclusion is
            // unanchored and meaningless; with it, that content becomes the
            // implicit positive.
            return match anchor {
                NotAnchor::Root => None,
                NotAnchor::Child(index) => {
                    let (mut not, positive) = split_implicit_positive(top, index);
                    not.add_positive(positive);
                    Some(Item::Not(not))
                }
            };
        }

        Some(top)
    }
}

impl NotAnchor {
    /// Locate a freshly merged exclusion inside the combined top level
    fn locate(top: &Item) -> Self {
        match top {
            Item::Not(_) => NotAnchor::Root,
            other => {
                let children = other
                    .children()
                    .expect("the merge contract anchors the pending exclusion in a composite");
                debug_assert!(matches!(children.last(), Some(Item::Not(_))));
                NotAnchor::Child(children.len() - 1)
            }
        }
    }

    /// Re-locate the exclusion after further top-level merges
    fn after_combine(self, top: &Item) -> Self {
        match self {
            // the exclusion was the whole top level and got wrapped
            NotAnchor::Root if !matches!(top, Item::Not(_)) => NotAnchor::Child(0),
            anchor => anchor,
        }
    }

    fn builder_mut(self, top: &mut Item) -> &mut NotItem {
        let slot = match self {
            NotAnchor::Root => top,
            NotAnchor::Child(index) => top
                .children_mut()
                .and_then(|children| children.get_mut(index))
                .expect("the anchored child index stays in bounds"),
        };
        match slot {
            Item::Not(not) => not,
            _ => unreachable!("the anchor always addresses the pending exclusion"),
        }
    }
}

/// Whether merging a new leaf into `top` requires promoting into a fresh
/// composite: bare leaves cannot own children. False for every composite,
/// including exclusions, whose combination goes through the merge contract
/// instead of a blind append.
fn needs_new_top_level(top: &Item) -> bool {
    top.is_leaf()
}

/// Turn the content surrounding a negatives-only exclusion into its
/// implicit positive
///
/// Removes the exclusion from the rank combination that anchors it. The
/// leftover children were ranking-only loose terms: a single leftover is
/// used directly, several are OR-combined. A child anchor only ever points
/// into a rank combination: a merge contract that wraps differently either
/// folds the exclusion to the root or appends to its own composite kind,
/// and neither shape reaches this resolution.
fn split_implicit_positive(top: Item, index: usize) -> (NotItem, Item) {
    let Item::Rank(mut rank) = top else {
        unreachable!("a child-anchored exclusion always sits in a rank combination")
    };
    let Item::Not(not) = rank.remove(index) else {
        unreachable!("the anchor always addresses the pending exclusion")
    };
    let mut rest = rank.into_items();
    let positive = if rest.len() == 1 {
        rest.pop().expect("length checked above")
    } else {
        Item::Or(OrItem::from_items(rest))
    };
    (not, positive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::grammar::AnyGrammar;
    use crate::query::lexer::tokenize;

    fn parser<'a>(input: &'a str) -> SimpleParser<'a> {
        SimpleParser::new(TokenStream::new(tokenize(input)), &AnyGrammar)
    }

    fn parse(input: &str) -> Option<Item> {
        parser(input).parse_sequence(true)
    }

    fn rendered(input: &str) -> String {
        parse(input).expect("query should parse").to_string()
    }

    #[test]
    fn test_single_term() {
        assert_eq!(rendered("a"), "a");
    }

    #[test]
    fn test_empty_input_parses_to_nothing() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_two_terms_promote_into_a_composite() {
        assert_eq!(rendered("a b"), "(OR a b)");
    }

    #[test]
    fn test_later_terms_append_in_place() {
        assert_eq!(rendered("a b c d"), "(OR a b c d)");
    }

    #[test]
    fn test_lone_inclusion_unwraps_to_a_protected_leaf() {
        let item = parse("+a").unwrap();
        match &item {
            Item::Word(word) => {
                assert_eq!(word.word, "a");
                assert!(word.protected);
            }
            other => panic!("expected a bare protected term, got {other:?}"),
        }
    }

    #[test]
    fn test_marker_followed_by_space_is_not_an_inclusion() {
        // the dangling marker is skipped, the term parses on its own
        let item = parse("+ a").unwrap();
        assert_eq!(item.to_string(), "a");
        assert!(!item.is_protected());
    }

    #[test]
    fn test_repeated_markers_collapse() {
        let item = parse("++a").unwrap();
        assert_eq!(item.to_string(), "a");
        assert!(item.is_protected());
    }

    #[test]
    fn test_lone_exclusion_parses_to_nothing() {
        let mut p = parser("-a");
        assert_eq!(p.parse_sequence(true), None);
        // full backtracking on failure
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_exclusion_anchored_by_surrounding_term() {
        assert_eq!(rendered("b -a"), "(+b -a)");
    }

    #[test]
    fn test_exclusion_collects_every_negative() {
        assert_eq!(rendered("b -a -c"), "(+b -a -c)");
    }

    #[test]
    fn test_loose_terms_or_together_before_anchoring() {
        assert_eq!(rendered("a b -c"), "(+(OR a b) -c)");
    }

    #[test]
    fn test_term_after_exclusion_ranks() {
        assert_eq!(rendered("b -a c"), "(+(OR b c) -a)");
    }

    #[test]
    fn test_group_with_exclusion() {
        assert_eq!(rendered("-a (b c)"), "(+(OR b c) -a)");
    }

    #[test]
    fn test_inclusion_and_exclusion_share_one_builder() {
        assert_eq!(rendered("+a -b"), "(+a -b)");
    }

    #[test]
    fn test_two_inclusions_fold_conjunctively() {
        let item = parse("+a +b").unwrap();
        assert_eq!(item.to_string(), "(AND a b)");
        let Item::And(and) = &item else {
            panic!("expected a conjunction, got {item:?}")
        };
        assert!(and.items().iter().all(Item::is_protected));
    }

    #[test]
    fn test_inclusion_after_loose_term_ranks() {
        // the explicit structure filters, the loose term only ranks
        assert_eq!(rendered("(x) +a b"), "(RANK x b a)");
    }

    #[test]
    fn test_inclusion_after_group_alone() {
        assert_eq!(rendered("(x) +a"), "(RANK x a)");
    }

    #[test]
    fn test_group_then_terms_append_into_the_group() {
        assert_eq!(rendered("(a b) c"), "(OR a b c)");
    }

    #[test]
    fn test_term_then_group_ranks() {
        assert_eq!(rendered("c (a b)"), "(RANK c (OR a b))");
    }

    #[test]
    fn test_unrecognized_token_skipped_at_top_level() {
        assert_eq!(rendered("a ! b"), "(OR a b)");
    }

    #[test]
    fn test_nested_parse_stops_at_first_unmatched_token() {
        let mut p = parser("a ! b");
        let item = p.parse_sequence(false).unwrap();
        assert_eq!(item.to_string(), "a");
        // the junk token is left for the enclosing production
        p.stream_mut().skip_spaces();
        assert_eq!(p.stream().current().unwrap().text, "!");
    }

    #[test]
    fn test_nested_parse_of_junk_restores_position() {
        let mut p = parser("! a");
        assert_eq!(p.parse_sequence(false), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_broken_group_recovered_at_top_level() {
        assert_eq!(rendered("x (a ! b) y"), "(OR x a b y)");
    }

    #[test]
    fn test_group_of_negatives_only_is_dropped() {
        assert_eq!(parse("(-a)"), None);
    }

    #[test]
    fn test_positive_production_backtracks() {
        let mut p = parser("+ a");
        assert_eq!(p.parse_positive(), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_positive_production_backtracks_at_end_of_input() {
        let mut p = parser("+");
        assert_eq!(p.parse_positive(), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_protected_item_survives_merges() {
        // +a and -c share one exclusion; the loose b rank-combines with it
        let item = parse("+a b -c").unwrap();
        assert_eq!(item.to_string(), "(RANK (+a -c) b)");
        let Item::Rank(rank) = &item else {
            panic!("expected a rank combination, got {item:?}")
        };
        let Some(Item::Not(not)) = rank.base() else {
            panic!("expected the exclusion as the rank base")
        };
        assert!(not.positive().unwrap().is_protected());
        assert!(!rank.get(1).unwrap().is_protected());
    }
}
