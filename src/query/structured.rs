//! Base grammar productions shared by every query-language variant
//!
//! A leaf is one indexable unit: a bare term, a field-qualified term
//! (`title:rust`), or a quoted phrase with an optional field qualifier. A
//! group is a parenthesized sub-expression parsed by a nested, strict
//! sequence parse. Both productions restore the stream position completely
//! when they fail.

use super::item::{Item, PhraseItem, WordItem};
use super::lexer::TokenKind;
use super::simple::SimpleParser;

impl<'a> SimpleParser<'a> {
    /// One indexable unit: term, `field:term`, or `[field:]"phrase"`
    pub fn parse_leaf(&mut self) -> Option<Item> {
        self.attempt(|p| {
            p.tokens.skip_spaces();
            let token = p.tokens.current().copied()?;
            match token.kind {
                TokenKind::Quote => p.quoted_phrase(None),
                TokenKind::Word | TokenKind::Number => {
                    let text = token.text;
                    p.tokens.skip();
                    if p.tokens.current_is_raw(TokenKind::Colon) {
                        let before_colon = p.tokens.position();
                        p.tokens.skip();
                        match p.tokens.current().copied() {
                            Some(value)
                                if matches!(value.kind, TokenKind::Word | TokenKind::Number) =>
                            {
                                p.tokens.skip();
                                return Some(Item::Word(WordItem::scoped(text, value.text)));
                            }
                            Some(value) if value.kind == TokenKind::Quote => {
                                return p.quoted_phrase(Some(text));
                            }
                            // dangling qualifier: keep the bare term, leave
                            // the colon for the caller
                            _ => p.tokens.set_position(before_colon),
                        }
                    }
                    Some(Item::Word(WordItem::new(text)))
                }
                _ => None,
            }
        })
    }

    /// A parenthesized sub-expression
    ///
    /// The body is parsed in strict (nested) mode and the closing
    /// parenthesis is required; anything else fails the whole group so the
    /// top level can recover token by token.
    pub fn parse_group(&mut self) -> Option<Item> {
        self.attempt(|p| {
            if !p.tokens.current_is(TokenKind::LeftParen) {
                return None;
            }
            p.tokens.skip();
            let inner = p.parse_sequence(false)?;
            if !p.tokens.current_is(TokenKind::RightParen) {
                return None;
            }
            p.tokens.skip();
            Some(inner)
        })
    }

    /// Phrase body starting at the opening quote
    ///
    /// Collects the indexable words up to the closing quote, dropping
    /// interior punctuation. A one-word phrase collapses to a plain term;
    /// an empty or unterminated phrase fails.
    fn quoted_phrase(&mut self, field: Option<&str>) -> Option<Item> {
        self.tokens.skip();
        let mut words: Vec<String> = Vec::new();
        loop {
            let token = self.tokens.current().copied()?;
            match token.kind {
                TokenKind::Quote => {
                    self.tokens.skip();
                    break;
                }
                TokenKind::Word | TokenKind::Number => {
                    words.push(token.text.to_string());
                    self.tokens.skip();
                }
                _ => self.tokens.skip(),
            }
        }

        if words.is_empty() {
            return None;
        }
        if words.len() == 1 {
            let word = words.remove(0);
            let item = match field {
                Some(field) => WordItem::scoped(field, word),
                None => WordItem::new(word),
            };
            return Some(Item::Word(item));
        }
        let phrase = match field {
            Some(field) => PhraseItem::scoped(field, words),
            None => PhraseItem::new(words),
        };
        Some(Item::Phrase(phrase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::grammar::AnyGrammar;
    use crate::query::lexer::tokenize;
    use crate::query::stream::TokenStream;

    fn parser<'a>(input: &'a str) -> SimpleParser<'a> {
        SimpleParser::new(TokenStream::new(tokenize(input)), &AnyGrammar)
    }

    fn parse(input: &str) -> Option<Item> {
        parser(input).parse_sequence(true)
    }

    #[test]
    fn test_plain_term() {
        let item = parser("rust").parse_leaf().unwrap();
        assert_eq!(item, Item::Word(WordItem::new("rust")));
    }

    #[test]
    fn test_number_term() {
        let item = parser("2024").parse_leaf().unwrap();
        assert_eq!(item, Item::Word(WordItem::new("2024")));
    }

    #[test]
    fn test_field_qualified_term() {
        let item = parser("title:rust").parse_leaf().unwrap();
        assert_eq!(item, Item::Word(WordItem::scoped("title", "rust")));
    }

    #[test]
    fn test_dangling_qualifier_degrades_to_terms() {
        assert_eq!(parse("title: rust").unwrap().to_string(), "(OR title rust)");
    }

    #[test]
    fn test_phrase() {
        let item = parser("\"big cat\"").parse_leaf().unwrap();
        assert_eq!(item.to_string(), "\"big cat\"");
    }

    #[test]
    fn test_field_qualified_phrase() {
        let item = parser("title:\"big cat\"").parse_leaf().unwrap();
        assert_eq!(item.to_string(), "title:\"big cat\"");
    }

    #[test]
    fn test_one_word_phrase_collapses_to_a_term() {
        let item = parser("\"cat\"").parse_leaf().unwrap();
        assert_eq!(item, Item::Word(WordItem::new("cat")));
    }

    #[test]
    fn test_punctuation_inside_phrase_is_dropped() {
        let item = parser("\"a, b\"").parse_leaf().unwrap();
        assert_eq!(item.to_string(), "\"a b\"");
    }

    #[test]
    fn test_empty_phrase_fails_and_backtracks() {
        let mut p = parser("\"\"");
        assert_eq!(p.parse_leaf(), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_unterminated_phrase_degrades_to_terms() {
        assert_eq!(parse("\"a b").unwrap().to_string(), "(OR a b)");
    }

    #[test]
    fn test_group() {
        let mut p = parser("(a b)");
        let item = p.parse_group().unwrap();
        assert_eq!(item.to_string(), "(OR a b)");
        assert!(!p.stream().has_next());
    }

    #[test]
    fn test_unclosed_group_backtracks() {
        let mut p = parser("(a b");
        assert_eq!(p.parse_group(), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_empty_group_fails() {
        let mut p = parser("()");
        assert_eq!(p.parse_group(), None);
        assert_eq!(p.stream().position(), 0);
    }

    #[test]
    fn test_nested_groups_collapse() {
        assert_eq!(parse("((a))").unwrap().to_string(), "a");
    }
}
