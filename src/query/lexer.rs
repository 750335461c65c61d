//! Lexer for the simple query syntax
//!
//! Splits a raw query string into classified tokens. Unlike a strict
//! expression lexer this one can never fail: whitespace runs and
//! unrecognized punctuation come out as ordinary tokens, because the parser
//! needs to see whitespace (a `+` glued to a term means something different
//! from a free-standing `+`) and recovers from junk by skipping tokens one
//! at a time.

use serde::{Deserialize, Serialize};

/// Token classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// A term: letters, digits and a few joining characters
    Word,
    /// A run of ASCII digits
    Number,
    /// A run of whitespace
    Space,
    /// `+`: explicit inclusion marker
    Plus,
    /// `-`: explicit exclusion marker
    Minus,
    /// `"`: phrase delimiter
    Quote,
    /// `(`: group start
    LeftParen,
    /// `)`: group end
    RightParen,
    /// `:`: field qualifier separator
    Colon,
    /// Any other single character
    Other,
}

/// A classified slice of the input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Tokenize a query string
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            position: 0,
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        while let Some(ch) = self.current() {
            let token = match ch {
                '+' => self.single(TokenKind::Plus),
                '-' => self.single(TokenKind::Minus),
                '"' => self.single(TokenKind::Quote),
                '(' => self.single(TokenKind::LeftParen),
                ')' => self.single(TokenKind::RightParen),
                ':' => self.single(TokenKind::Colon),
                _ if ch.is_whitespace() => self.whitespace(),
                _ if Self::is_term_start(ch) => self.term(),
                _ => self.single(TokenKind::Other),
            };
            tokens.push(token);
        }
        tokens
    }

    fn single(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.byte_offset();
        self.advance();
        Token::new(kind, self.slice_from(start))
    }

    fn whitespace(&mut self) -> Token<'a> {
        let start = self.byte_offset();
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
        Token::new(TokenKind::Space, self.slice_from(start))
    }

    fn term(&mut self) -> Token<'a> {
        let start = self.byte_offset();
        let mut all_digits = true;
        while let Some(ch) = self.current() {
            if Self::is_term_char(ch) {
                all_digits &= ch.is_ascii_digit();
                self.advance();
            } else if (ch == '-' || ch == '.')
                && self.peek().is_some_and(Self::is_term_char)
            {
                // joined forms like "full-text" or "1.2.3" stay one term
                all_digits = false;
                self.advance();
            } else {
                break;
            }
        }
        let kind = if all_digits {
            TokenKind::Number
        } else {
            TokenKind::Word
        };
        Token::new(kind, self.slice_from(start))
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).map(|&(_, ch)| ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).map(|&(_, ch)| ch)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn byte_offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map_or(self.input.len(), |&(offset, _)| offset)
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.byte_offset()]
    }

    fn is_term_start(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }

    fn is_term_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }
}
