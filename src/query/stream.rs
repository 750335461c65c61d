//! Backtrackable token stream
//!
//! The parser's only view of the lexed query. Every production snapshots the
//! integer position before it starts and restores it when it fails, so a
//! failed production leaves no trace.

use super::lexer::{Token, TokenKind};

/// Position-addressable sequence of classified tokens
#[derive(Clone, Debug)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    /// Wrap a lexed token sequence, positioned at the start
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Snapshot of the current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Restore a previously taken snapshot
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Whether any tokens remain
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// The current token, whitespace included
    pub fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.position)
    }

    /// Whether the current token has the given kind, without skipping
    /// whitespace first
    pub fn current_is_raw(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == kind)
    }

    /// Skip whitespace, then test the current token's kind
    pub fn current_is(&mut self, kind: TokenKind) -> bool {
        self.skip_spaces();
        self.current_is_raw(kind)
    }

    /// Advance past the current token; no-op at the end
    pub fn skip(&mut self) {
        if self.has_next() {
            self.position += 1;
        }
    }

    /// Advance past any whitespace tokens
    pub fn skip_spaces(&mut self) {
        while self.current_is_raw(TokenKind::Space) {
            self.skip();
        }
    }

    /// Skip leading whitespace, then consume a contiguous run of `kind`
    ///
    /// Returns whether at least one token of `kind` was consumed. The
    /// position moves even when it returns false; callers backtrack through
    /// their own snapshot.
    pub fn skip_all(&mut self, kind: TokenKind) -> bool {
        self.skip_spaces();
        let mut skipped = false;
        while self.current_is_raw(kind) {
            self.skip();
            skipped = true;
        }
        skipped
    }
}
