//! Query parsing: from free text to an evaluable item tree
//!
//! The pipeline is lexer → token stream → recursive-descent parse:
//!
//! ```text
//! sequence := (positive | negative | group | leaf)*
//! positive := '+'+ (leaf | group)
//! negative := '+'* '-'+ (leaf | group)
//! group    := '(' sequence ')'
//! leaf     := term | field ':' term | [field ':'] phrase
//! ```
//!
//! The parser never rejects input: at top level anything it cannot
//! recognize is skipped token by token, and a query that reduces to nothing
//! (empty input, or exclusions with nothing to anchor them) parses to
//! `None` rather than an error.
//!
//! # Example
//!
//! ```
//! use squall::{parse_query, ParserSettings};
//!
//! let settings = ParserSettings::default();
//! let item = parse_query("jaguar -car \"big cat\"", &settings)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(item.to_string(), "(+(OR jaguar \"big cat\") -car)");
//! ```

pub mod grammar;
pub mod item;
pub mod lexer;
pub mod simple;
pub mod stream;

mod structured;

pub use grammar::{AllGrammar, AnyGrammar, Grammar, QueryType};
pub use item::{AndItem, Item, NotItem, OrItem, PhraseItem, RankItem, WordItem};
pub use lexer::{tokenize, Token, TokenKind};
pub use simple::SimpleParser;
pub use stream::TokenStream;

use tracing::debug;

use crate::config::ParserSettings;
use crate::error::{Result, SquallError};

/// Parse a free-text query into an evaluable item tree
///
/// The query language variant and input limits come from `settings`.
/// `Ok(None)` means the input reduced to nothing: an empty query, not a
/// failure. The only error is an input exceeding the configured length
/// limit, checked before any parsing work.
pub fn parse_query(input: &str, settings: &ParserSettings) -> Result<Option<Item>> {
    if input.len() > settings.max_query_length {
        return Err(SquallError::QueryTooLong {
            length: input.len(),
            limit: settings.max_query_length,
        });
    }

    let tokens = lexer::tokenize(input);
    let grammar = settings.query_type.grammar();
    let mut parser = SimpleParser::new(TokenStream::new(tokens), grammar);
    let root = grammar.parse_top(&mut parser);
    debug!(
        query_type = ?settings.query_type,
        root = root.as_ref().map(Item::kind),
        "parsed query"
    );
    Ok(root)
}
