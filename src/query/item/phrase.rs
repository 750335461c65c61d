//! Quoted-phrase leaf item

use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact sequence of terms that must occur adjacently, in order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseItem {
    /// The phrase terms, in query order
    pub words: Vec<String>,
    /// Field the phrase is restricted to, if the query qualified it
    pub field: Option<String>,
    /// Explicitly required by the user, exempt from later collapsing
    pub protected: bool,
}

impl PhraseItem {
    /// Create an unqualified phrase
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            field: None,
            protected: false,
        }
    }

    /// Create a field-qualified phrase
    pub fn scoped(field: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            words,
            field: Some(field.into()),
            protected: false,
        }
    }

    /// Number of terms in the phrase
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the phrase has no terms
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for PhraseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{field}:")?;
        }
        write!(f, "\"{}\"", self.words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let phrase = PhraseItem::new(vec!["big".into(), "cat".into()]);
        assert_eq!(phrase.to_string(), "\"big cat\"");
    }

    #[test]
    fn test_display_scoped() {
        let phrase = PhraseItem::scoped("title", vec!["big".into(), "cat".into()]);
        assert_eq!(phrase.to_string(), "title:\"big cat\"");
    }
}
