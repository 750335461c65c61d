//! Single-term leaf item

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single indexable term, optionally restricted to one field
///
/// Words cannot own children; combining a word with further content always
/// promotes it into a composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    /// The term text as typed (no stemming or normalization at this layer)
    pub word: String,
    /// Field the term is restricted to, if the query qualified it
    pub field: Option<String>,
    /// Explicitly required by the user, exempt from later collapsing
    pub protected: bool,
}

impl WordItem {
    /// Create an unqualified term
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            field: None,
            protected: false,
        }
    }

    /// Create a field-qualified term
    pub fn scoped(field: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            field: Some(field.into()),
            protected: false,
        }
    }
}

impl fmt::Display for WordItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}:{}", self.word),
            None => write!(f, "{}", self.word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain() {
        assert_eq!(WordItem::new("rust").to_string(), "rust");
    }

    #[test]
    fn test_display_scoped() {
        assert_eq!(WordItem::scoped("title", "rust").to_string(), "title:rust");
    }
}
