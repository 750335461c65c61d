use serde::{Deserialize, Serialize};

use crate::query::QueryType;

/// Parser configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParserSettings {
    /// Query language variant applied to the input
    pub query_type: QueryType,
    /// Longest accepted query, in bytes
    pub max_query_length: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            query_type: QueryType::default(),
            max_query_length: 4096,
        }
    }
}

impl ParserSettings {
    /// Settings for the given query type with default limits
    pub fn for_query_type(query_type: QueryType) -> Self {
        Self {
            query_type,
            ..Self::default()
        }
    }
}
