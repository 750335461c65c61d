use thiserror::Error;

/// Main error type for Squall operations
///
/// Parsing itself never fails: unrecognized input is skipped and an empty
/// result is `None`, so errors only arise from boundary guards.
#[derive(Error, Debug)]
pub enum SquallError {
    #[error("Query too long: {length} bytes exceeds the {limit} byte limit")]
    QueryTooLong { length: usize, limit: usize },
}

/// Result type alias for Squall operations
pub type Result<T> = std::result::Result<T, SquallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SquallError::QueryTooLong {
            length: 5000,
            limit: 4096,
        };
        assert_eq!(
            err.to_string(),
            "Query too long: 5000 bytes exceeds the 4096 byte limit"
        );
    }
}
