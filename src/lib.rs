pub mod config;
pub mod error;
pub mod query;

pub use config::ParserSettings;
pub use error::{Result, SquallError};
pub use query::{parse_query, Item, QueryType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
