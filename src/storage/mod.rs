mod error;
mod repository;

pub use error::*;
pub use repository::*;

/// File name used when no data file is configured.
pub const DEFAULT_FILE_NAME: &str = "expenses.json";
