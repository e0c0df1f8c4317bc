use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date format: {0}. Use yyyy-MM-dd, MM/dd/yyyy or dd-MM-yyyy.")]
    InvalidDate(String),

    #[error("Invalid amount: {0}. Use a decimal number such as 12.50.")]
    InvalidAmount(String),

    #[error("Month must be between 1 and 12.")]
    InvalidMonth(u32),

    #[error("Invalid expense ID: {0}. Expected a UUID.")]
    InvalidId(String),

    #[error("Total is too large to compute.")]
    AmountOverflow,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
