// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use expense_tracker::application::ExpenseService;
use expense_tracker::domain::{Amount, Expense, NewExpense};
use expense_tracker::storage::Repository;
use tempfile::TempDir;

/// Path of the data file inside a test directory
pub fn data_file(temp: &TempDir) -> PathBuf {
    temp.path().join("expenses.json")
}

/// Helper to create a test service over an empty temporary data file
pub async fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = ExpenseService::init(Repository::new(data_file(&temp_dir))).await;
    Ok((service, temp_dir))
}

/// Start a fresh service over the same data file, as a new invocation would
pub async fn reopen(temp: &TempDir) -> ExpenseService {
    ExpenseService::init(Repository::new(data_file(temp))).await
}

/// Helper to parse a date string into midnight of that day
pub fn parse_date(date_str: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Record an expense with every field given explicitly
pub async fn add(
    service: &mut ExpenseService,
    description: &str,
    amount: Amount,
    category: &str,
    date: &str,
) -> Result<Expense> {
    Ok(service
        .add_expense(
            NewExpense::new(description, amount)
                .with_category(category)
                .with_date(parse_date(date)),
        )
        .await?)
}
