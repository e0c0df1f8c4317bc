use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Amount, Expense, ExpenseId, NewExpense};
use crate::storage::Repository;

use super::AppError;

/// Application service owning the expense collection for one session.
/// Every mutation rewrites the backing file through the repository.
pub struct ExpenseService {
    repo: Repository,
    expenses: Vec<Expense>,
}

impl ExpenseService {
    /// Create a service over an already loaded collection.
    pub fn new(repo: Repository, expenses: Vec<Expense>) -> Self {
        Self { repo, expenses }
    }

    /// Load the collection from the repository. Must complete before any
    /// other operation runs.
    pub async fn init(repo: Repository) -> Self {
        let expenses = repo.load().await;
        Self::new(repo, expenses)
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense and persist the collection.
    pub async fn add_expense(&mut self, new_expense: NewExpense) -> Result<Expense, AppError> {
        let expense = new_expense.build();
        self.expenses.push(expense.clone());
        self.repo.save(&self.expenses).await?;

        debug!(id = %expense.id, category = %expense.category, "Added expense");
        Ok(expense)
    }

    /// Delete an expense by id. Returns false, without writing, when no
    /// expense has that id.
    pub async fn delete_expense(&mut self, id: ExpenseId) -> Result<bool, AppError> {
        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            debug!(%id, "No expense to delete");
            return Ok(false);
        };

        self.expenses.remove(index);
        self.repo.save(&self.expenses).await?;

        debug!(%id, "Deleted expense");
        Ok(true)
    }

    // ========================
    // Queries
    // ========================

    /// All expenses, most recent first. Expenses on the same date keep
    /// insertion order.
    pub fn get_all_expenses(&self) -> Vec<Expense> {
        let mut expenses = self.expenses.clone();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    /// Sum of all amounts.
    pub fn get_total_amount(&self) -> Result<Amount, AppError> {
        checked_sum(self.expenses.iter().map(|e| e.amount))
    }

    /// Total per category, for categories that have at least one expense.
    pub fn get_summary_by_category(&self) -> Result<BTreeMap<String, Amount>, AppError> {
        let mut summary = BTreeMap::new();
        for expense in &self.expenses {
            let total = summary
                .entry(expense.category.clone())
                .or_insert(Decimal::ZERO);
            *total = total
                .checked_add(expense.amount)
                .ok_or(AppError::AmountOverflow)?;
        }
        Ok(summary)
    }

    /// Sum of amounts for expenses dated in the given month of the given year.
    /// `month` is not validated; an out-of-range month simply matches nothing.
    pub fn get_total_amount_by_month(&self, month: u32, year: i32) -> Result<Amount, AppError> {
        checked_sum(
            self.expenses
                .iter()
                .filter(|e| e.date.month() == month && e.date.year() == year)
                .map(|e| e.amount),
        )
    }
}

fn checked_sum(mut amounts: impl Iterator<Item = Amount>) -> Result<Amount, AppError> {
    amounts.try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or(AppError::AmountOverflow)
    })
}
