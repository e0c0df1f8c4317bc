use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{format_amount, Amount};

pub type ExpenseId = Uuid;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single recorded expense. Expenses are never edited: they are created
/// and, eventually, deleted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(alias = "Id")]
    pub id: ExpenseId,
    #[serde(alias = "Description")]
    pub description: String,
    /// Written as a JSON number carrying its exact decimal digits
    #[serde(alias = "Amount", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Amount,
    #[serde(alias = "Category")]
    pub category: String,
    /// Local wall-clock time of the expense; queries only look at the date part
    #[serde(alias = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDateTime,
}

impl Expense {
    /// The calendar date of the expense.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - ${} ({}) - ID: {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            format_amount(self.amount),
            self.category,
            self.id
        )
    }
}

/// Options for creating an expense. Category and date are defaulted
/// independently when left unset.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Amount,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, amount: Amount) -> Self {
        Self {
            description: description.into(),
            amount,
            category: None,
            date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Build the expense with a fresh id, using the current local time
    /// when no date was given.
    pub fn build(self) -> Expense {
        self.build_at(Local::now().naive_local())
    }

    /// Build the expense, using `now` when no date was given.
    pub fn build_at(self, now: NaiveDateTime) -> Expense {
        let category = match self.category {
            Some(category) if !category.trim().is_empty() => category,
            _ => DEFAULT_CATEGORY.to_string(),
        };

        Expense {
            id: Uuid::new_v4(),
            description: self.description,
            amount: self.amount,
            category,
            date: self.date.unwrap_or(now),
        }
    }
}

/// Parse a stored date. Accepts a naive date-time (`2024-03-15T10:30:00`),
/// a date-time with an offset (the wall-clock part is kept) or a bare date.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_stored_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid expense date: {}", raw)))
}
