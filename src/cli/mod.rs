mod output;

pub use output::*;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{AppError, ExpenseService};
use crate::domain::{format_amount, parse_amount, NewExpense, DEFAULT_CATEGORY};
use crate::storage::Repository;

/// Date formats accepted on the command line, tried in order, each paired
/// with the exact shape its input must have (`9` stands for one digit).
const DATE_FORMATS: [(&str, &str); 3] = [
    ("%Y-%m-%d", "9999-99-99"),
    ("%m/%d/%Y", "99/99/9999"),
    ("%d-%m-%Y", "99-99-9999"),
];

/// Expense Tracker - Manage your expenses easily
#[derive(Parser)]
#[command(name = "expense-tracker")]
#[command(about = "Expense Tracker CLI - Manage your expenses easily")]
#[command(version)]
pub struct Cli {
    /// Expenses file path (defaults to expenses.json next to the executable)
    #[arg(short, long, global = true, env = "EXPENSE_TRACKER_FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new expense
    Add {
        /// Description of the expense
        #[arg(short, long)]
        description: String,

        /// Amount of the expense (e.g., "12.50")
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Category of the expense
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,

        /// Date of the expense (yyyy-MM-dd, MM/dd/yyyy or dd-MM-yyyy, defaults to now)
        #[arg(short = 't', long)]
        date: Option<String>,
    },

    /// List all expenses
    List,

    /// Delete an expense by ID
    Delete {
        /// The ID of the expense to delete
        #[arg(short, long)]
        id: String,
    },

    /// Show expense summary
    Summary {
        /// Filter by month (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Filter by year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

impl Cli {
    /// Path of the data file this invocation works on.
    pub fn data_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(Repository::default_path)
    }

    pub async fn run(self) -> Result<()> {
        let repo = Repository::new(self.data_file());
        let mut service = ExpenseService::init(repo).await;
        let mut output = ConsoleOutput;

        execute(&mut service, self.command, &mut output).await
    }
}

/// Run one command against an initialized service.
/// Input problems and unknown ids are reported through `out`; only
/// persistence failures are returned as errors.
pub async fn execute(
    service: &mut ExpenseService,
    command: Commands,
    out: &mut dyn Output,
) -> Result<()> {
    match command {
        Commands::Add {
            description,
            amount,
            category,
            date,
        } => run_add_command(service, out, description, &amount, category, date.as_deref()).await,

        Commands::List => {
            run_list_command(service, out);
            Ok(())
        }

        Commands::Delete { id } => run_delete_command(service, out, &id).await,

        Commands::Summary { month, year } => {
            run_summary_command(service, out, month, year);
            Ok(())
        }
    }
}

async fn run_add_command(
    service: &mut ExpenseService,
    out: &mut dyn Output,
    description: String,
    amount: &str,
    category: String,
    date: Option<&str>,
) -> Result<()> {
    let new_expense = match new_expense_from_args(description, amount, category, date) {
        Ok(new_expense) => new_expense,
        Err(err) => {
            out.error(&err.to_string());
            return Ok(());
        }
    };

    let expense = service
        .add_expense(new_expense)
        .await
        .context("Failed to save expense")?;

    out.success(&format!(
        "Expense added successfully: {} (${})",
        expense.description,
        format_amount(expense.amount)
    ));
    Ok(())
}

fn new_expense_from_args(
    description: String,
    amount: &str,
    category: String,
    date: Option<&str>,
) -> Result<NewExpense, AppError> {
    let amount = parse_amount(amount).map_err(|_| AppError::InvalidAmount(amount.to_string()))?;
    let mut new_expense = NewExpense::new(description, amount).with_category(category);
    if let Some(date_str) = date {
        new_expense = new_expense.with_date(parse_date(date_str)?);
    }
    Ok(new_expense)
}

fn run_list_command(service: &ExpenseService, out: &mut dyn Output) {
    let expenses = service.get_all_expenses();

    if expenses.is_empty() {
        out.warning("No expenses found.");
        return;
    }

    out.info(&format!("Showing {} expenses:", expenses.len()));
    out.blank();

    let rows: Vec<Vec<String>> = expenses
        .iter()
        .map(|e| {
            vec![
                e.date.format("%Y-%m-%d").to_string(),
                e.description.clone(),
                format!("${}", format_amount(e.amount)),
                e.category.clone(),
                e.id.to_string(),
            ]
        })
        .collect();

    out.table(&["Date", "Description", "Amount", "Category", "ID"], &rows);
}

async fn run_delete_command(
    service: &mut ExpenseService,
    out: &mut dyn Output,
    id: &str,
) -> Result<()> {
    let id = match Uuid::parse_str(id.trim()) {
        Ok(id) => id,
        Err(_) => {
            out.error(&AppError::InvalidId(id.to_string()).to_string());
            return Ok(());
        }
    };

    if service
        .delete_expense(id)
        .await
        .context("Failed to save expenses after delete")?
    {
        out.success(&format!("Expense with ID {} deleted successfully.", id));
    } else {
        out.error(&format!("Expense with ID {} not found.", id));
    }
    Ok(())
}

fn run_summary_command(
    service: &ExpenseService,
    out: &mut dyn Output,
    month: Option<u32>,
    year: Option<i32>,
) {
    if let Some(month) = month {
        if !(1..=12).contains(&month) {
            out.error(&AppError::InvalidMonth(month).to_string());
            return;
        }
    }

    let year = year.unwrap_or_else(|| Local::now().year());

    let result = match month {
        Some(month) => show_month_total(service, out, month, year),
        None => show_category_summary(service, out),
    };
    if let Err(err) = result {
        out.error(&err.to_string());
    }
}

fn show_month_total(
    service: &ExpenseService,
    out: &mut dyn Output,
    month: u32,
    year: i32,
) -> Result<(), AppError> {
    let total = service.get_total_amount_by_month(month, year)?;
    out.info(&format!(
        "Total expenses for {}/{}: ${}",
        month,
        year,
        format_amount(total)
    ));
    Ok(())
}

fn show_category_summary(service: &ExpenseService, out: &mut dyn Output) -> Result<(), AppError> {
    let total = service.get_total_amount()?;
    let summary = service.get_summary_by_category()?;

    out.info(&format!("Total expenses: ${}", format_amount(total)));
    out.blank();

    if !summary.is_empty() {
        out.info("Summary by category:");
        let rows: Vec<Vec<String>> = summary
            .into_iter()
            .map(|(category, amount)| vec![category, format!("${}", format_amount(amount))])
            .collect();
        out.table(&["Category", "Amount"], &rows);
    }
    Ok(())
}

/// Parse a date given on the command line into midnight of that day.
pub fn parse_date(date_str: &str) -> Result<NaiveDateTime, AppError> {
    let input = date_str.trim();
    DATE_FORMATS
        .iter()
        .filter(|(_, shape)| has_shape(input, shape))
        .find_map(|(format, _)| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))
}

// chrono accepts any digit count and a leading sign, so widths are checked first
fn has_shape(input: &str, shape: &str) -> bool {
    input.len() == shape.len()
        && input.chars().zip(shape.chars()).all(|(c, s)| match s {
            '9' => c.is_ascii_digit(),
            _ => c == s,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-15").unwrap(), midnight(2024, 3, 15));
        assert_eq!(parse_date("03/15/2024").unwrap(), midnight(2024, 3, 15));
        assert_eq!(parse_date("15-03-2024").unwrap(), midnight(2024, 3, 15));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(
            parse_date("2024/03/15"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_date_requires_full_width_fields() {
        for input in ["24-03-15", "3/5/24", "+2024-03-15", "10-11-12", "2024-3-15", "3/15/2024"] {
            assert!(
                matches!(parse_date(input), Err(AppError::InvalidDate(_))),
                "accepted {}",
                input
            );
        }
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "add",
            "-d",
            "Lunch",
            "-a",
            "12.50",
            "-t",
            "2024-03-15",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                description,
                amount,
                category,
                date,
            } => {
                assert_eq!(description, "Lunch");
                assert_eq!(amount, "12.50");
                assert_eq!(category, DEFAULT_CATEGORY);
                assert_eq!(date.as_deref(), Some("2024-03-15"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_negative_amount() {
        let cli = Cli::try_parse_from(["expense-tracker", "add", "-d", "Refund", "-a", "-5"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Add { ref amount, .. } if amount == "-5"));
    }

    #[test]
    fn test_cli_parses_summary_and_global_file() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "summary",
            "--month",
            "3",
            "-y",
            "2024",
            "--file",
            "/tmp/custom.json",
        ])
        .unwrap();

        assert_eq!(cli.data_file(), PathBuf::from("/tmp/custom.json"));
        assert!(matches!(
            cli.command,
            Commands::Summary {
                month: Some(3),
                year: Some(2024)
            }
        ));
    }

    #[test]
    fn test_cli_requires_delete_id() {
        assert!(Cli::try_parse_from(["expense-tracker", "delete"]).is_err());
    }
}
