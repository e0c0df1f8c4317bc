mod common;

use anyhow::Result;
use common::{add, test_service};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_totals_on_empty_collection() -> Result<()> {
    let (service, _temp) = test_service().await?;

    assert_eq!(service.get_total_amount()?, Decimal::ZERO);
    assert!(service.get_summary_by_category()?.is_empty());
    assert_eq!(service.get_total_amount_by_month(3, 2024)?, Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_total_amount() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    add(&mut service, "A", dec!(10.00), "General", "2024-01-01").await?;
    add(&mut service, "B", dec!(5.50), "General", "2024-01-02").await?;

    assert_eq!(service.get_total_amount()?, dec!(15.50));
    Ok(())
}

#[tokio::test]
async fn test_summary_by_category() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    add(&mut service, "Groceries", dec!(10), "Food", "2024-01-05").await?;
    add(&mut service, "Dinner", dec!(5), "Food", "2024-02-10").await?;
    add(&mut service, "Train", dec!(20), "Travel", "2023-07-01").await?;

    let summary = service.get_summary_by_category()?;

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.get("Food"), Some(&dec!(15)));
    assert_eq!(summary.get("Travel"), Some(&dec!(20)));
    assert_eq!(summary.get("General"), None);
    Ok(())
}

#[tokio::test]
async fn test_summary_reflects_deletes() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let only_travel = add(&mut service, "Train", dec!(20), "Travel", "2024-01-01").await?;
    add(&mut service, "Snack", dec!(2.40), "Food", "2024-01-01").await?;

    service.delete_expense(only_travel.id).await?;

    let summary = service.get_summary_by_category()?;
    assert_eq!(summary.len(), 1);
    assert_eq!(summary.get("Food"), Some(&dec!(2.40)));
    Ok(())
}

#[tokio::test]
async fn test_total_by_month_matches_month_and_year() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    add(&mut service, "Start", dec!(1.10), "A", "2024-03-01").await?;
    add(&mut service, "End", dec!(2.20), "B", "2024-03-31").await?;
    add(&mut service, "Other year", dec!(50), "A", "2023-03-15").await?;
    add(&mut service, "Next month", dec!(60), "A", "2024-04-01").await?;
    add(&mut service, "Prev month", dec!(70), "A", "2024-02-29").await?;

    assert_eq!(service.get_total_amount_by_month(3, 2024)?, dec!(3.30));
    assert_eq!(service.get_total_amount_by_month(3, 2023)?, dec!(50));
    assert_eq!(service.get_total_amount_by_month(12, 2024)?, Decimal::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_negative_amounts_reduce_totals() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    add(&mut service, "Shoes", dec!(80), "Clothing", "2024-06-01").await?;
    add(&mut service, "Shoes refund", dec!(-80), "Clothing", "2024-06-03").await?;
    add(&mut service, "Socks", dec!(4.99), "Clothing", "2024-06-03").await?;

    assert_eq!(service.get_total_amount()?, dec!(4.99));
    assert_eq!(service.get_summary_by_category()?["Clothing"], dec!(4.99));
    assert_eq!(service.get_total_amount_by_month(6, 2024)?, dec!(4.99));
    Ok(())
}
