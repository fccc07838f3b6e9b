//! Shared test utilities for `FairShare`.
//!
//! This module provides common helpers for building test bills and setting up
//! an in-memory history database.

use crate::{
    core::bill::{BillState, Item, Person},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all history tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a bill with one person per id, paid by the first.
///
/// Display names are the ids upper-cased (`"p1"` becomes `"P1"`).
///
/// # Panics
/// Panics if `ids` is empty or contains duplicates.
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub fn bill_with_people(ids: &[&str]) -> BillState {
    let (first, rest) = ids.split_first().expect("at least one person");
    let mut bill = BillState::new(Person::new(*first, first.to_uppercase()));
    for id in rest {
        bill.add_person(Person::new(*id, id.to_uppercase())).unwrap();
    }
    bill
}

/// A realistic four-person dinner with shared and individual items.
///
/// # Defaults
/// * people: Alice (payer), Bob, Cara, Dev
/// * items: 24.99 shared by all, 18.50 Alice+Bob, 32.98 Cara, 15.00 Bob+Cara+Dev
/// * tax: 8.00
#[allow(clippy::unwrap_used)]
pub fn dinner_bill() -> BillState {
    let mut bill = BillState::new(Person::new("alice", "Alice"));
    bill.add_person(Person::new("bob", "Bob")).unwrap();
    bill.add_person(Person::new("cara", "Cara")).unwrap();
    bill.add_person(Person::new("dev", "Dev")).unwrap();
    bill.add_item(Item::new(
        "appetizers",
        "Appetizer Platter",
        24.99,
        &["alice", "bob", "cara", "dev"],
    ))
    .unwrap();
    bill.add_item(Item::new("wine", "Bottle of Wine", 18.50, &["alice", "bob"]))
        .unwrap();
    bill.add_item(Item::new("ribeye", "Ribeye", 32.98, &["cara"]))
        .unwrap();
    bill.add_item(Item::new(
        "dessert",
        "Dessert Sampler",
        15.00,
        &["bob", "cara", "dev"],
    ))
    .unwrap();
    bill.set_overall_tax(8.00).unwrap();
    bill
}
