//! Shared test utilities for the rental engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test items and rentals with sensible defaults.

use crate::{
    core::{
        booking::{Customer, RentalRequest, create_rental_as_of},
        inventory::{NewItem, add_item},
        overlap::DateRange,
        policy::RentalPolicy,
        store::Store,
    },
    entities::{Category, item, rental},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// The date every [`book`] call treats as "today".
pub const TEST_TODAY: &str = "2025-01-01";

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
///
/// The pool is pinned to a single connection: each `sqlite::memory:`
/// connection is its own database, so a second one would see empty tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An isolated store with the default policy.
pub async fn setup_test_store() -> Result<Store> {
    setup_test_store_with_policy(RentalPolicy::default()).await
}

/// An isolated store with a custom policy.
pub async fn setup_test_store_with_policy(policy: RentalPolicy) -> Result<Store> {
    Ok(Store::with_policy(setup_test_db().await?, policy))
}

/// Creates a test dress with sensible defaults.
///
/// # Defaults
/// * `category`: dress
/// * `price_per_day`: 30.0
/// * `sizes`: S, M, L
pub async fn create_test_item(store: &Store, name: &str) -> Result<item::Model> {
    let mut new_item = NewItem::new(name, Category::Dress, 30.0);
    new_item.sizes = vec!["S".to_string(), "M".to_string(), "L".to_string()];
    add_item(store, new_item).await
}

/// Sets up a store holding one item.
/// Returns (store, item) for common test scenarios.
pub async fn setup_with_item() -> Result<(Store, item::Model)> {
    let store = setup_test_store().await?;
    let item = create_test_item(&store, "Test Dress").await?;
    Ok((store, item))
}

/// Parses a `YYYY-MM-DD` literal.
///
/// # Panics
/// Panics on a malformed literal.
#[allow(clippy::unwrap_used)]
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

/// Builds an inclusive range from two `YYYY-MM-DD` literals.
///
/// # Panics
/// Panics on a malformed literal or a reversed range.
#[allow(clippy::unwrap_used)]
pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

/// A customer that passes validation.
pub fn test_customer() -> Customer {
    Customer {
        name: "Ana Lima".to_string(),
        email: "ana@example.com".to_string(),
        phone: "5551234567".to_string(),
    }
}

/// A valid request for `item_id` over `start..=end`.
pub fn rental_request(item_id: i64, start: &str, end: &str) -> RentalRequest {
    RentalRequest {
        item_id,
        dates: range(start, end),
        customer: test_customer(),
    }
}

/// Books `item_id` for `start..=end` as of [`TEST_TODAY`].
pub async fn book(store: &Store, item_id: i64, start: &str, end: &str) -> Result<rental::Model> {
    create_rental_as_of(store, rental_request(item_id, start, end), date(TEST_TODAY)).await
}
