//! One-time catalog seeding.
//!
//! Runs once at startup, before any request is served. The whole seed is one
//! transaction, and it does nothing once the catalog has ever held an item, so a
//! restart never duplicates data or brings back items an admin deleted.

use crate::{
    core::{
        inventory::{NewItem, last_issued_item_id, reserve_item_ids},
        store::Store,
        validation::{validate_item_name, validate_price},
    },
    entities::Item,
    errors::Result,
};
use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Inserts `items` with fresh ids if no item id was ever issued.
///
/// Returns the number of items inserted, 0 when seeding was skipped.
///
/// # Errors
/// Returns an error if an item has a blank name or invalid price (nothing is
/// inserted), or if the database fails (the transaction is rolled back).
#[instrument(skip_all, fields(count = items.len()))]
pub async fn seed_catalog(store: &Store, items: &[NewItem]) -> Result<u64> {
    for item in items {
        validate_item_name(&item.name)?;
        validate_price(item.price_per_day)?;
    }

    let _guard = store.lock_inventory().await;
    let txn = store.db().begin().await?;

    let existing = Item::find().count(&txn).await?;
    let issued = last_issued_item_id(&txn).await?;
    if existing > 0 || issued > 0 {
        info!(existing, issued, "Catalog already populated; skipping seed");
        return Ok(0);
    }
    if items.is_empty() {
        return Ok(0);
    }

    let inserted = items.len() as u64;
    let first = reserve_item_ids(&txn, inserted).await?;
    let models = items
        .iter()
        .cloned()
        .zip(first..)
        .map(|(item, id)| item.into_active_model(id));
    Item::insert_many(models).exec(&txn).await?;
    txn.commit().await?;

    info!(inserted, "Catalog seeded");
    Ok(inserted)
}
