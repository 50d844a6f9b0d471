//! Inventory business logic - Adds, updates and deletes catalog items.
//!
//! These functions enforce only storage invariants (non-blank name, finite
//! non-negative price). Admin form rules such as the description length live in
//! [`crate::core::validation::validate_new_item`] and are the caller's job.

use crate::{
    core::{
        policy::{DEFAULT_COLOR, DeleteGuard, PLACEHOLDER_IMAGE},
        store::Store,
        validation::{validate_item_name, validate_price},
    },
    entities::{
        Category, ITEM_SEQUENCE, IdSequence, Item, Rental, RentalStatus, id_sequence, item, rental,
    },
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Data for a new item. Optional fields get the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Display name
    pub name: String,
    /// Catalog category
    pub category: Category,
    /// Price per rental day
    pub price_per_day: f64,
    /// Size labels, empty by default
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Defaults to `"unknown"`
    pub color: Option<String>,
    /// Optional style tag
    pub style: Option<String>,
    /// Defaults to an empty string
    pub description: Option<String>,
    /// Defaults to a single placeholder image
    #[serde(default)]
    pub images: Vec<String>,
    /// Defaults to the item name
    pub alt: Option<String>,
}

impl NewItem {
    /// A new item with only the required fields set.
    pub fn new(name: impl Into<String>, category: Category, price_per_day: f64) -> Self {
        Self {
            name: name.into(),
            category,
            price_per_day,
            sizes: Vec::new(),
            color: None,
            style: None,
            description: None,
            images: Vec::new(),
            alt: None,
        }
    }

    pub(crate) fn into_active_model(self, id: i64) -> item::ActiveModel {
        let name = self.name.trim().to_string();
        let images = if self.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            self.images
        };
        item::ActiveModel {
            id: Set(id),
            alt: Set(self.alt.unwrap_or_else(|| name.clone())),
            name: Set(name),
            category: Set(self.category),
            price_per_day: Set(self.price_per_day),
            sizes: Set(self.sizes.into()),
            color: Set(self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string())),
            style: Set(self.style),
            description: Set(self.description.unwrap_or_default()),
            images: Set(images.into()),
        }
    }
}

/// Field mask for [`update_item`]. `None` leaves a field unchanged.
///
/// The id is not part of the mask, so it can never be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    /// New name
    pub name: Option<String>,
    /// New category
    pub category: Option<Category>,
    /// New daily price
    pub price_per_day: Option<f64>,
    /// Replacement size list
    pub sizes: Option<Vec<String>>,
    /// New color
    pub color: Option<String>,
    /// `Some(None)` clears the style
    pub style: Option<Option<String>>,
    /// New description
    pub description: Option<String>,
    /// Replacement image list
    pub images: Option<Vec<String>>,
    /// New accessibility text
    pub alt: Option<String>,
}

impl ItemUpdate {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the daily price.
    #[must_use]
    pub fn price_per_day(mut self, price: f64) -> Self {
        self.price_per_day = Some(price);
        self
    }

    /// Replaces the size list.
    #[must_use]
    pub fn sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets or clears the style.
    #[must_use]
    pub fn style(mut self, style: Option<String>) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the image list.
    #[must_use]
    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Sets the accessibility text.
    #[must_use]
    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, model: &mut item::ActiveModel) {
        if let Some(name) = self.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(category) = self.category {
            model.category = Set(category);
        }
        if let Some(price) = self.price_per_day {
            model.price_per_day = Set(price);
        }
        if let Some(sizes) = self.sizes {
            model.sizes = Set(sizes.into());
        }
        if let Some(color) = self.color {
            model.color = Set(color);
        }
        if let Some(style) = self.style {
            model.style = Set(style);
        }
        if let Some(description) = self.description {
            model.description = Set(description);
        }
        if let Some(images) = self.images {
            model.images = Set(images.into());
        }
        if let Some(alt) = self.alt {
            model.alt = Set(alt);
        }
    }
}

/// Reserves `count` consecutive item ids and returns the first one.
///
/// The first id is one past the highest id ever handed out, taking the larger
/// of the stored high-water mark, the current items and the ids rentals still
/// point at. The mark is written back on `db`, so it must be the caller's
/// transaction, held under the inventory lock.
pub(crate) async fn reserve_item_ids<C>(db: &C, count: u64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let sequence = IdSequence::find_by_id(ITEM_SEQUENCE.to_string()).one(db).await?;
    let highest_item = Item::find()
        .order_by_desc(item::Column::Id)
        .one(db)
        .await?
        .map_or(0, |item| item.id);
    let highest_rented = Rental::find()
        .order_by_desc(rental::Column::ItemId)
        .one(db)
        .await?
        .map_or(0, |rental| rental.item_id);

    let issued = sequence.as_ref().map_or(0, |row| row.last_issued);
    let first = issued.max(highest_item).max(highest_rented) + 1;
    let count = i64::try_from(count)
        .map_err(|_| Error::validation("count", "too many ids requested"))?;
    let last_issued = first + count - 1;

    match sequence {
        Some(row) => {
            let mut row: id_sequence::ActiveModel = row.into();
            row.last_issued = Set(last_issued);
            row.update(db).await?;
        }
        None => {
            id_sequence::ActiveModel {
                name: Set(ITEM_SEQUENCE.to_string()),
                last_issued: Set(last_issued),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(first)
}

/// Highest item id handed out so far, 0 if none ever was.
pub(crate) async fn last_issued_item_id<C>(db: &C) -> Result<i64>
where
    C: ConnectionTrait,
{
    Ok(IdSequence::find_by_id(ITEM_SEQUENCE.to_string())
        .one(db)
        .await?
        .map_or(0, |row| row.last_issued))
}

/// Adds an item to the catalog and returns it with its new id.
///
/// # Errors
/// Returns an error if the name is blank, the price is negative or not finite,
/// or the database insert fails.
#[instrument(skip(store, new_item), fields(name = %new_item.name))]
pub async fn add_item(store: &Store, new_item: NewItem) -> Result<item::Model> {
    validate_item_name(&new_item.name)?;
    validate_price(new_item.price_per_day)?;

    let _guard = store.lock_inventory().await;
    let txn = store.db().begin().await?;

    let id = reserve_item_ids(&txn, 1).await?;
    let created = new_item.into_active_model(id).insert(&txn).await?;
    txn.commit().await?;

    info!(item_id = created.id, "Item added");
    Ok(created)
}

/// Merges `update` onto an existing item.
///
/// Returns `Ok(None)` if the item does not exist. The item lock is held across
/// the read and the write, so a concurrent delete lands wholly before or after.
///
/// # Errors
/// Returns an error if a provided name is blank, a provided price is negative
/// or not finite, or the database update fails.
#[instrument(skip(store, update))]
pub async fn update_item(
    store: &Store,
    item_id: i64,
    update: ItemUpdate,
) -> Result<Option<item::Model>> {
    if let Some(name) = &update.name {
        validate_item_name(name)?;
    }
    if let Some(price) = update.price_per_day {
        validate_price(price)?;
    }

    let _guard = store.lock_item(item_id).await;
    let Some(existing) = Item::find_by_id(item_id).one(store.db()).await? else {
        debug!("Item not found");
        return Ok(None);
    };
    if update.is_empty() {
        return Ok(Some(existing));
    }

    let mut model: item::ActiveModel = existing.into();
    update.apply(&mut model);
    let updated = model.update(store.db()).await?;

    info!("Item updated");
    Ok(Some(updated))
}

/// Deletes an item that no rental blocks.
///
/// Which rentals block deletion is set by the store's [`DeleteGuard`]. The
/// item lock is held so no booking can land between the count and the delete.
///
/// # Errors
/// Returns `HasRentals` when blocked, or a database error.
#[instrument(skip(store))]
pub async fn delete_item(store: &Store, item_id: i64) -> Result<bool> {
    let _guard = store.lock_item(item_id).await;
    let txn = store.db().begin().await?;

    let mut blocking = Rental::find().filter(rental::Column::ItemId.eq(item_id));
    if store.policy().delete_guard == DeleteGuard::ActiveOnly {
        blocking = blocking.filter(rental::Column::Status.eq(RentalStatus::Active));
    }
    let count = blocking.count(&txn).await?;
    if count > 0 {
        return Err(Error::HasRentals { id: item_id, count });
    }

    let result = Item::delete_by_id(item_id).exec(&txn).await?;
    txn.commit().await?;

    let deleted = result.rows_affected > 0;
    info!(deleted, "Item delete processed");
    Ok(deleted)
}
