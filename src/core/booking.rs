//! Booking business logic - Creates and cancels rentals.
//!
//! [`create_rental`] validates the request, then holds the item's lock for the
//! whole availability re-check and insert, inside one database transaction.
//! Two overlapping requests for the same item therefore run one after the
//! other, and the second one sees the first rental and fails with
//! [`Error::Conflict`]. Requests for different items do not wait on each other.

use crate::{
    core::{
        availability::is_item_available,
        overlap::DateRange,
        store::Store,
        validation::{validate_customer, validate_not_past, validate_span},
    },
    entities::{Item, Rental, RentalStatus, rental},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Contact details captured with a rental. There are no customer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name, at least 2 characters after trimming
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number, 7 to 15 digits
    pub phone: String,
}

/// A request to rent one item for an inclusive range of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    /// Item to rent
    pub item_id: i64,
    /// Requested days
    pub dates: DateRange,
    /// Who is renting
    pub customer: Customer,
}

/// Filter for the back-office rental listing. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RentalQuery {
    /// Only rentals of this item
    pub item_id: Option<i64>,
    /// Only rentals in this state
    pub status: Option<RentalStatus>,
}

/// Creates a rental, treating the current UTC date as "today".
///
/// # Errors
/// See [`create_rental_as_of`].
pub async fn create_rental(store: &Store, request: RentalRequest) -> Result<rental::Model> {
    create_rental_as_of(store, request, Utc::now().date_naive()).await
}

/// Creates a rental as if the current date were `today`.
///
/// # Errors
/// Returns an error if:
/// - The range starts before `today`, spans more than the policy maximum, or the
///   customer details are malformed (`Validation`)
/// - The item does not exist (`ItemNotFound`)
/// - An active rental of the item overlaps the range (`Conflict`)
/// - The database fails
///
/// Nothing is written unless every check passes.
#[instrument(skip(store, request), fields(item_id = request.item_id, dates = %request.dates))]
pub async fn create_rental_as_of(
    store: &Store,
    request: RentalRequest,
    today: NaiveDate,
) -> Result<rental::Model> {
    let RentalRequest {
        item_id,
        dates,
        customer,
    } = request;

    validate_not_past(&dates, today)?;
    validate_span(&dates, store.policy().max_span_days)?;
    validate_customer(&customer)?;

    let _guard = store.lock_item(item_id).await;
    let txn = store.db().begin().await?;

    Item::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    if !is_item_available(&txn, item_id, &dates).await? {
        debug!("Dates overlap an active rental");
        return Err(Error::Conflict {
            item_id,
            start: dates.start(),
            end: dates.end(),
        });
    }

    let rental = rental::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        item_id: Set(item_id),
        start_date: Set(dates.start()),
        end_date: Set(dates.end()),
        customer_name: Set(customer.name.trim().to_string()),
        customer_email: Set(customer.email.trim().to_string()),
        customer_phone: Set(customer.phone),
        created_at: Set(Utc::now()),
        status: Set(RentalStatus::Active),
    };
    let created = rental.insert(&txn).await?;
    txn.commit().await?;

    info!(rental_id = %created.id, "Rental created");
    Ok(created)
}

/// Cancels a rental, releasing its dates.
///
/// Canceling a rental that is already canceled succeeds and returns it unchanged.
///
/// # Errors
/// Returns `RentalNotFound` for an unknown id, or a database error.
#[instrument(skip(store))]
pub async fn cancel_rental(store: &Store, rental_id: &str) -> Result<rental::Model> {
    let existing = Rental::find_by_id(rental_id.to_string())
        .one(store.db())
        .await?
        .ok_or_else(|| Error::RentalNotFound {
            id: rental_id.to_string(),
        })?;

    if !existing.is_active() {
        debug!("Rental already canceled");
        return Ok(existing);
    }

    let mut rental: rental::ActiveModel = existing.into();
    rental.status = Set(RentalStatus::Canceled);
    let canceled = rental.update(store.db()).await?;

    info!("Rental canceled");
    Ok(canceled)
}

/// Retrieves a rental by id, whatever its status.
pub async fn get_rental<C>(db: &C, rental_id: &str) -> Result<Option<rental::Model>>
where
    C: ConnectionTrait,
{
    Rental::find_by_id(rental_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists rentals for the back office, oldest first.
pub async fn list_rentals<C>(db: &C, query: RentalQuery) -> Result<Vec<rental::Model>>
where
    C: ConnectionTrait,
{
    let mut select = Rental::find();
    if let Some(item_id) = query.item_id {
        select = select.filter(rental::Column::ItemId.eq(item_id));
    }
    if let Some(status) = query.status {
        select = select.filter(rental::Column::Status.eq(status));
    }
    select
        .order_by_asc(rental::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
