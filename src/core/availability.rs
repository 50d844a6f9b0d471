//! Availability business logic.
//!
//! An item is available for a range when none of its active rentals overlaps
//! that range. Canceled rentals never count. Every function is generic over
//! `ConnectionTrait` so the booking service can run the same check inside its
//! transaction.

use crate::{
    core::overlap::DateRange,
    entities::{Rental, RentalStatus, rental},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, prelude::*};
use std::collections::{BTreeSet, HashSet};

/// Retrieves the active rentals of an item, in creation order.
///
/// Used by availability checks and by the admin calendar view.
pub async fn get_item_rentals<C>(db: &C, item_id: i64) -> Result<Vec<rental::Model>>
where
    C: ConnectionTrait,
{
    Rental::find()
        .filter(rental::Column::ItemId.eq(item_id))
        .filter(rental::Column::Status.eq(RentalStatus::Active))
        .order_by_asc(rental::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns true if no active rental of `item_id` overlaps `range`.
///
/// Does not check that the item exists; an unknown id has no rentals and is
/// therefore reported as available.
pub async fn is_item_available<C>(db: &C, item_id: i64, range: &DateRange) -> Result<bool>
where
    C: ConnectionTrait,
{
    for rental in get_item_rentals(db, item_id).await? {
        if rental_range(&rental)?.overlaps(range) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Ids of every item that has an active rental overlapping `range`.
///
/// One query for the whole catalog instead of one per item.
pub async fn booked_item_ids<C>(db: &C, range: &DateRange) -> Result<HashSet<i64>>
where
    C: ConnectionTrait,
{
    let rentals = Rental::find()
        .filter(rental::Column::Status.eq(RentalStatus::Active))
        .all(db)
        .await?;
    let mut booked = HashSet::new();
    for rental in &rentals {
        if rental_range(rental)?.overlaps(range) {
            booked.insert(rental.item_id);
        }
    }
    Ok(booked)
}

/// Days inside `window` covered by an active rental of `item_id`, ascending.
pub async fn booked_days<C>(db: &C, item_id: i64, window: &DateRange) -> Result<Vec<NaiveDate>>
where
    C: ConnectionTrait,
{
    let mut days = BTreeSet::new();
    for rental in get_item_rentals(db, item_id).await? {
        let booked = rental_range(&rental)?;
        if booked.overlaps(window) {
            days.extend(booked.iter_days().filter(|d| window.contains(*d)));
        }
    }
    Ok(days.into_iter().collect())
}

/// The stored dates of `rental` as a range.
///
/// A stored rental with its start after its end is corrupt data and is reported
/// as a database error rather than read as some other range.
fn rental_range(rental: &rental::Model) -> Result<DateRange> {
    DateRange::new(rental.start_date, rental.end_date).map_err(|_| {
        Error::Database(DbErr::Custom(format!(
            "rental {} has start {} after end {}",
            rental.id, rental.start_date, rental.end_date
        )))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::booking::cancel_rental;
    use crate::errors::ErrorKind;
    use crate::test_utils::*;
    use sea_orm::Set;

    #[tokio::test]
    async fn test_item_without_rentals_is_available() -> Result<()> {
        let (store, item) = setup_with_item().await?;

        assert!(is_item_available(store.db(), item.id, &range("2025-03-01", "2025-03-03")).await?);
        assert!(get_item_rentals(store.db(), item.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_overlapping_rental_blocks_range() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        book(&store, item.id, "2025-03-01", "2025-03-03").await?;

        assert!(!is_item_available(store.db(), item.id, &range("2025-03-02", "2025-03-05")).await?);
        assert!(!is_item_available(store.db(), item.id, &range("2025-03-03", "2025-03-03")).await?);
        assert!(is_item_available(store.db(), item.id, &range("2025-03-04", "2025-03-06")).await?);
        assert!(is_item_available(store.db(), item.id, &range("2025-02-25", "2025-02-28")).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_rentals_of_other_items_do_not_count() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        let other = create_test_item(&store, "Other Dress").await?;
        book(&store, other.id, "2025-03-01", "2025-03-03").await?;

        assert!(is_item_available(store.db(), item.id, &range("2025-03-01", "2025-03-03")).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancellation_releases_the_slot() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        let rental = book(&store, item.id, "2025-03-01", "2025-03-03").await?;
        let dates = range("2025-03-01", "2025-03-03");

        assert!(!is_item_available(store.db(), item.id, &dates).await?);
        cancel_rental(&store, &rental.id).await?;
        assert!(is_item_available(store.db(), item.id, &dates).await?);
        assert!(get_item_rentals(store.db(), item.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_item_rentals_returns_only_active_in_creation_order() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        let first = book(&store, item.id, "2025-03-01", "2025-03-02").await?;
        let canceled = book(&store, item.id, "2025-03-04", "2025-03-05").await?;
        let third = book(&store, item.id, "2025-03-07", "2025-03-08").await?;
        cancel_rental(&store, &canceled.id).await?;

        let ids: Vec<String> = get_item_rentals(store.db(), item.id)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_booked_item_ids() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        let other = create_test_item(&store, "Other Dress").await?;
        book(&store, item.id, "2025-03-01", "2025-03-03").await?;
        book(&store, other.id, "2025-03-10", "2025-03-12").await?;

        let booked = booked_item_ids(store.db(), &range("2025-03-03", "2025-03-04")).await?;
        assert!(booked.contains(&item.id));
        assert!(!booked.contains(&other.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_booked_days_clipped_to_window() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        book(&store, item.id, "2025-02-27", "2025-03-02").await?;
        book(&store, item.id, "2025-03-05", "2025-03-05").await?;
        let canceled = book(&store, item.id, "2025-03-07", "2025-03-08").await?;
        cancel_rental(&store, &canceled.id).await?;

        let days = booked_days(store.db(), item.id, &range("2025-03-01", "2025-03-31")).await?;
        assert_eq!(days, vec![date("2025-03-01"), date("2025-03-02"), date("2025-03-05")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_stored_rental_is_an_error() -> Result<()> {
        let (store, item) = setup_with_item().await?;
        let rental = book(&store, item.id, "2025-03-01", "2025-03-03").await?;

        // Written behind the service's back
        let mut corrupt: rental::ActiveModel = rental.into();
        corrupt.start_date = Set(date("2025-03-05"));
        corrupt.update(store.db()).await?;

        let dates = range("2025-03-10", "2025-03-12");
        let err = is_item_available(store.db(), item.id, &dates).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);

        assert!(booked_item_ids(store.db(), &dates).await.is_err());
        assert!(booked_days(store.db(), item.id, &dates).await.is_err());
        Ok(())
    }
}
