//! Rental entity - A booking of one item for an inclusive date range.
//!
//! Rentals are never deleted. Cancellation flips `status` to `canceled`, which
//! removes the rental from availability checks but keeps it for history.
use crate::errors::Error;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a rental. The only transition is `Active -> Canceled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    /// Holds its dates
    #[sea_orm(string_value = "active")]
    Active,
    /// Released; kept for audit
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

impl FromStr for RentalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "canceled" => Ok(Self::Canceled),
            other => Err(Error::validation(
                "status",
                format!("'{other}' is not a rental status (active, canceled)"),
            )),
        }
    }
}

/// Rental database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    /// UUID v4 assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Id of the rented item
    #[sea_orm(indexed)]
    pub item_id: i64,
    /// First rented day (inclusive)
    pub start_date: Date,
    /// Last rented day (inclusive)
    pub end_date: Date,
    /// Customer name as entered at booking time
    pub customer_name: String,
    /// Customer email as entered at booking time
    pub customer_email: String,
    /// Customer phone, digits only
    pub customer_phone: String,
    /// When the rental was created
    pub created_at: DateTimeUtc,
    /// `active` or `canceled`
    #[sea_orm(indexed)]
    pub status: RentalStatus,
}

/// No database-level relation: item references are checked by the booking
/// service under the item lock, and canceled history must not cascade.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Returns true while the rental holds its dates.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}
