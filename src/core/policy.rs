//! Booking and inventory policy constants.

use crate::errors::{Error, Result};
use std::str::FromStr;

/// Longest allowed rental: `end - start` may be at most this many days.
pub const MAX_RENTAL_SPAN_DAYS: i64 = 7;

/// Shortest description accepted on the admin item-creation path.
pub const MIN_DESCRIPTION_LEN: usize = 50;

/// Longest description accepted on the admin item-creation path.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Image reference used when an item is created without images.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Color used when an item is created without one.
pub const DEFAULT_COLOR: &str = "unknown";

/// Which rentals block deleting an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteGuard {
    /// Any rental referencing the item, canceled ones included.
    AnyRental,
    /// Only rentals that are still active.
    #[default]
    ActiveOnly,
}

impl FromStr for DeleteGuard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::AnyRental),
            "active" => Ok(Self::ActiveOnly),
            other => Err(Error::Config {
                message: format!("DELETE_GUARD must be 'any' or 'active', got '{other}'"),
            }),
        }
    }
}

/// Tunable rules applied by the booking and inventory services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPolicy {
    /// Maximum `end - start` in days (inclusive boundary)
    pub max_span_days: i64,
    /// Deletion guard mode
    pub delete_guard: DeleteGuard,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            max_span_days: MAX_RENTAL_SPAN_DAYS,
            delete_guard: DeleteGuard::default(),
        }
    }
}
