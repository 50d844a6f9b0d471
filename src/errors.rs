//! Unified error type for the rental engine.
//!
//! Every operation returns [`Result`]. The variants are grouped into the
//! business taxonomy exposed by [`ErrorKind`] so a calling layer can translate
//! them into its own response format without matching on every variant.

use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

/// Coarse classification of an [`Error`] for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before any write.
    Validation,
    /// A referenced item or rental does not exist.
    NotFound,
    /// The requested dates collide with an active rental.
    Conflict,
    /// The operation is blocked by dependent data.
    Precondition,
    /// The caller is not an administrator.
    Unauthorized,
    /// Storage, configuration or environment failure.
    Internal,
}

/// Every failure the engine can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The database rejected a query, or stored data is corrupt.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A configuration file or setting is unusable.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with it
        message: String,
    },

    /// An input field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Why it was rejected
        message: String,
    },

    /// No item has this id.
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The missing item id
        id: i64,
    },

    /// No rental has this id.
    #[error("Rental not found: {id}")]
    RentalNotFound {
        /// The missing rental id
        id: String,
    },

    /// The item already has an active rental overlapping the requested dates.
    #[error("Item {item_id} is not available for the selected dates ({start} to {end})")]
    Conflict {
        /// The requested item
        item_id: i64,
        /// First requested day
        start: NaiveDate,
        /// Last requested day
        end: NaiveDate,
    },

    /// The item still has rentals that block its deletion.
    #[error("Cannot delete item {id}: it has {count} rental(s)")]
    HasRentals {
        /// The item that was not deleted
        id: i64,
        /// Number of blocking rentals
        count: u64,
    },

    /// The caller did not present a valid admin credential.
    #[error("Admin privileges required")]
    Unauthorized,

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable is missing or not UTF-8.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// JSON encoding failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::ItemNotFound { .. } | Self::RentalNotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::HasRentals { .. } => ErrorKind::Precondition,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Database(_)
            | Self::Config { .. }
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::validation("phone", "too short").kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::ItemNotFound { id: 3 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::RentalNotFound {
                id: "abc".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::HasRentals { id: 1, count: 2 }.kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            Error::Database(DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_conflict_message_names_dates() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap_or_default();
        let err = Error::Conflict {
            item_id: 1,
            start,
            end,
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.to_string(),
            "Item 1 is not available for the selected dates (2025-03-02 to 2025-03-05)"
        );
    }
}
