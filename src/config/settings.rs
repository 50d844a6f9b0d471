//! Application settings loaded from environment variables.
//!
//! `.env` is loaded by `main` through `dotenvy` before [`Settings::from_env`] runs,
//! so every value can come from either the process environment or that file.

use crate::config::{catalog::DEFAULT_CATALOG_PATH, database::DEFAULT_DATABASE_URL};
use crate::core::policy::{DeleteGuard, MAX_RENTAL_SPAN_DAYS, RentalPolicy};
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Runtime settings for the rental engine.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `SeaORM` connection string (`DATABASE_URL`)
    pub database_url: String,
    /// Seed catalog location (`CATALOG_PATH`)
    pub catalog_path: PathBuf,
    /// Shared secret that identifies an administrator (`DRESS_RENTAL_ADMIN_TOKEN`)
    pub admin_token: Option<String>,
    /// Booking and deletion policy (`MAX_RENTAL_DAYS`, `DELETE_GUARD`)
    pub policy: RentalPolicy,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_span_days = match lookup("MAX_RENTAL_DAYS") {
            Some(raw) => parse_max_days(&raw)?,
            None => MAX_RENTAL_SPAN_DAYS,
        };
        let delete_guard = match lookup("DELETE_GUARD") {
            Some(raw) => raw.parse::<DeleteGuard>()?,
            None => DeleteGuard::default(),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            catalog_path: lookup("CATALOG_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from),
            admin_token: lookup("DRESS_RENTAL_ADMIN_TOKEN").filter(|t| !t.trim().is_empty()),
            policy: RentalPolicy {
                max_span_days,
                delete_guard,
            },
        })
    }
}

fn parse_max_days(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(days) if days >= 0 => Ok(days),
        _ => Err(Error::Config {
            message: format!("MAX_RENTAL_DAYS must be a non-negative integer, got '{raw}'"),
        }),
    }
}
