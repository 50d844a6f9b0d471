//! Caller-side input validation.
//!
//! Everything here is pure: no function touches storage, so a rejected request
//! can never leave partial state behind. Booking calls [`validate_customer`],
//! [`validate_span`] and [`validate_not_past`] itself; [`validate_new_item`] is
//! the admin form rule and is deliberately not applied by
//! [`crate::core::inventory::add_item`].

use crate::core::booking::Customer;
use crate::core::inventory::NewItem;
use crate::core::overlap::DateRange;
use crate::core::policy::{MAX_DESCRIPTION_LEN, MIN_DESCRIPTION_LEN};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

// Patterns are literals; compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));
#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,15}$").expect("phone pattern"));

/// Parses a strict `YYYY-MM-DD` date. Other shapes are rejected, not coerced.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate> {
    if !DATE_RE.is_match(raw) {
        return Err(Error::validation(
            field,
            format!("'{raw}' is not a YYYY-MM-DD date"),
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::validation(field, format!("'{raw}' is not a calendar date: {e}")))
}

/// Parses both ends of a range and checks `start <= end`.
pub fn parse_date_range(start: &str, end: &str) -> Result<DateRange> {
    DateRange::new(parse_date("start", start)?, parse_date("end", end)?)
}

/// Checks that `range` spans at most `max_days` (`end - start`, inclusive boundary).
pub fn validate_span(range: &DateRange, max_days: i64) -> Result<()> {
    let days = range.days();
    if days > max_days {
        return Err(Error::validation(
            "dates",
            format!("rental spans {days} days; the maximum is {max_days}"),
        ));
    }
    Ok(())
}

/// Rejects ranges starting before `today`.
pub fn validate_not_past(range: &DateRange, today: NaiveDate) -> Result<()> {
    if range.start() < today {
        return Err(Error::validation(
            "start",
            format!("start date {} is in the past", range.start()),
        ));
    }
    Ok(())
}

/// Checks the customer snapshot: name, email shape, digits-only phone.
pub fn validate_customer(customer: &Customer) -> Result<()> {
    if customer.name.trim().chars().count() < 2 {
        return Err(Error::validation(
            "name",
            "name must be at least 2 characters",
        ));
    }
    if !EMAIL_RE.is_match(customer.email.trim()) {
        return Err(Error::validation(
            "email",
            format!("'{}' is not a valid email address", customer.email),
        ));
    }
    if !PHONE_RE.is_match(&customer.phone) {
        return Err(Error::validation(
            "phone",
            "phone must be 7 to 15 digits",
        ));
    }
    Ok(())
}

/// Item names must contain a non-whitespace character.
pub fn validate_item_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "item name cannot be empty"));
    }
    Ok(())
}

/// Daily prices must be finite and non-negative. Zero is allowed.
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation(
            "price_per_day",
            format!("price must be a non-negative number, got {price}"),
        ));
    }
    Ok(())
}

/// Admin form rules for a new item.
///
/// Category membership is already guaranteed by the [`crate::entities::Category`]
/// type; raw strings go through its `FromStr` first.
pub fn validate_new_item(item: &NewItem) -> Result<()> {
    validate_item_name(&item.name)?;
    validate_price(item.price_per_day)?;
    let len = item.description.as_deref().unwrap_or_default().chars().count();
    if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
        return Err(Error::validation(
            "description",
            format!(
                "description must be {MIN_DESCRIPTION_LEN} to {MAX_DESCRIPTION_LEN} characters, got {len}"
            ),
        ));
    }
    Ok(())
}
