//! Core business logic - framework-agnostic catalog, availability and booking operations.
//!
//! Read-only functions take any `ConnectionTrait` so they run equally on a plain
//! connection or inside a transaction. Mutating functions take a [`Store`],
//! which carries the locks that keep concurrent bookings from overlapping.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod inventory;
pub mod overlap;
pub mod policy;
pub mod seed;
pub mod store;
pub mod validation;

pub use overlap::DateRange;
pub use store::Store;
