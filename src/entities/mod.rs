//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod id_sequence;
pub mod item;
pub mod rental;

// Re-export specific types to avoid conflicts
pub use id_sequence::{Entity as IdSequence, ITEM_SEQUENCE};
pub use item::{Category, Column as ItemColumn, Entity as Item, Model as ItemModel, StringList};
pub use rental::{
    Column as RentalColumn, Entity as Rental, Model as RentalModel, RentalStatus,
};
