//! Id sequence entity - Persistent high-water marks for service-assigned ids.
//!
//! One row per sequence. `last_issued` only ever grows, so an id stays spent
//! after the row it was given to is deleted.

use sea_orm::entity::prelude::*;

/// Name of the sequence that hands out item ids.
pub const ITEM_SEQUENCE: &str = "items";

/// Id sequence database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "id_sequences")]
pub struct Model {
    /// Sequence name, e.g. [`ITEM_SEQUENCE`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// Highest id handed out so far
    pub last_issued: i64,
}

/// Standalone table.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
