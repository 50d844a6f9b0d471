//! Item entity - A rentable catalog entry (garment or accessory).
//!
//! Each item is one unit of inventory. Ids are assigned by the inventory service
//! from the `items` id sequence, never by the database, and never change or get
//! reused afterwards.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of item categories.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Dresses and gowns
    #[sea_orm(string_value = "dress")]
    Dress,
    /// Footwear
    #[sea_orm(string_value = "shoes")]
    Shoes,
    /// Bags and clutches
    #[sea_orm(string_value = "bag")]
    Bag,
    /// Jackets and outerwear
    #[sea_orm(string_value = "jacket")]
    Jacket,
}

impl Category {
    /// Lowercase label as stored and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dress => "dress",
            Self::Shoes => "shoes",
            Self::Bag => "bag",
            Self::Jacket => "jacket",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dress" => Ok(Self::Dress),
            "shoes" => Ok(Self::Shoes),
            "bag" => Ok(Self::Bag),
            "jacket" => Ok(Self::Jacket),
            other => Err(crate::errors::Error::validation(
                "category",
                format!("unknown category '{other}' (expected dress, shoes, bag or jacket)"),
            )),
        }
    }
}

/// Ordered list of strings persisted as a JSON array (sizes, image references).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl StringList {
    /// Returns true if `value` is in the list (exact, case-sensitive).
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }
}

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier, never reused after deletion
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name (e.g., "Emerald Silk Gown")
    pub name: String,
    /// Catalog category
    pub category: Category,
    /// Rental price per day
    pub price_per_day: f64,
    /// Available size labels, in display order
    #[sea_orm(column_type = "Json")]
    pub sizes: StringList,
    /// Color, `"unknown"` when not supplied
    pub color: String,
    /// Optional style tag (e.g., "evening", "cocktail")
    pub style: Option<String>,
    /// Long-form description
    pub description: String,
    /// Image URLs or embedded data, in gallery order
    #[sea_orm(column_type = "Json")]
    pub images: StringList,
    /// Accessibility text for the primary image
    pub alt: String,
}

/// Rentals reference items by id only; see `rental::Model::item_id`.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Text the free-text catalog search runs against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.color,
            self.style.as_deref().unwrap_or_default(),
            self.category
        )
    }
}
