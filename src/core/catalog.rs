//! Catalog business logic - Item lookup and filtered search.
//!
//! Filters are conjunctive and each unset filter matches everything. Text
//! filters run in Rust on the loaded rows because `sizes` is a JSON list and the
//! case-insensitive comparisons must behave the same on every backend.

use crate::{
    core::{availability::booked_item_ids, overlap::DateRange},
    entities::{Category, Item, item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};

/// Catalog search filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Exact category
    pub category: Option<Category>,
    /// Case-insensitive exact color
    pub color: Option<String>,
    /// Case-insensitive exact style
    pub style: Option<String>,
    /// Size label the item must offer (case-sensitive)
    pub size: Option<String>,
    /// Case-insensitive substring of name, color, style and category
    pub q: Option<String>,
    /// Only items free for the whole range
    pub dates: Option<DateRange>,
}

impl ItemFilter {
    /// Returns true if every attribute filter accepts `item`. Dates are checked separately.
    #[must_use]
    pub fn matches(&self, item: &item::Model) -> bool {
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if let Some(color) = &self.color
            && !eq_ignore_case(&item.color, color)
        {
            return false;
        }
        if let Some(style) = &self.style
            && !item
                .style
                .as_deref()
                .is_some_and(|s| eq_ignore_case(s, style))
        {
            return false;
        }
        if let Some(size) = &self.size
            && !item.sizes.contains(size)
        {
            return false;
        }
        if let Some(q) = &self.q
            && !item
                .search_text()
                .to_lowercase()
                .contains(&q.to_lowercase())
        {
            return false;
        }
        true
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Lists items accepted by `filter`, in ascending id order.
///
/// With `filter.dates` set, items that have an active rental overlapping the
/// range are left out.
pub async fn list_items<C>(db: &C, filter: &ItemFilter) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    let items = Item::find().order_by_asc(item::Column::Id).all(db).await?;

    let booked = match &filter.dates {
        Some(range) => Some(booked_item_ids(db, range).await?),
        None => None,
    };

    Ok(items
        .into_iter()
        .filter(|item| filter.matches(item))
        .filter(|item| booked.as_ref().is_none_or(|ids| !ids.contains(&item.id)))
        .collect())
}

/// Retrieves an item by id.
pub async fn get_item<C>(db: &C, item_id: i64) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find_by_id(item_id).one(db).await.map_err(Into::into)
}

/// Retrieves an item by id, treating a miss as [`Error::ItemNotFound`].
pub async fn require_item<C>(db: &C, item_id: i64) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    get_item(db, item_id)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::booking::cancel_rental;
    use crate::core::inventory::{NewItem, add_item};
    use crate::core::store::Store;
    use crate::test_utils::*;

    async fn seed_mixed_catalog(store: &Store) -> Result<Vec<item::Model>> {
        let mut gown = NewItem::new("Emerald Silk Gown", Category::Dress, 45.0);
        gown.sizes = vec!["S".to_string(), "M".to_string(), "L".to_string()];
        gown.color = Some("Green".to_string());
        gown.style = Some("Evening".to_string());

        let mut boots = NewItem::new("Ankle Boots", Category::Shoes, 15.0);
        boots.sizes = vec!["38".to_string(), "39".to_string()];
        boots.color = Some("black".to_string());

        let mut clutch = NewItem::new("Beaded Clutch", Category::Bag, 10.0);
        clutch.color = Some("gold".to_string());
        clutch.style = Some("evening".to_string());

        let mut blazer = NewItem::new("Velvet Blazer", Category::Jacket, 20.0);
        blazer.sizes = vec!["m".to_string()];
        blazer.color = Some("green".to_string());

        let mut created = Vec::new();
        for new_item in [gown, boots, clutch, blazer] {
            created.push(add_item(store, new_item).await?);
        }
        Ok(created)
    }

    fn ids(items: &[item::Model]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_everything() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;

        let first = list_items(store.db(), &ItemFilter::default()).await?;
        let second = list_items(store.db(), &ItemFilter::default()).await?;
        assert_eq!(first.len(), created.len());
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_category_filter() -> Result<()> {
        let store = setup_test_store().await?;
        seed_mixed_catalog(&store).await?;

        let filter = ItemFilter {
            category: Some(Category::Shoes),
            ..Default::default()
        };
        let items = list_items(store.db(), &filter).await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Ankle Boots");
        Ok(())
    }

    #[tokio::test]
    async fn test_color_and_style_ignore_case() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;

        let green = ItemFilter {
            color: Some("GREEN".to_string()),
            ..Default::default()
        };
        let items = list_items(store.db(), &green).await?;
        assert_eq!(ids(&items), vec![created[0].id, created[3].id]);

        let evening = ItemFilter {
            style: Some("evening".to_string()),
            ..Default::default()
        };
        let items = list_items(store.db(), &evening).await?;
        assert_eq!(ids(&items), vec![created[0].id, created[2].id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_size_filter_is_case_sensitive() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;

        let upper = ItemFilter {
            size: Some("M".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&list_items(store.db(), &upper).await?), vec![created[0].id]);

        let lower = ItemFilter {
            size: Some("m".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&list_items(store.db(), &lower).await?), vec![created[3].id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_free_text_search() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;

        let by_name = ItemFilter {
            q: Some("silk".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&list_items(store.db(), &by_name).await?), vec![created[0].id]);

        // Category text is searchable too
        let by_category = ItemFilter {
            q: Some("JACKET".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&list_items(store.db(), &by_category).await?), vec![created[3].id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_filters_combine_with_and() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;

        let filter = ItemFilter {
            color: Some("green".to_string()),
            category: Some(Category::Dress),
            q: Some("gown".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&list_items(store.db(), &filter).await?), vec![created[0].id]);

        let none = ItemFilter {
            color: Some("green".to_string()),
            category: Some(Category::Bag),
            ..Default::default()
        };
        assert!(list_items(store.db(), &none).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_date_filter_excludes_booked_items() -> Result<()> {
        let store = setup_test_store().await?;
        let created = seed_mixed_catalog(&store).await?;
        let rental = book(&store, created[0].id, "2025-03-01", "2025-03-03").await?;

        let filter = ItemFilter {
            category: Some(Category::Dress),
            dates: Some(range("2025-03-02", "2025-03-04")),
            ..Default::default()
        };
        assert!(list_items(store.db(), &filter).await?.is_empty());

        let later = ItemFilter {
            dates: Some(range("2025-03-04", "2025-03-06")),
            ..Default::default()
        };
        assert_eq!(list_items(store.db(), &later).await?.len(), created.len());

        cancel_rental(&store, &rental.id).await?;
        assert_eq!(ids(&list_items(store.db(), &filter).await?), vec![created[0].id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_item_and_require_item() -> Result<()> {
        let (store, item) = setup_with_item().await?;

        assert_eq!(get_item(store.db(), item.id).await?, Some(item.clone()));
        assert!(get_item(store.db(), 999).await?.is_none());

        assert_eq!(require_item(store.db(), item.id).await?, item);
        let err = require_item(store.db(), 999).await.unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { id: 999 }));
        Ok(())
    }
}
