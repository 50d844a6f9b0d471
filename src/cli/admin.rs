use super::App;
use crate::{
    core::{
        inventory::{ItemUpdate, NewItem, add_item, delete_item, update_item},
        validation::validate_new_item,
    },
    entities::Category,
    errors::{Error, Result},
};
use clap::Args;
use serde_json::{Value, json};

#[derive(Debug, Args)]
pub(crate) struct AddItemArgs {
    #[arg(long)]
    name: String,

    /// dress, shoes, bag or jacket
    #[arg(long)]
    category: String,

    /// Price per rental day
    #[arg(long)]
    price: f64,

    /// Size label, repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    style: Option<String>,

    /// 50 to 500 characters
    #[arg(long)]
    description: String,

    /// Image reference, repeatable
    #[arg(long = "image")]
    images: Vec<String>,

    /// Accessibility text, defaults to the name
    #[arg(long)]
    alt: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateItemArgs {
    item_id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    price: Option<f64>,

    /// Replaces the size list, repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long, conflicts_with = "clear_style")]
    style: Option<String>,

    /// Remove the style tag
    #[arg(long)]
    clear_style: bool,

    #[arg(long)]
    description: Option<String>,

    /// Replaces the image list, repeatable
    #[arg(long = "image")]
    images: Vec<String>,

    #[arg(long)]
    alt: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct DeleteItemArgs {
    item_id: i64,
}

impl AddItemArgs {
    fn into_new_item(self) -> Result<NewItem> {
        Ok(NewItem {
            name: self.name,
            category: self.category.parse()?,
            price_per_day: self.price,
            sizes: self.sizes,
            color: self.color,
            style: self.style,
            description: Some(self.description),
            images: self.images,
            alt: self.alt,
        })
    }
}

impl UpdateItemArgs {
    fn into_update(self) -> Result<ItemUpdate> {
        let mut update = ItemUpdate::default();
        if let Some(name) = self.name {
            update = update.name(name);
        }
        if let Some(category) = self.category {
            update = update.category(category.parse::<Category>()?);
        }
        if let Some(price) = self.price {
            update = update.price_per_day(price);
        }
        if !self.sizes.is_empty() {
            update = update.sizes(self.sizes);
        }
        if let Some(color) = self.color {
            update = update.color(color);
        }
        if self.clear_style {
            update = update.style(None);
        } else if let Some(style) = self.style {
            update = update.style(Some(style));
        }
        if let Some(description) = self.description {
            update = update.description(description);
        }
        if !self.images.is_empty() {
            update = update.images(self.images);
        }
        if let Some(alt) = self.alt {
            update = update.alt(alt);
        }
        Ok(update)
    }
}

pub(super) async fn add(app: &App, args: AddItemArgs) -> Result<Value> {
    let new_item = args.into_new_item()?;
    validate_new_item(&new_item)?;
    let item = add_item(&app.store, new_item).await?;
    Ok(serde_json::to_value(item)?)
}

pub(super) async fn update(app: &App, args: UpdateItemArgs) -> Result<Value> {
    let item_id = args.item_id;
    let update = args.into_update()?;
    let item = update_item(&app.store, item_id, update)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;
    Ok(serde_json::to_value(item)?)
}

pub(super) async fn delete(app: &App, args: DeleteItemArgs) -> Result<Value> {
    if !delete_item(&app.store, args.item_id).await? {
        return Err(Error::ItemNotFound { id: args.item_id });
    }
    Ok(json!({ "deleted": args.item_id }))
}
