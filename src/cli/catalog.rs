use super::App;
use crate::{
    core::{
        availability::booked_days,
        catalog::{ItemFilter, list_items, require_item},
        validation::parse_date_range,
    },
    entities::Category,
    errors::Result,
};
use clap::Args;
use serde_json::{Value, json};

#[derive(Debug, Args)]
pub(crate) struct ItemsArgs {
    /// Free text matched against name, color, style and category
    #[arg(long)]
    q: Option<String>,

    /// dress, shoes, bag or jacket
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    style: Option<String>,

    /// Exact size label
    #[arg(long)]
    size: Option<String>,

    /// Only items free from this day (YYYY-MM-DD); ignored without --end
    #[arg(long)]
    start: Option<String>,

    /// Only items free through this day (YYYY-MM-DD); ignored without --start
    #[arg(long)]
    end: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ItemArgs {
    item_id: i64,
}

#[derive(Debug, Args)]
pub(crate) struct CalendarArgs {
    item_id: i64,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    end: String,
}

impl ItemsArgs {
    fn into_filter(self) -> Result<ItemFilter> {
        // A date range filters only when both ends are given
        let dates = match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) => Some(parse_date_range(start, end)?),
            _ => None,
        };
        Ok(ItemFilter {
            category: self.category.as_deref().map(str::parse::<Category>).transpose()?,
            color: self.color,
            style: self.style,
            size: self.size,
            q: self.q,
            dates,
        })
    }
}

pub(super) async fn items(app: &App, args: ItemsArgs) -> Result<Value> {
    let filter = args.into_filter()?;
    let items = list_items(app.store.db(), &filter).await?;
    Ok(serde_json::to_value(items)?)
}

pub(super) async fn item(app: &App, args: ItemArgs) -> Result<Value> {
    let item = require_item(app.store.db(), args.item_id).await?;
    Ok(serde_json::to_value(item)?)
}

pub(super) async fn calendar(app: &App, args: CalendarArgs) -> Result<Value> {
    let window = parse_date_range(&args.start, &args.end)?;
    require_item(app.store.db(), args.item_id).await?;
    let booked = booked_days(app.store.db(), args.item_id, &window).await?;
    Ok(json!({
        "item_id": args.item_id,
        "start": window.start(),
        "end": window.end(),
        "booked": booked,
    }))
}
