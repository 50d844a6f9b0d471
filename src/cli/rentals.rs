use super::App;
use crate::{
    core::{
        availability::get_item_rentals,
        booking::{Customer, RentalQuery, RentalRequest, cancel_rental, create_rental, list_rentals},
        catalog::require_item,
        validation::parse_date_range,
    },
    entities::RentalStatus,
    errors::Result,
};
use clap::Args;
use serde_json::Value;

#[derive(Debug, Args)]
pub(crate) struct BookArgs {
    item_id: i64,

    /// First rented day (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Last rented day (YYYY-MM-DD)
    #[arg(long)]
    end: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// Digits only
    #[arg(long)]
    phone: String,
}

#[derive(Debug, Args)]
pub(crate) struct CancelArgs {
    rental_id: String,
}

#[derive(Debug, Args)]
pub(crate) struct ItemRentalsArgs {
    item_id: i64,
}

#[derive(Debug, Args)]
pub(crate) struct ListRentalsArgs {
    #[arg(long)]
    item_id: Option<i64>,

    /// active or canceled
    #[arg(long)]
    status: Option<String>,
}

pub(super) async fn book(app: &App, args: BookArgs) -> Result<Value> {
    let request = RentalRequest {
        item_id: args.item_id,
        dates: parse_date_range(&args.start, &args.end)?,
        customer: Customer {
            name: args.name,
            email: args.email,
            phone: args.phone,
        },
    };
    let rental = create_rental(&app.store, request).await?;
    Ok(serde_json::to_value(rental)?)
}

pub(super) async fn cancel(app: &App, args: CancelArgs) -> Result<Value> {
    let rental = cancel_rental(&app.store, &args.rental_id).await?;
    Ok(serde_json::to_value(rental)?)
}

pub(super) async fn item_rentals(app: &App, args: ItemRentalsArgs) -> Result<Value> {
    require_item(app.store.db(), args.item_id).await?;
    let rentals = get_item_rentals(app.store.db(), args.item_id).await?;
    Ok(serde_json::to_value(rentals)?)
}

pub(super) async fn list(app: &App, args: ListRentalsArgs) -> Result<Value> {
    let query = RentalQuery {
        item_id: args.item_id,
        status: args.status.as_deref().map(str::parse::<RentalStatus>).transpose()?,
    };
    let rentals = list_rentals(app.store.db(), query).await?;
    Ok(serde_json::to_value(rentals)?)
}
