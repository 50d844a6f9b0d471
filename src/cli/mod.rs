//! Command-line front end.
//!
//! A thin caller over [`crate::core`]: each subcommand parses its arguments,
//! runs one core operation and returns the result as JSON. Admin subcommands
//! check `--admin-token` through an [`AdminCheck`] first.

use crate::{
    core::{
        auth::{AdminCheck, require_admin},
        store::Store,
    },
    errors::{ErrorKind, Result},
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::sync::Arc;

mod admin;
mod catalog;
mod rentals;

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(name = "dress-rental", about = "Dress rental catalog and booking", long_about = None)]
pub struct Cli {
    /// Admin credential for back-office commands
    #[arg(long, global = true)]
    admin_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog
    Items(catalog::ItemsArgs),
    /// Show one item
    Item(catalog::ItemArgs),
    /// Booked days of an item within a window
    Calendar(catalog::CalendarArgs),
    /// Request a rental
    Book(rentals::BookArgs),
    /// Cancel a rental (admin)
    Cancel(rentals::CancelArgs),
    /// Active rentals of an item (admin)
    Rentals(rentals::ItemRentalsArgs),
    /// All rentals, optionally filtered (admin)
    ListRentals(rentals::ListRentalsArgs),
    /// Add a catalog item (admin)
    AddItem(admin::AddItemArgs),
    /// Change fields of an item (admin)
    UpdateItem(admin::UpdateItemArgs),
    /// Delete an item without blocking rentals (admin)
    DeleteItem(admin::DeleteItemArgs),
}

/// What every command runs against.
#[derive(Clone)]
pub struct App {
    /// Shared store
    pub store: Store,
    /// Decides who is an admin
    pub admin: Arc<dyn AdminCheck>,
}

impl App {
    /// Bundles a store with an admin check.
    pub fn new(store: Store, admin: Arc<dyn AdminCheck>) -> Self {
        Self { store, admin }
    }
}

impl Cli {
    /// Runs the parsed command and returns its JSON output.
    pub async fn run(self, app: &App) -> Result<Value> {
        let credential = self.admin_token.as_deref();
        let check_admin = || require_admin(app.admin.as_ref(), credential);

        match self.command {
            Commands::Items(args) => catalog::items(app, args).await,
            Commands::Item(args) => catalog::item(app, args).await,
            Commands::Calendar(args) => catalog::calendar(app, args).await,
            Commands::Book(args) => rentals::book(app, args).await,
            Commands::Cancel(args) => {
                check_admin()?;
                rentals::cancel(app, args).await
            }
            Commands::Rentals(args) => {
                check_admin()?;
                rentals::item_rentals(app, args).await
            }
            Commands::ListRentals(args) => {
                check_admin()?;
                rentals::list(app, args).await
            }
            Commands::AddItem(args) => {
                check_admin()?;
                admin::add(app, args).await
            }
            Commands::UpdateItem(args) => {
                check_admin()?;
                admin::update(app, args).await
            }
            Commands::DeleteItem(args) => {
                check_admin()?;
                admin::delete(app, args).await
            }
        }
    }
}

/// Process exit code for a failed command.
#[must_use]
pub const fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Conflict => 4,
        ErrorKind::Precondition => 5,
        ErrorKind::Unauthorized => 6,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::auth::TokenAdminCheck;
    use crate::errors::Error;
    use crate::test_utils::*;

    pub(super) async fn test_app() -> Result<App> {
        let store = setup_test_store().await?;
        Ok(App::new(
            store,
            Arc::new(TokenAdminCheck::new(Some("s3cret".to_string()))),
        ))
    }

    pub(super) async fn run(app: &App, args: &[&str]) -> Result<Value> {
        let cli = Cli::try_parse_from(std::iter::once("dress-rental").chain(args.iter().copied()))
            .unwrap();
        cli.run(app).await
    }

    #[tokio::test]
    async fn test_admin_commands_require_token() -> Result<()> {
        let app = test_app().await?;

        let err = run(&app, &["list-rentals"]).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let err = run(&app, &["--admin-token", "wrong", "delete-item", "1"])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let listed = run(&app, &["list-rentals", "--admin-token", "s3cret"]).await?;
        assert_eq!(listed, Value::Array(Vec::new()));
        Ok(())
    }

    #[tokio::test]
    async fn test_public_commands_need_no_token() -> Result<()> {
        let app = test_app().await?;
        create_test_item(&app.store, "Emerald Silk Gown").await?;

        let items = run(&app, &["items"]).await?;
        assert_eq!(items.as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let kinds = [
            ErrorKind::Internal,
            ErrorKind::Validation,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::Precondition,
            ErrorKind::Unauthorized,
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|k| exit_code(*k)).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(!codes.contains(&0));
    }
}
