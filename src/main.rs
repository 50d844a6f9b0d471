use clap::Parser;
use dotenvy::dotenv;
use dress_rental::{
    cli::{App, Cli, exit_code},
    config::{Settings, catalog},
    core::{auth::TokenAdminCheck, seed::seed_catalog, store::Store},
    errors::Result,
};
use std::{process, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{e}");
        process::exit(exit_code(e.kind()));
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 3. Settings and store
    let settings = Settings::from_env()?;
    let store = Store::open(&settings.database_url, settings.policy)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Seed the catalog once, if a catalog file is present
    if settings.catalog_path.exists() {
        let catalog = catalog::load_catalog(&settings.catalog_path)?;
        let inserted = seed_catalog(&store, &catalog.items).await?;
        if inserted > 0 {
            info!(inserted, path = %settings.catalog_path.display(), "Seeded catalog");
        }
    }

    // 5. Run the command
    let app = App::new(store, Arc::new(TokenAdminCheck::new(settings.admin_token)));
    let output = cli.run(&app).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
