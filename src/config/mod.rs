/// Seed catalog loading from catalog.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;

/// Environment-driven application settings
pub mod settings;

pub use settings::Settings;
