/// Database configuration and connection management
pub mod database;

/// Reference catalog loading from catalog.toml
pub mod catalog;
