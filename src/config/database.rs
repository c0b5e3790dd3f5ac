//! Database configuration module for `studiobook`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to generate SQL
//! statements from the entity models, so the database schema matches the
//! Rust struct definitions without requiring manual SQL.

use crate::entities::Booking;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default
/// `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back
/// to a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/studiobook.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the
/// `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set.
///
/// # Errors
/// Returns `Error::Database` if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// # Errors
/// Returns `Error::Database` if a table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let booking_table = schema.create_table_from_entity(Booking);
    db.execute(builder.build(&booking_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::booking::Model as BookingModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that the table exists by querying it
        let _: Vec<BookingModel> = Booking::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_database_url_fallback() {
        // With no DATABASE_URL in the test environment the local file is used
        if std::env::var("DATABASE_URL").is_err() {
            assert_eq!(get_database_url(), "sqlite://data/studiobook.sqlite");
        }
    }
}
