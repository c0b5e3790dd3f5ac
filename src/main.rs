//! Startup binary: validates the reference catalog and prepares the booking
//! database, then reports readiness.

use dotenvy::dotenv;
use studiobook::config;
use studiobook::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load and validate the reference catalog
    let catalog = config::catalog::load_default_catalog()
        .inspect_err(|e| error!("Failed to load reference catalog: {e}"))?;
    info!(
        functions = catalog.function_definitions().len(),
        video_addons = catalog.video_addon_definitions().len(),
        complimentary_items = catalog.complimentary_item_definitions().len(),
        "Reference catalog loaded and validated."
    );

    // 4. Initialize the booking database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema is up to date."))
        .inspect_err(|e| error!("Failed to create booking tables: {e}"))?;

    info!("studiobook is ready to take bookings.");
    Ok(())
}
