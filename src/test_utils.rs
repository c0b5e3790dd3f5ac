//! Shared test utilities for `studiobook`.
//!
//! This module provides common helper functions for setting up test
//! databases and building test catalogs and drafts with sensible defaults.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::config::catalog::Catalog;
use crate::core::draft::{BookingDraft, ClientInfo, EventDetails, FunctionGroup};
use crate::entities;
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A small but complete catalog matching the figures used throughout the
/// test suite: a wedding (8h / 20000 / 2+2 crew / 1000 per extra hour), a
/// haldi (3h / 6000 / 1+1 crew / 801 per extra hour), a 60-page album at
/// 8000 with 500 per 10 extra pages and a 1.8 double-album multiplier,
/// an 8000 extra-crew fee, 18% tax and a 30% advance.
pub fn sample_catalog() -> Catalog {
    let catalog: Catalog = toml::from_str(
        r#"
        [[functions]]
        id = "wedding"
        label = "Wedding"
        category = "main"
        included_hours = 8.0
        flat_price = 20000
        included_photographers = 2
        included_cinematographers = 2
        extra_hour_rate = 1000

        [[functions]]
        id = "haldi"
        label = "Haldi"
        category = "additional"
        included_hours = 3.0
        flat_price = 6000
        included_photographers = 1
        included_cinematographers = 1
        extra_hour_rate = 801

        [album]
        base_pages = 60
        base_price_single = 8000
        per_10_pages_cost = 500
        double_album_multiplier = 1.8
        pages_increment = 10

        [pricing]
        extra_crew_flat_fee = 8000
        tax_percentage = 18.0
        advance_percentage = 30.0

        [[video_addons]]
        id = "highlight-video"
        label = "Highlight Video"
        description = "3-5 minute cinematic highlight reel"
        price = 5000

        [[video_addons]]
        id = "drone-coverage"
        label = "Drone Coverage"
        description = "Aerial photography and videography"
        price = 12000

        [[video_addons]]
        id = "same-day-edit"
        label = "Same Day Edit"
        description = "Quick edit delivered during the event"
        price = 15000

        [[complimentary_items]]
        id = "table-top-calendar"
        label = "Table Top Calendar"
        description = "12-month desk calendar"
        "#,
    )
    .expect("sample catalog parses");
    catalog.validate().expect("sample catalog is valid");
    catalog
}

/// Builds a draft that satisfies every submission requirement: client name
/// and phone set, booking type and event date set, one wedding selected,
/// and a pricing breakdown attached.
pub fn priced_draft(catalog: &Catalog) -> BookingDraft {
    let mut draft = BookingDraft::new(catalog.album_configuration());

    draft
        .update_client_info(ClientInfo {
            full_name: "Asha Rao".to_string(),
            phone: "9000000001".to_string(),
            ..ClientInfo::default()
        })
        .unwrap();
    draft
        .update_event_details(EventDetails {
            booking_type: "Bride Side".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 20),
            ..EventDetails::default()
        })
        .unwrap();

    let wedding = catalog.function_definitions()[0].clone();
    draft.add_function(&wedding, FunctionGroup::Main).unwrap();
    draft.reprice(catalog).unwrap();

    draft
}

/// Creates and persists a booking from a [`priced_draft`].
pub async fn create_test_booking(
    db: &DatabaseConnection,
    catalog: &Catalog,
) -> Result<entities::booking::Model> {
    let draft = priced_draft(catalog);
    crate::core::booking::create_booking(db, &draft, "Asha Rao", true).await
}
