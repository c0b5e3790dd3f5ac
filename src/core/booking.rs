//! Booking record store - Persists submitted drafts and their frozen quotes.
//!
//! A booking row is created exactly once, at submission, from a priced
//! draft. After that the only permitted mutations are the status-transition
//! operations; the pricing snapshot is never touched again. Records are
//! retrievable by reference code (the token shared with the client) or by
//! the client's phone number.

use crate::core::draft::BookingDraft;
use crate::entities::{Booking, BookingStatus, PaymentStatus, booking};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{info, warn};
use uuid::Uuid;

const REFERENCE_PREFIX: &str = "BK";
const REFERENCE_MINT_ATTEMPTS: u32 = 5;

/// Mints a candidate reference code: `BK-` plus eight uppercase hex chars.
///
/// URL-safe and short enough to read over the phone. Uniqueness is enforced
/// against the store by [`unique_reference_code`], not assumed here.
fn mint_reference_code() -> String {
    let token = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{REFERENCE_PREFIX}-{}", &token[..8])
}

async fn unique_reference_code(db: &DatabaseConnection) -> Result<String> {
    for _ in 0..REFERENCE_MINT_ATTEMPTS {
        let code = mint_reference_code();
        let taken = Booking::find()
            .filter(booking::Column::ReferenceCode.eq(&code))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(code);
        }
        warn!(code = %code, "reference code collision, re-minting");
    }
    Err(Error::ReferenceCodeCollision {
        attempts: REFERENCE_MINT_ATTEMPTS,
    })
}

/// Maps an empty or whitespace-only form value to NULL.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Creates a booking record from a priced draft.
///
/// Validates the submission requirements, generates a unique reference
/// code, freezes the function selections and the pricing breakdown to JSON,
/// and inserts the row as `pending`/`unpaid`. The draft itself is not
/// consumed; the caller marks it submitted and discards it.
///
/// # Errors
/// Returns the draft's validation error if a requirement is unmet (see
/// [`BookingDraft::validate_for_submission`]), `Error::Database` on insert
/// failure, or `Error::ReferenceCodeCollision` if code generation kept
/// colliding.
pub async fn create_booking(
    db: &DatabaseConnection,
    draft: &BookingDraft,
    digital_signature: &str,
    terms_accepted: bool,
) -> Result<booking::Model> {
    draft.validate_for_submission(digital_signature, terms_accepted)?;

    // Both are guaranteed by the validation above
    let breakdown = draft.pricing().ok_or(Error::MissingField {
        field: "pricing_breakdown",
    })?;
    let event_date = draft
        .event_details()
        .event_date
        .ok_or(Error::MissingField { field: "event_date" })?;

    let reference_code = unique_reference_code(db).await?;
    let client = draft.client_info();
    let details = draft.event_details();
    let now = chrono::Utc::now();

    let record = booking::ActiveModel {
        reference_code: Set(reference_code),
        client_name: Set(client.full_name.trim().to_string()),
        client_phone: Set(client.phone.trim().to_string()),
        client_whatsapp: Set(optional(&client.whatsapp)),
        client_email: Set(optional(&client.email)),
        client_home_address: Set(optional(&client.home_address)),
        client_current_location: Set(optional(&client.current_location)),
        booking_type: Set(details.booking_type.clone()),
        event_location: Set(optional(&details.event_location)),
        event_date: Set(event_date),
        guest_count: Set(optional(&details.guest_count)),
        budget_range: Set(optional(&details.budget_range)),
        functions: Set(serde_json::to_value(draft.functions())?),
        album_type: Set(draft.album().album_type.as_str().to_string()),
        album_pages: Set(i32::try_from(draft.album().pages)?),
        video_addons: Set(serde_json::to_value(draft.video_addons())?),
        complimentary_item: Set(draft.complimentary_item().map(ToString::to_string)),
        total_price: Set(breakdown.total),
        advance_amount: Set(breakdown.advance),
        balance_amount: Set(breakdown.balance),
        pricing_breakdown: Set(serde_json::to_value(breakdown)?),
        digital_signature: Set(digital_signature.trim().to_string()),
        terms_accepted: Set(true),
        terms_accepted_at: Set(now),
        booking_status: Set(BookingStatus::Pending.as_str().to_string()),
        payment_status: Set(PaymentStatus::Unpaid.as_str().to_string()),
        created_at: Set(now),
        ..Default::default()
    };

    let result = record.insert(db).await?;
    info!(
        reference = %result.reference_code,
        total = result.total_price,
        "booking created"
    );
    Ok(result)
}

/// Finds a booking by its reference code, returning None if unknown.
pub async fn get_booking_by_reference(
    db: &DatabaseConnection,
    reference_code: &str,
) -> Result<Option<booking::Model>> {
    Booking::find()
        .filter(booking::Column::ReferenceCode.eq(reference_code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a booking by its primary key.
pub async fn get_booking_by_id(
    db: &DatabaseConnection,
    booking_id: i64,
) -> Result<Option<booking::Model>> {
    Booking::find_by_id(booking_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All bookings made under a phone number, newest first.
pub async fn get_bookings_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<Vec<booking::Model>> {
    Booking::find()
        .filter(booking::Column::ClientPhone.eq(phone))
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The most recently created bookings, for the studio dashboard.
pub async fn list_recent_bookings(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<booking::Model>> {
    Booking::find()
        .order_by_desc(booking::Column::CreatedAt)
        .order_by_desc(booking::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Bookings whose event date falls inside the given inclusive range,
/// soonest first.
pub async fn get_bookings_by_date_range(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<booking::Model>> {
    Booking::find()
        .filter(booking::Column::EventDate.gte(start))
        .filter(booking::Column::EventDate.lte(end))
        .order_by_asc(booking::Column::EventDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the lifecycle status of a booking, returning the updated row.
///
/// # Errors
/// Returns `Error::BookingNotFound` for an unknown id.
pub async fn update_booking_status(
    db: &DatabaseConnection,
    booking_id: i64,
    status: BookingStatus,
) -> Result<booking::Model> {
    let record = get_booking_by_id(db, booking_id)
        .await?
        .ok_or_else(|| Error::BookingNotFound {
            reference: booking_id.to_string(),
        })?;

    let mut active: booking::ActiveModel = record.into();
    active.booking_status = Set(status.as_str().to_string());
    active.update(db).await.map_err(Into::into)
}

/// Sets the payment status of a booking, returning the updated row.
///
/// # Errors
/// Returns `Error::BookingNotFound` for an unknown id.
pub async fn update_payment_status(
    db: &DatabaseConnection,
    booking_id: i64,
    status: PaymentStatus,
) -> Result<booking::Model> {
    let record = get_booking_by_id(db, booking_id)
        .await?
        .ok_or_else(|| Error::BookingNotFound {
            reference: booking_id.to_string(),
        })?;

    let mut active: booking::ActiveModel = record.into();
    active.payment_status = Set(status.as_str().to_string());
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::pricing::PricingBreakdown;
    use crate::test_utils::*;

    #[test]
    fn test_reference_code_shape() {
        let code = mint_reference_code();
        assert_eq!(code.len(), 11);
        assert!(code.starts_with("BK-"));
        assert!(
            code[3..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        // Freshly minted codes differ
        assert_ne!(code, mint_reference_code());
    }

    #[tokio::test]
    async fn test_create_booking_persists_draft_and_snapshot() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();
        let draft = priced_draft(&catalog);

        let record = create_booking(&db, &draft, "Asha Rao", true).await?;

        assert_eq!(record.client_name, "Asha Rao");
        assert_eq!(record.client_phone, "9000000001");
        assert_eq!(record.booking_type, "Bride Side");
        assert_eq!(record.album_type, "one-photobook");
        assert_eq!(record.album_pages, 60);
        assert_eq!(record.booking_status, "pending");
        assert_eq!(record.payment_status, "unpaid");
        assert!(record.terms_accepted);

        // Empty optional form fields land as NULL, not as empty strings
        assert_eq!(record.client_email, None);
        assert_eq!(record.guest_count, None);

        // Money columns mirror the attached breakdown
        let breakdown = draft.pricing().unwrap();
        assert_eq!(record.total_price, breakdown.total);
        assert_eq!(record.advance_amount, breakdown.advance);
        assert_eq!(record.balance_amount, breakdown.balance);

        // The frozen snapshot round-trips byte-for-byte
        let frozen: PricingBreakdown = serde_json::from_value(record.pricing_breakdown.clone())?;
        assert_eq!(&frozen, breakdown);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_booking_requires_valid_submission() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();
        let draft = priced_draft(&catalog);

        assert!(matches!(
            create_booking(&db, &draft, "Asha Rao", false)
                .await
                .unwrap_err(),
            Error::TermsNotAccepted
        ));
        assert!(matches!(
            create_booking(&db, &draft, "  ", true).await.unwrap_err(),
            Error::MissingField {
                field: "digital_signature"
            }
        ));

        // An unpriced draft cannot be submitted
        let unpriced = BookingDraft::new(catalog.album_configuration());
        assert!(create_booking(&db, &unpriced, "sig", true).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_booking_by_reference() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();
        let created = create_test_booking(&db, &catalog).await?;

        let found = get_booking_by_reference(&db, &created.reference_code).await?;
        assert_eq!(found, Some(created));

        let not_found = get_booking_by_reference(&db, "BK-00000000").await?;
        assert!(not_found.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_bookings_by_phone_newest_first() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();

        let first = create_test_booking(&db, &catalog).await?;
        let second = create_test_booking(&db, &catalog).await?;

        let bookings = get_bookings_by_phone(&db, "9000000001").await?;
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, second.id);
        assert_eq!(bookings[1].id, first.id);

        // Each booking got its own reference code
        assert_ne!(first.reference_code, second.reference_code);

        let none = get_bookings_by_phone(&db, "0000000000").await?;
        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_recent_bookings_applies_limit() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();

        for _ in 0..3 {
            create_test_booking(&db, &catalog).await?;
        }

        let recent = list_recent_bookings(&db, 2).await?;
        assert_eq!(recent.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_bookings_by_date_range() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();
        let created = create_test_booking(&db, &catalog).await?;

        let start = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 11, 30).unwrap();
        let in_november = get_bookings_by_date_range(&db, start, end).await?;
        assert_eq!(in_november.len(), 1);
        assert_eq!(in_november[0].id, created.id);

        let december = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        let year_end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let in_december = get_bookings_by_date_range(&db, december, year_end).await?;
        assert!(in_december.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_status_transitions() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let catalog = sample_catalog();
        let created = create_test_booking(&db, &catalog).await?;

        let confirmed = update_booking_status(&db, created.id, BookingStatus::Confirmed).await?;
        assert_eq!(confirmed.booking_status, "confirmed");
        // Status transitions never touch the frozen snapshot
        assert_eq!(confirmed.pricing_breakdown, created.pricing_breakdown);
        assert_eq!(confirmed.total_price, created.total_price);

        let paid = update_payment_status(&db, created.id, PaymentStatus::AdvancePaid).await?;
        assert_eq!(paid.payment_status, "advance_paid");
        assert_eq!(paid.booking_status, "confirmed");

        assert!(matches!(
            update_booking_status(&db, 9999, BookingStatus::Cancelled)
                .await
                .unwrap_err(),
            Error::BookingNotFound { .. }
        ));

        Ok(())
    }
}
