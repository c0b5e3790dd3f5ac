//! Booking entity - One submitted booking with its frozen pricing snapshot.
//!
//! The row carries the client/event columns, the tagged function selections
//! and the complete pricing breakdown as JSON, and the two status columns.
//! Everything except `booking_status` and `payment_status` is written once
//! at creation and never mutated; the breakdown stays as priced at
//! submission regardless of later catalog changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-shareable lookup token, unique across all bookings
    #[sea_orm(unique)]
    pub reference_code: String,
    /// Client full name
    pub client_name: String,
    /// Client phone number, the secondary lookup key
    pub client_phone: String,
    /// WhatsApp number if provided
    pub client_whatsapp: Option<String>,
    /// Email address if provided
    pub client_email: Option<String>,
    /// Home address if provided
    pub client_home_address: Option<String>,
    /// Current location if provided
    pub client_current_location: Option<String>,
    /// Which side is booking (bride side, groom side, corporate, ...)
    pub booking_type: String,
    /// Venue or city if provided
    pub event_location: Option<String>,
    /// Primary event date
    pub event_date: Date,
    /// Expected guest count range if provided
    pub guest_count: Option<String>,
    /// Stated budget range if provided
    pub budget_range: Option<String>,
    /// Selected functions (main + additional, tagged), frozen as JSON
    pub functions: Json,
    /// Album variant slug: `"one-photobook"` or `"two-individual-photobooks"`
    pub album_type: String,
    /// Album page count
    pub album_pages: i32,
    /// Chosen video add-on ids, frozen as JSON
    pub video_addons: Json,
    /// Chosen complimentary item if any
    pub complimentary_item: Option<String>,
    /// Grand total in whole currency units
    pub total_price: i64,
    /// Advance due at booking
    pub advance_amount: i64,
    /// Balance due later; advance + balance == total
    pub balance_amount: i64,
    /// The complete pricing breakdown, frozen as JSON at submission
    pub pricing_breakdown: Json,
    /// Digital signature captured at submission
    pub digital_signature: String,
    /// Whether the terms were accepted (always true for stored rows)
    pub terms_accepted: bool,
    /// When the terms were accepted
    pub terms_accepted_at: DateTimeUtc,
    /// Booking lifecycle status, see [`BookingStatus`]
    pub booking_status: String,
    /// Payment progress status, see [`PaymentStatus`]
    pub payment_status: String,
    /// When the booking was created
    pub created_at: DateTimeUtc,
}

/// Bookings have no relations to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Submitted, awaiting studio confirmation
    Pending,
    /// Confirmed by the studio
    Confirmed,
    /// Event covered and delivered
    Completed,
    /// Cancelled by either side
    Cancelled,
}

impl BookingStatus {
    /// The stored text form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the stored text form back into a status.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Payment progress of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Nothing paid yet
    Unpaid,
    /// The advance has been received
    AdvancePaid,
    /// Paid in full
    FullyPaid,
    /// Payments returned after cancellation
    Refunded,
}

impl PaymentStatus {
    /// The stored text form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::AdvancePaid => "advance_paid",
            Self::FullyPaid => "fully_paid",
            Self::Refunded => "refunded",
        }
    }

    /// Parses the stored text form back into a status.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(Self::Unpaid),
            "advance_paid" => Some(Self::AdvancePaid),
            "fully_paid" => Some(Self::FullyPaid),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}
