//! Unified error types for `studiobook`.
//!
//! All fallible operations in the crate return [`Result`]. Validation
//! failures carry the offending value so callers can report them without
//! re-deriving context.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failure (catalog file, env)
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (catalog file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// JSON serialization error when freezing booking data
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Integer conversion error
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// A function duration that is negative or non-finite
    #[error("Invalid duration: {hours} hours")]
    InvalidDuration {
        /// The rejected duration value
        hours: f64,
    },

    /// An album page count off the configured grid
    #[error(
        "Invalid album page count {pages}: must be {base_pages} plus a multiple of {increment}"
    )]
    InvalidPageCount {
        /// The rejected page count
        pages: u32,
        /// Minimum page count from the album configuration
        base_pages: u32,
        /// Allowed adjustment step from the album configuration
        increment: u32,
    },

    /// A draft function selection id that does not exist
    #[error("Selected function not found: {id}")]
    FunctionSelectionNotFound {
        /// The unknown selection id
        id: String,
    },

    /// Mutation attempted on a draft that has already been submitted
    #[error("Booking draft has already been submitted")]
    DraftSubmitted,

    /// A required submission field that is missing or empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Submission without accepted terms
    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    /// Lookup for a booking that does not exist
    #[error("Booking not found: {reference}")]
    BookingNotFound {
        /// The reference code or id that failed to resolve
        reference: String,
    },

    /// Reference code generation kept colliding with stored bookings
    #[error("Could not generate a unique booking reference after {attempts} attempts")]
    ReferenceCodeCollision {
        /// Number of generation attempts made
        attempts: u32,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
