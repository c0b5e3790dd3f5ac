//! Pricing engine - Computes the quote for a booking draft.
//!
//! [`compute_pricing`] is a pure function over the draft selections and a
//! reference catalog snapshot: no I/O, no clock, no randomness, the same
//! inputs always produce the same breakdown. All money is in whole currency
//! units, rounded half-up at the point each component is computed
//! (round-then-sum); already-rounded components are never re-rounded, so the
//! figures reproduce the printed quote sheets exactly.
//!
//! Missing catalog data never aborts a computation. A selection whose
//! function definition is gone prices at zero (with a warning); a chosen
//! add-on without a definition is dropped from the breakdown. The two
//! degrade policies are deliberately different.

use crate::config::catalog::{
    AlbumConfiguration, EventFunctionDefinition, PricingConfiguration, VideoAddonDefinition,
};
use crate::core::draft::{AlbumSelection, AlbumType, SelectedFunction};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Inputs behind one function pricing line, kept so a frozen breakdown is
/// self-explanatory without the catalog it was priced against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPricingDetails {
    /// Booked coverage hours
    pub duration: f64,
    /// Hours covered by the flat price
    pub included_hours: f64,
    /// Billable hours beyond the included baseline
    pub extra_hours: f64,
    /// Photographers assigned
    pub photographers: u32,
    /// Photographers covered by the flat price
    pub included_photographers: u32,
    /// Cinematographers assigned
    pub cinematographers: u32,
    /// Cinematographers covered by the flat price
    pub included_cinematographers: u32,
    /// Billable crew beyond the included baseline, role-agnostic
    pub extra_crew_count: u32,
}

/// Pricing line for one selected function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionPricing {
    /// Catalog definition id of the selection
    pub function_id: String,
    /// Display name copied from the selection
    pub function_name: String,
    /// Flat base price
    pub base_price: i64,
    /// Charge for hours beyond the included baseline
    pub extra_hours_cost: i64,
    /// Charge for crew beyond the included baseline
    pub extra_crew_cost: i64,
    /// Base + extra hours + extra crew
    pub total_function_cost: i64,
    /// Inputs this line was computed from
    pub details: FunctionPricingDetails,
}

/// Inputs behind the album pricing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumPricingDetails {
    /// Chosen page count
    pub pages: u32,
    /// Pages covered by the base price
    pub base_pages: u32,
    /// Billable pages beyond the base
    pub extra_pages: u32,
    /// Chosen album variant
    pub album_type: AlbumType,
    /// Multiplier applied to base + extra
    pub multiplier: f64,
}

/// Pricing line for the album selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumPricing {
    /// Base price of a single album at the base page count
    pub base_price: i64,
    /// Charge for pages beyond the base
    pub extra_pages_cost: i64,
    /// Rounded (base + extra) x multiplier
    pub total_album_cost: i64,
    /// Inputs this line was computed from
    pub details: AlbumPricingDetails,
}

/// Pricing line for one chosen video add-on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonPricing {
    /// Add-on definition id
    pub id: String,
    /// Display label from the definition
    pub label: String,
    /// Price from the definition
    pub price: i64,
}

/// The complete priced snapshot of a draft.
///
/// Immutable once produced; at submission it is frozen into the booking
/// record independent of later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// One line per selected function, main and additional pooled in
    /// canonical order
    pub functions: Vec<FunctionPricing>,
    /// The album line
    pub album: AlbumPricing,
    /// One line per chosen add-on with a catalog definition
    pub video_addons: Vec<AddonPricing>,
    /// Functions + album + add-ons
    pub subtotal: i64,
    /// Tax on the subtotal
    pub tax: i64,
    /// Subtotal + tax
    pub total: i64,
    /// Share of the total due at booking
    pub advance: i64,
    /// Total minus advance; advance + balance == total exactly
    pub balance: i64,
}

/// Rounds to the nearest whole currency unit, exact halves up.
///
/// Inputs are non-negative by construction (every subtraction upstream is
/// clamped at zero).
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Applies a percentage to a whole-unit amount and rounds.
#[allow(clippy::cast_precision_loss)]
fn percent_of(amount: i64, percentage: f64) -> i64 {
    round_half_up(amount as f64 * percentage / 100.0)
}

/// Computes the full pricing breakdown for a draft's selections.
///
/// Pure and deterministic. Never fails: missing catalog entries degrade the
/// affected line as described in the module docs, and negative derived
/// quantities cannot occur because every subtraction is clamped at zero.
/// Negative or non-finite inputs are rejected by the draft's validation
/// layer before they can reach this function.
#[must_use]
pub fn compute_pricing(
    functions: &[SelectedFunction],
    album: &AlbumSelection,
    video_addon_ids: &[String],
    function_definitions: &[EventFunctionDefinition],
    album_configuration: &AlbumConfiguration,
    pricing_configuration: &PricingConfiguration,
    addon_definitions: &[VideoAddonDefinition],
) -> PricingBreakdown {
    let function_lines: Vec<FunctionPricing> = functions
        .iter()
        .map(|selection| price_function(selection, function_definitions, pricing_configuration))
        .collect();

    let album_line = price_album(album, album_configuration);
    let addon_lines = price_video_addons(video_addon_ids, addon_definitions);

    let functions_total: i64 = function_lines
        .iter()
        .map(|line| line.total_function_cost)
        .sum();
    let video_addons_total: i64 = addon_lines.iter().map(|line| line.price).sum();

    let subtotal = functions_total + album_line.total_album_cost + video_addons_total;
    let tax = percent_of(subtotal, pricing_configuration.tax_percentage);
    let total = subtotal + tax;
    let advance = percent_of(total, pricing_configuration.advance_percentage);
    let balance = total - advance;

    PricingBreakdown {
        functions: function_lines,
        album: album_line,
        video_addons: addon_lines,
        subtotal,
        tax,
        total,
        advance,
        balance,
    }
}

/// Prices one selected function against its catalog definition.
///
/// A selection whose definition is missing prices at zero rather than
/// failing the whole computation; the gap is surfaced in the log.
#[allow(clippy::cast_precision_loss)]
fn price_function(
    selection: &SelectedFunction,
    definitions: &[EventFunctionDefinition],
    pricing: &PricingConfiguration,
) -> FunctionPricing {
    let Some(definition) = definitions.iter().find(|d| d.id == selection.function_id) else {
        warn!(
            function_id = %selection.function_id,
            "no catalog definition for selected function, pricing line at zero"
        );
        return FunctionPricing {
            function_id: selection.function_id.clone(),
            function_name: selection.name.clone(),
            base_price: 0,
            extra_hours_cost: 0,
            extra_crew_cost: 0,
            total_function_cost: 0,
            details: FunctionPricingDetails {
                duration: selection.duration,
                included_hours: 0.0,
                extra_hours: 0.0,
                photographers: selection.photographers,
                included_photographers: 0,
                cinematographers: selection.cinematographers,
                included_cinematographers: 0,
                extra_crew_count: 0,
            },
        };
    };

    let extra_hours = (selection.duration - definition.included_hours).max(0.0);
    let extra_hours_cost = round_half_up(extra_hours * definition.extra_hour_rate as f64);

    // One flat fee per extra head, whichever role it is
    let extra_photographers = selection
        .photographers
        .saturating_sub(definition.included_photographers);
    let extra_cinematographers = selection
        .cinematographers
        .saturating_sub(definition.included_cinematographers);
    let extra_crew_count = extra_photographers + extra_cinematographers;
    let extra_crew_cost = i64::from(extra_crew_count) * pricing.extra_crew_flat_fee;

    let total_function_cost = definition.flat_price + extra_hours_cost + extra_crew_cost;

    FunctionPricing {
        function_id: selection.function_id.clone(),
        function_name: selection.name.clone(),
        base_price: definition.flat_price,
        extra_hours_cost,
        extra_crew_cost,
        total_function_cost,
        details: FunctionPricingDetails {
            duration: selection.duration,
            included_hours: definition.included_hours,
            extra_hours,
            photographers: selection.photographers,
            included_photographers: definition.included_photographers,
            cinematographers: selection.cinematographers,
            included_cinematographers: definition.included_cinematographers,
            extra_crew_count,
        },
    }
}

/// Prices the album selection.
///
/// The double-album multiplier applies to the sum of base and extra pages,
/// not to the base alone.
#[allow(clippy::cast_precision_loss)]
fn price_album(selection: &AlbumSelection, configuration: &AlbumConfiguration) -> AlbumPricing {
    let extra_pages = selection.pages.saturating_sub(configuration.base_pages);
    let extra_pages_cost = round_half_up(
        f64::from(extra_pages) / f64::from(configuration.pages_increment)
            * configuration.per_10_pages_cost as f64,
    );

    let multiplier = match selection.album_type {
        AlbumType::TwoIndividual => configuration.double_album_multiplier,
        AlbumType::Single => 1.0,
    };
    let total_album_cost =
        round_half_up((configuration.base_price_single + extra_pages_cost) as f64 * multiplier);

    AlbumPricing {
        base_price: configuration.base_price_single,
        extra_pages_cost,
        total_album_cost,
        details: AlbumPricingDetails {
            pages: selection.pages,
            base_pages: configuration.base_pages,
            extra_pages,
            album_type: selection.album_type,
            multiplier,
        },
    }
}

/// Prices the chosen video add-ons, in selection order.
///
/// An id without a catalog definition is omitted from the result (unlike
/// functions, which degrade to a zero line).
fn price_video_addons(
    ids: &[String],
    definitions: &[VideoAddonDefinition],
) -> Vec<AddonPricing> {
    ids.iter()
        .filter_map(|id| {
            definitions
                .iter()
                .find(|definition| &definition.id == id)
                .map(|definition| AddonPricing {
                    id: definition.id.clone(),
                    label: definition.label.clone(),
                    price: definition.price,
                })
        })
        .collect()
}
