//! Booking draft state - The accumulating selection state for one booking.
//!
//! A [`BookingDraft`] is owned by a single wizard session and mutated through
//! field-level update operations as the client walks the steps. The wizard
//! stage only ratchets forward; revisiting an earlier step never clears data
//! entered for a later one. Any mutation of a pricing input (functions,
//! album, add-ons) drops the attached breakdown so callers cannot display a
//! stale price. Once submitted the draft is frozen and every mutation fails.

use crate::config::catalog::{AlbumConfiguration, Catalog, EventFunctionDefinition};
use crate::core::pricing::{self, PricingBreakdown};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client contact details collected in the first wizard step.
///
/// Empty strings mean "not provided"; only name and phone are required at
/// submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Full name of the client
    pub full_name: String,
    /// Primary phone number, also the lookup key for stored bookings
    pub phone: String,
    /// WhatsApp number if different from the phone number
    pub whatsapp: String,
    /// Email address
    pub email: String,
    /// Home address
    pub home_address: String,
    /// Where the client currently lives
    pub current_location: String,
}

/// Event basics collected alongside the client details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDetails {
    /// Which side is booking (bride side, groom side, corporate, ...)
    pub booking_type: String,
    /// Venue or city of the event
    pub event_location: String,
    /// Primary event date
    pub event_date: Option<NaiveDate>,
    /// Expected guest count range
    pub guest_count: String,
    /// Stated budget range
    pub budget_range: String,
}

/// Default crew headcount and main-event timing used to prefill new
/// function selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewSelection {
    /// Default photographer headcount for new selections
    pub photographers: u32,
    /// Default cinematographer headcount for new selections
    pub cinematographers: u32,
    /// Main event start time
    pub main_event_start: NaiveTime,
    /// Main event end time
    pub main_event_end: NaiveTime,
}

impl Default for CrewSelection {
    fn default() -> Self {
        Self {
            photographers: 2,
            cinematographers: 2,
            main_event_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            main_event_end: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or_default(),
        }
    }
}

/// Display grouping of a selected function.
///
/// Main and additional functions are priced identically; the tag only
/// controls which wizard section a selection is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionGroup {
    /// Primary event functions (ceremony, reception)
    Main,
    /// Additional functions (pre/post-event rituals)
    Additional,
}

/// One function instance chosen by the client.
///
/// `id` is minted per selection so the same function type can be booked more
/// than once; `function_id` references the catalog definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFunction {
    /// Generated unique id of this selection
    pub id: String,
    /// Id of the catalog [`EventFunctionDefinition`] this selection refers to
    pub function_id: String,
    /// Display name, copied from the definition at selection time
    pub name: String,
    /// Wizard section this selection is shown under
    pub group: FunctionGroup,
    /// Scheduled date
    pub date: Option<NaiveDate>,
    /// Scheduled start time
    pub start_time: Option<NaiveTime>,
    /// Scheduled end time
    pub end_time: Option<NaiveTime>,
    /// Coverage duration in hours
    pub duration: f64,
    /// Photographer headcount assigned to this function
    pub photographers: u32,
    /// Cinematographer headcount assigned to this function
    pub cinematographers: u32,
}

/// Album variant chosen by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlbumType {
    /// One shared photo book
    #[default]
    #[serde(rename = "one-photobook")]
    Single,
    /// Two individual photo books (priced with the double-album multiplier)
    #[serde(rename = "two-individual-photobooks")]
    TwoIndividual,
}

impl AlbumType {
    /// The catalog slug for this variant, as stored in booking records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "one-photobook",
            Self::TwoIndividual => "two-individual-photobooks",
        }
    }
}

/// Album configuration chosen by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSelection {
    /// Total page count; always `base_pages + k * pages_increment`
    pub pages: u32,
    /// Chosen album variant
    pub album_type: AlbumType,
}

/// Wizard progress of a draft.
///
/// Stages only move forward; the data behind every stage stays editable
/// until `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DraftStage {
    /// Nothing entered yet
    Empty,
    /// Client or event details entered
    ClientInfoSet,
    /// At least one function selected
    FunctionsSelected,
    /// Album or add-ons configured
    Configured,
    /// A pricing breakdown has been computed
    Priced,
    /// Submitted and persisted; the draft is frozen
    Submitted,
}

/// The in-progress booking for one wizard session
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    client_info: ClientInfo,
    event_details: EventDetails,
    crew: CrewSelection,
    functions: Vec<SelectedFunction>,
    album: AlbumSelection,
    video_addons: Vec<String>,
    complimentary_item: Option<String>,
    pricing: Option<PricingBreakdown>,
    stage: DraftStage,
}

/// Computes the hour span between two times, wrapping past midnight.
///
/// Used to derive a selection's duration from its start/end times when the
/// client has not overridden it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

impl BookingDraft {
    /// Creates an empty draft with the album preset to the catalog baseline.
    #[must_use]
    pub fn new(album_configuration: &AlbumConfiguration) -> Self {
        Self {
            client_info: ClientInfo::default(),
            event_details: EventDetails::default(),
            crew: CrewSelection::default(),
            functions: Vec::new(),
            album: AlbumSelection {
                pages: album_configuration.base_pages,
                album_type: AlbumType::default(),
            },
            video_addons: Vec::new(),
            complimentary_item: None,
            pricing: None,
            stage: DraftStage::Empty,
        }
    }

    /// Current wizard stage.
    #[must_use]
    pub fn stage(&self) -> DraftStage {
        self.stage
    }

    /// Client contact details.
    #[must_use]
    pub fn client_info(&self) -> &ClientInfo {
        &self.client_info
    }

    /// Event basics.
    #[must_use]
    pub fn event_details(&self) -> &EventDetails {
        &self.event_details
    }

    /// Crew defaults used to prefill new selections.
    #[must_use]
    pub fn crew_selection(&self) -> &CrewSelection {
        &self.crew
    }

    /// All selected functions in canonical (insertion) order, main and
    /// additional pooled together.
    #[must_use]
    pub fn functions(&self) -> &[SelectedFunction] {
        &self.functions
    }

    /// Selected functions belonging to one display group, for the wizard
    /// summary cards.
    pub fn functions_in_group(
        &self,
        group: FunctionGroup,
    ) -> impl Iterator<Item = &SelectedFunction> {
        self.functions.iter().filter(move |f| f.group == group)
    }

    /// The album selection.
    #[must_use]
    pub fn album(&self) -> &AlbumSelection {
        &self.album
    }

    /// Chosen video add-on ids in selection order, duplicate-free.
    #[must_use]
    pub fn video_addons(&self) -> &[String] {
        &self.video_addons
    }

    /// Chosen complimentary item, if any.
    #[must_use]
    pub fn complimentary_item(&self) -> Option<&str> {
        self.complimentary_item.as_deref()
    }

    /// The breakdown attached by the last [`reprice`](Self::reprice), or
    /// `None` if a pricing input changed since.
    #[must_use]
    pub fn pricing(&self) -> Option<&PricingBreakdown> {
        self.pricing.as_ref()
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.stage == DraftStage::Submitted {
            return Err(Error::DraftSubmitted);
        }
        Ok(())
    }

    fn advance_stage(&mut self, at_least: DraftStage) {
        if self.stage < at_least {
            self.stage = at_least;
        }
    }

    /// Replaces the client contact details.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn update_client_info(&mut self, info: ClientInfo) -> Result<()> {
        self.ensure_mutable()?;
        self.client_info = info;
        self.advance_stage(DraftStage::ClientInfoSet);
        Ok(())
    }

    /// Replaces the event basics.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn update_event_details(&mut self, details: EventDetails) -> Result<()> {
        self.ensure_mutable()?;
        self.event_details = details;
        self.advance_stage(DraftStage::ClientInfoSet);
        Ok(())
    }

    /// Replaces the crew defaults used to prefill new selections.
    ///
    /// Already-added selections keep their own crew counts.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn update_crew_selection(&mut self, crew: CrewSelection) -> Result<()> {
        self.ensure_mutable()?;
        self.crew = crew;
        Ok(())
    }

    /// Adds a function selection prefilled from its catalog definition and
    /// the draft's crew defaults, returning the generated selection id.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn add_function(
        &mut self,
        definition: &EventFunctionDefinition,
        group: FunctionGroup,
    ) -> Result<String> {
        self.ensure_mutable()?;

        let id = Uuid::new_v4().to_string();
        self.functions.push(SelectedFunction {
            id: id.clone(),
            function_id: definition.id.clone(),
            name: definition.label.clone(),
            group,
            date: None,
            start_time: None,
            end_time: None,
            duration: definition.included_hours,
            photographers: self.crew.photographers,
            cinematographers: self.crew.cinematographers,
        });
        self.pricing = None;
        self.advance_stage(DraftStage::FunctionsSelected);
        Ok(id)
    }

    /// Updates the schedule of one selection.
    ///
    /// The duration is stored as given; use [`duration_between`] to derive it
    /// from the times when the client has not overridden it.
    ///
    /// # Errors
    /// Returns `Error::InvalidDuration` for a negative or non-finite
    /// duration, `Error::FunctionSelectionNotFound` for an unknown id, or
    /// `Error::DraftSubmitted` after submission.
    pub fn set_function_schedule(
        &mut self,
        selection_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration: f64,
    ) -> Result<()> {
        self.ensure_mutable()?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidDuration { hours: duration });
        }

        let function = self.function_mut(selection_id)?;
        function.date = Some(date);
        function.start_time = Some(start_time);
        function.end_time = Some(end_time);
        function.duration = duration;
        self.pricing = None;
        Ok(())
    }

    /// Updates the crew assigned to one selection.
    ///
    /// # Errors
    /// Returns `Error::FunctionSelectionNotFound` for an unknown id or
    /// `Error::DraftSubmitted` after submission.
    pub fn set_function_crew(
        &mut self,
        selection_id: &str,
        photographers: u32,
        cinematographers: u32,
    ) -> Result<()> {
        self.ensure_mutable()?;
        let function = self.function_mut(selection_id)?;
        function.photographers = photographers;
        function.cinematographers = cinematographers;
        self.pricing = None;
        Ok(())
    }

    /// Removes one selection (the client toggled the function off).
    ///
    /// # Errors
    /// Returns `Error::FunctionSelectionNotFound` for an unknown id or
    /// `Error::DraftSubmitted` after submission.
    pub fn remove_function(&mut self, selection_id: &str) -> Result<()> {
        self.ensure_mutable()?;
        let before = self.functions.len();
        self.functions.retain(|f| f.id != selection_id);
        if self.functions.len() == before {
            return Err(Error::FunctionSelectionNotFound {
                id: selection_id.to_string(),
            });
        }
        self.pricing = None;
        Ok(())
    }

    fn function_mut(&mut self, selection_id: &str) -> Result<&mut SelectedFunction> {
        self.functions
            .iter_mut()
            .find(|f| f.id == selection_id)
            .ok_or_else(|| Error::FunctionSelectionNotFound {
                id: selection_id.to_string(),
            })
    }

    /// Sets the album page count, enforcing the configured page grid.
    ///
    /// # Errors
    /// Returns `Error::InvalidPageCount` unless
    /// `pages = base_pages + k * pages_increment` for some `k >= 0`, or
    /// `Error::DraftSubmitted` after submission.
    pub fn set_album_pages(
        &mut self,
        pages: u32,
        configuration: &AlbumConfiguration,
    ) -> Result<()> {
        self.ensure_mutable()?;
        let off_grid = pages < configuration.base_pages
            || (pages - configuration.base_pages) % configuration.pages_increment != 0;
        if off_grid {
            return Err(Error::InvalidPageCount {
                pages,
                base_pages: configuration.base_pages,
                increment: configuration.pages_increment,
            });
        }
        self.album.pages = pages;
        self.pricing = None;
        self.advance_stage(DraftStage::Configured);
        Ok(())
    }

    /// Sets the album variant.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn set_album_type(&mut self, album_type: AlbumType) -> Result<()> {
        self.ensure_mutable()?;
        self.album.album_type = album_type;
        self.pricing = None;
        self.advance_stage(DraftStage::Configured);
        Ok(())
    }

    /// Toggles a video add-on; returns whether it is selected afterwards.
    ///
    /// Selection order is preserved and duplicates cannot occur.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn toggle_video_addon(&mut self, addon_id: &str) -> Result<bool> {
        self.ensure_mutable()?;
        let selected = if let Some(position) = self.video_addons.iter().position(|a| a == addon_id)
        {
            self.video_addons.remove(position);
            false
        } else {
            self.video_addons.push(addon_id.to_string());
            true
        };
        self.pricing = None;
        self.advance_stage(DraftStage::Configured);
        Ok(selected)
    }

    /// Sets or clears the complimentary item choice.
    ///
    /// Complimentary items are free and do not feed the pricing engine, so
    /// an attached breakdown stays valid.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn set_complimentary_item(&mut self, item: Option<String>) -> Result<()> {
        self.ensure_mutable()?;
        self.complimentary_item = item;
        self.advance_stage(DraftStage::Configured);
        Ok(())
    }

    /// Recomputes the pricing breakdown from the current selections and
    /// attaches it to the draft.
    ///
    /// Pricing is always a full recomputation from the draft snapshot, never
    /// an incremental update.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` after submission.
    pub fn reprice(&mut self, catalog: &Catalog) -> Result<&PricingBreakdown> {
        self.ensure_mutable()?;
        let breakdown = pricing::compute_pricing(
            &self.functions,
            &self.album,
            &self.video_addons,
            catalog.function_definitions(),
            catalog.album_configuration(),
            catalog.pricing_configuration(),
            catalog.video_addon_definitions(),
        );
        self.advance_stage(DraftStage::Priced);
        Ok(self.pricing.insert(breakdown))
    }

    /// Checks that everything required for submission is present.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for each unmet requirement in turn and
    /// `Error::TermsNotAccepted` when the terms checkbox is unset.
    pub fn validate_for_submission(&self, signature: &str, terms_accepted: bool) -> Result<()> {
        if self.client_info.full_name.trim().is_empty() {
            return Err(Error::MissingField {
                field: "client_name",
            });
        }
        if self.client_info.phone.trim().is_empty() {
            return Err(Error::MissingField {
                field: "client_phone",
            });
        }
        if self.event_details.booking_type.trim().is_empty() {
            return Err(Error::MissingField {
                field: "booking_type",
            });
        }
        if self.event_details.event_date.is_none() {
            return Err(Error::MissingField { field: "event_date" });
        }
        if self.functions.is_empty() {
            return Err(Error::MissingField {
                field: "selected_functions",
            });
        }
        if self.pricing.is_none() {
            return Err(Error::MissingField {
                field: "pricing_breakdown",
            });
        }
        if signature.trim().is_empty() {
            return Err(Error::MissingField {
                field: "digital_signature",
            });
        }
        if !terms_accepted {
            return Err(Error::TermsNotAccepted);
        }
        Ok(())
    }

    /// Freezes the draft after its booking record has been created.
    ///
    /// # Errors
    /// Returns `Error::DraftSubmitted` if already submitted.
    pub fn mark_submitted(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.stage = DraftStage::Submitted;
        Ok(())
    }
}
