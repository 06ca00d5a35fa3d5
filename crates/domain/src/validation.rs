// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking validation.
//!
//! Field-level rules (missing connection data) produce a [`ValidationReport`]
//! and never fail. Shape rules (subject, newsroom, start instant, duration)
//! are checked separately by [`validate_shape`] and stop at the first problem.
//!
//! Everything here is derived from the draft alone so the same checks can run
//! on every edit and again before persistence.

use crate::appearance::AppearanceType;
use crate::connection::{ConnectionDetails, non_empty};
use crate::error::ShapeViolation;
use crate::selectors::DerivedFlags;
use crate::types::BookingDraft;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Minimum trimmed length of the subject and newsroom name.
pub const MIN_TEXT_LENGTH: usize = 2;
/// Shortest accepted booking, in minutes.
pub const MIN_DURATION_MINUTES: i64 = 5;
/// Longest accepted booking, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 600;

/// Booking-level fields that field validation can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    /// Default venue name.
    LocationName,
    /// Default venue address.
    LocationAddress,
}

/// Guest-level fields that field validation can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestField {
    /// Join link.
    JoinUrl,
    /// Venue name.
    VenueName,
    /// Venue address.
    VenueAddress,
    /// Dial string.
    DialInfo,
}

/// The requirement a violation reports as unmet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// A join link is needed.
    JoinUrl,
    /// A venue name or a venue address is needed.
    VenueNameOrAddress,
    /// A dial string is needed.
    DialInfo,
}

impl Requirement {
    /// The requirement for connecting with `kind`.
    #[must_use]
    pub const fn for_kind(kind: AppearanceType) -> Self {
        match kind {
            AppearanceType::Online => Self::JoinUrl,
            AppearanceType::InPerson => Self::VenueNameOrAddress,
            AppearanceType::Phone => Self::DialInfo,
        }
    }

    /// Short human-readable label used in the summary.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::JoinUrl => "join URL",
            Self::VenueNameOrAddress => "venue name or address",
            Self::DialInfo => "dial-in info",
        }
    }

    /// The guest fields that satisfy this requirement.
    #[must_use]
    pub const fn guest_fields(&self) -> &'static [GuestField] {
        match self {
            Self::JoinUrl => &[GuestField::JoinUrl],
            Self::VenueNameOrAddress => &[GuestField::VenueName, GuestField::VenueAddress],
            Self::DialInfo => &[GuestField::DialInfo],
        }
    }
}

/// A booking-level field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingViolation {
    /// The flagged field.
    pub field: BookingField,
    /// What is missing.
    pub requirement: Requirement,
}

/// A guest-level field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestViolation {
    /// The flagged field.
    pub field: GuestField,
    /// What is missing.
    pub requirement: Requirement,
}

/// All violations for one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestErrors {
    /// Roster position of the guest.
    pub index: usize,
    /// Directory id of the guest.
    pub person_id: String,
    /// Violations in requirement order.
    pub violations: Vec<GuestViolation>,
}

/// The outcome of field validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Booking-level violations.
    pub booking_errors: Vec<BookingViolation>,
    /// Guests with at least one violation, in roster order.
    pub guest_errors: Vec<GuestErrors>,
    /// One-line summary. `None` when the draft is valid.
    pub summary: Option<String>,
}

impl ValidationReport {
    /// Returns `true` when nothing blocks saving.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.booking_errors.is_empty() && self.guest_errors.is_empty()
    }

    /// Returns whether `field` is flagged at the booking level.
    #[must_use]
    pub fn has_booking_error(&self, field: BookingField) -> bool {
        self.booking_errors.iter().any(|v| v.field == field)
    }

    /// Returns whether `field` is flagged for the guest at `index`.
    #[must_use]
    pub fn has_guest_error(&self, index: usize, field: GuestField) -> bool {
        self.guest_errors
            .iter()
            .filter(|g| g.index == index)
            .flat_map(|g| g.violations.iter())
            .any(|v| v.field == field)
    }

    /// Total number of flagged fields.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.booking_errors.len()
            + self
                .guest_errors
                .iter()
                .map(|g| g.violations.len())
                .sum::<usize>()
    }
}

/// Computes every field-level violation for `draft`.
///
/// Rules:
/// - A shared, unified, in-person booking needs a default venue name or
///   address. Both fields are flagged; filling either clears both.
/// - With per-guest provisioning, each guest needs the fields for its
///   effective appearance type: the booking's type under a unified scope,
///   the guest's own type under a per-guest scope.
#[must_use]
pub fn validate(draft: &BookingDraft) -> ValidationReport {
    let flags: DerivedFlags = DerivedFlags::of(draft);

    let mut booking_errors: Vec<BookingViolation> = Vec::new();
    if flags.requires_default_venue
        && non_empty(draft.location_name.as_deref()).is_none()
        && non_empty(draft.location_address.as_deref()).is_none()
    {
        for field in [BookingField::LocationName, BookingField::LocationAddress] {
            booking_errors.push(BookingViolation {
                field,
                requirement: Requirement::VenueNameOrAddress,
            });
        }
    }

    let mut guest_errors: Vec<GuestErrors> = Vec::new();
    if flags.per_guest_provisioning {
        for (index, guest) in draft.guests.iter().enumerate() {
            let kind: AppearanceType = flags.effective_kind(draft, guest);
            let violations: Vec<GuestViolation> = guest_violations(&guest.connection, kind);
            if !violations.is_empty() {
                guest_errors.push(GuestErrors {
                    index,
                    person_id: guest.person.id.clone(),
                    violations,
                });
            }
        }
    }

    let summary: Option<String> = summarize(&booking_errors, &guest_errors);

    ValidationReport {
        booking_errors,
        guest_errors,
        summary,
    }
}

fn guest_violations(connection: &ConnectionDetails, kind: AppearanceType) -> Vec<GuestViolation> {
    if connection.satisfies(kind) {
        return Vec::new();
    }

    let requirement: Requirement = Requirement::for_kind(kind);
    requirement
        .guest_fields()
        .iter()
        .map(|&field| GuestViolation { field, requirement })
        .collect()
}

/// Builds the one-line summary, booking section first, then guests in order.
fn summarize(booking_errors: &[BookingViolation], guest_errors: &[GuestErrors]) -> Option<String> {
    let mut sections: Vec<String> = Vec::new();

    if let Some(first) = booking_errors.first() {
        sections.push(format!("Booking defaults ({})", first.requirement.label()));
    }

    for guest in guest_errors {
        if let Some(first) = guest.violations.first() {
            sections.push(format!(
                "Guest #{} ({})",
                guest.index + 1,
                first.requirement.label()
            ));
        }
    }

    if sections.is_empty() {
        return None;
    }

    let noun: &str = if sections.len() == 1 { "item" } else { "items" };
    Some(format!(
        "Fix {} {noun}: {}.",
        sections.len(),
        sections.join("; ")
    ))
}

/// Checks the primitive fields of `draft`.
///
/// # Errors
///
/// Returns the first shape violation found.
pub fn validate_shape(draft: &BookingDraft) -> Result<(), ShapeViolation> {
    validate_booking_shape(
        &draft.subject,
        &draft.newsroom_name,
        &draft.start_at,
        draft.duration_minutes,
    )
}

/// Checks the primitive booking fields.
///
/// Used by the editor before submit and again by the persistence layer,
/// which does not trust the editor.
///
/// # Errors
///
/// Returns an error if:
/// - The subject or newsroom name is shorter than [`MIN_TEXT_LENGTH`] once trimmed
/// - The start instant is not an RFC 3339 timestamp
/// - The duration is outside [`MIN_DURATION_MINUTES`]..=[`MAX_DURATION_MINUTES`]
pub fn validate_booking_shape(
    subject: &str,
    newsroom_name: &str,
    start_at: &str,
    duration_minutes: i64,
) -> Result<(), ShapeViolation> {
    if subject.trim().chars().count() < MIN_TEXT_LENGTH {
        return Err(ShapeViolation::SubjectTooShort {
            min: MIN_TEXT_LENGTH,
        });
    }

    if newsroom_name.trim().chars().count() < MIN_TEXT_LENGTH {
        return Err(ShapeViolation::NewsroomNameTooShort {
            min: MIN_TEXT_LENGTH,
        });
    }

    parse_start_instant(start_at)?;

    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
        return Err(ShapeViolation::DurationOutOfRange {
            minutes: duration_minutes,
            min: MIN_DURATION_MINUTES,
            max: MAX_DURATION_MINUTES,
        });
    }

    Ok(())
}

/// Parses a start instant.
///
/// # Errors
///
/// Returns an error if `value` is not an RFC 3339 timestamp.
pub fn parse_start_instant(value: &str) -> Result<OffsetDateTime, ShapeViolation> {
    OffsetDateTime::parse(value.trim(), &Rfc3339).map_err(|e| {
        ShapeViolation::InvalidStartInstant {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}
