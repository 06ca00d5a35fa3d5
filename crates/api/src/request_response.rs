// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use newsdesk::{CommandOutcome, SearchMode, TimeWindow};
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingDraft, DerivedFlags,
    EffectiveConnection, HostRef, PersonKind, PersonRef, ValidationReport,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ApiError;

/// Read-only view of a stored booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    /// Booking identifier.
    pub booking_id: String,
    /// The organization that owns the booking.
    pub organization_id: String,
    /// Booking subject.
    pub subject: String,
    /// Requesting newsroom.
    pub newsroom_name: String,
    /// Start instant.
    pub start_at: String,
    /// Duration in minutes.
    pub duration_minutes: i64,
    /// Appearance scope, with load defaults applied.
    pub appearance_scope: AppearanceScope,
    /// Access provisioning, with load defaults applied.
    pub access_provisioning: AccessProvisioning,
    /// Booking-level appearance type.
    pub appearance_type: AppearanceType,
    /// The booking-level default for `appearance_type`, if any.
    pub default_connection: Option<String>,
    /// Host, if any.
    pub host: Option<HostRef>,
    /// Program name.
    pub program_name: Option<String>,
    /// Talking points.
    pub talking_points: Option<String>,
    /// Guests in roster order.
    pub guests: Vec<GuestView>,
}

/// One guest in a [`BookingView`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuestView {
    /// Stored guest identifier.
    pub guest_id: Option<String>,
    /// The person appearing.
    pub person: PersonRef,
    /// Roster position.
    pub order: usize,
    /// What the guest joins with.
    pub connection: EffectiveConnection,
}

/// Everything a client needs to render an edit session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditorSnapshot {
    /// The edit session identifier.
    pub session_id: String,
    /// The booking being edited.
    pub booking_id: String,
    /// The current draft.
    pub draft: BookingDraft,
    /// Field violations for the current draft.
    pub report: ValidationReport,
    /// Derived flags for the current draft.
    pub flags: DerivedFlags,
    /// Effective connection per guest, in roster order.
    pub effective: Vec<EffectiveConnection>,
    /// Stored guest ids that will be deleted on save.
    pub deleted_guest_ids: Vec<String>,
    /// Whether a save is outstanding.
    pub submitting: bool,
    /// The message from the last failed save.
    pub last_error: Option<String>,
    /// Whether phone appearances can be selected.
    pub phone_enabled: bool,
}

/// API response for opening an edit session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenEditSessionResponse {
    /// The new session identifier.
    pub session_id: String,
    /// The initial state of the session.
    pub snapshot: EditorSnapshot,
}

/// API response for one applied edit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommandResponse {
    /// What the edit did.
    pub outcome: CommandOutcome,
    /// The session state after the edit.
    pub snapshot: EditorSnapshot,
}

/// API response for a successful save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitResponse {
    /// The stored booking.
    pub booking: BookingView,
    /// The session state, reloaded from the stored booking.
    pub snapshot: EditorSnapshot,
    /// A success message.
    pub message: String,
}

/// API request to search the guest directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectorySearchRequest {
    /// Name fragment to search for.
    #[serde(default)]
    pub term: String,
    /// Which part of the directory to search.
    #[serde(default)]
    pub mode: SearchMode,
    /// Window start as an RFC 3339 timestamp.
    #[serde(default)]
    pub from: Option<String>,
    /// Window end as an RFC 3339 timestamp.
    #[serde(default)]
    pub to: Option<String>,
    /// Edit session whose roster marks `already_added`.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl DirectorySearchRequest {
    /// Parses the optional time window.
    ///
    /// # Errors
    ///
    /// Returns an error if only one bound is given, a bound is not RFC 3339,
    /// or the window ends before it starts.
    pub fn window(&self) -> Result<Option<TimeWindow>, ApiError> {
        let (from, to) = match (self.from.as_deref(), self.to.as_deref()) {
            (None, None) => return Ok(None),
            (Some(from), Some(to)) => (from, to),
            (Some(_), None) => return Err(invalid_window("to", "Window end is required")),
            (None, Some(_)) => return Err(invalid_window("from", "Window start is required")),
        };

        let starts_at: OffsetDateTime = parse_bound("from", from)?;
        let ends_at: OffsetDateTime = parse_bound("to", to)?;
        if ends_at < starts_at {
            return Err(invalid_window("to", "Window ends before it starts"));
        }

        Ok(Some(TimeWindow { starts_at, ends_at }))
    }
}

fn parse_bound(field: &str, value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value.trim(), &Rfc3339)
        .map_err(|e| invalid_window(field, &format!("'{value}' is not an RFC 3339 time: {e}")))
}

fn invalid_window(field: &str, message: &str) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// One entry in the guest picker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectoryCandidate {
    /// Directory identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Expert or reporter.
    pub kind: PersonKind,
    /// Whether the person is already on the session's roster.
    pub already_added: bool,
}

impl DirectoryCandidate {
    /// Converts this candidate back into the reference an `add_guest` edit takes.
    #[must_use]
    pub fn person(&self) -> PersonRef {
        PersonRef::new(&self.id, &self.name, self.kind)
    }
}

/// API response for a guest directory search.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeopleSearchResponse {
    /// The search term as received.
    pub term: String,
    /// The mode that was searched.
    pub mode: SearchMode,
    /// Matching people.
    pub candidates: Vec<DirectoryCandidate>,
}

/// API response for a host search.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HostSearchResponse {
    /// The search term as received.
    pub term: String,
    /// Matching hosts.
    pub hosts: Vec<HostRef>,
}
