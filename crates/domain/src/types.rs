// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::appearance::{AccessProvisioning, AppearanceScope, AppearanceType};
use crate::connection::{ConnectionDetails, join_venue, normalize_text};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of person that can be booked as a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonKind {
    /// A subject-matter expert from the directory.
    Expert,
    /// A reporter from a member newsroom.
    Reporter,
}

impl PersonKind {
    /// Converts this kind to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expert => "EXPERT",
            Self::Reporter => "REPORTER",
        }
    }
}

impl FromStr for PersonKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXPERT" => Ok(Self::Expert),
            "REPORTER" => Ok(Self::Reporter),
            _ => Err(DomainError::InvalidPersonKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for PersonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to a person in the directory.
///
/// The booking core treats this as an opaque identity plus a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef {
    /// Directory identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Expert or reporter.
    pub kind: PersonKind,
}

impl PersonRef {
    /// Creates a new person reference.
    #[must_use]
    pub fn new(id: &str, name: &str, kind: PersonKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

/// The host of a booking. At most one per booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostRef {
    /// Directory identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A guest entry inside a booking draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Stored identifier. `None` for guests added during the current session.
    pub id: Option<String>,
    /// The person appearing as this guest.
    pub person: PersonRef,
    /// Zero-based position in the roster. Always equals the list index.
    pub order: usize,
    /// The guest's own appearance type. Only consulted under a per-guest scope.
    pub appearance_type: AppearanceType,
    /// The guest's own connection fields.
    pub connection: ConnectionDetails,
    /// Editor-only note. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Guest {
    /// Creates a freshly added guest: online, no connection data, no id.
    #[must_use]
    pub const fn new(person: PersonRef, order: usize) -> Self {
        Self {
            id: None,
            person,
            order,
            appearance_type: AppearanceType::Online,
            connection: ConnectionDetails::empty(),
            note: None,
        }
    }
}

/// A guest row as returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Stored identifier.
    pub id: String,
    /// The person appearing as this guest.
    pub person: PersonRef,
    /// Stored sort position. Not guaranteed to be dense.
    pub order: i32,
    /// Stored appearance type, if any.
    pub appearance_type: Option<AppearanceType>,
    /// Stored join link.
    pub join_url: Option<String>,
    /// Stored venue name.
    pub venue_name: Option<String>,
    /// Stored venue address.
    pub venue_address: Option<String>,
    /// Stored dial string.
    pub dial_info: Option<String>,
}

/// A booking as returned by the persistence collaborator.
///
/// Scope, provisioning, and appearance type may be absent on older records;
/// loading a record into a draft fills in the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Booking identifier.
    pub id: String,
    /// The organization that owns the booking.
    pub organization_id: String,
    /// Booking subject.
    pub subject: String,
    /// Name of the requesting newsroom.
    pub newsroom_name: String,
    /// Start instant as an RFC 3339 timestamp.
    pub start_at: String,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Stored appearance scope.
    pub appearance_scope: Option<AppearanceScope>,
    /// Stored access provisioning.
    pub access_provisioning: Option<AccessProvisioning>,
    /// Stored booking-level appearance type.
    pub appearance_type: Option<AppearanceType>,
    /// Default join link.
    pub location_url: Option<String>,
    /// Default venue name.
    pub location_name: Option<String>,
    /// Default venue address.
    pub location_address: Option<String>,
    /// Default dial string.
    pub dial_info: Option<String>,
    /// Host, if one has been assigned.
    pub host: Option<HostRef>,
    /// Program name.
    pub program_name: Option<String>,
    /// Talking points.
    pub talking_points: Option<String>,
    /// Guest rows in stored order.
    pub guests: Vec<GuestRecord>,
}

/// The editable state of one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Booking identifier.
    pub id: String,
    /// The organization that owns the booking.
    pub organization_id: String,
    /// Booking subject.
    pub subject: String,
    /// Name of the requesting newsroom.
    pub newsroom_name: String,
    /// Start instant as entered. Checked by shape validation.
    pub start_at: String,
    /// Duration in minutes as entered. Checked by shape validation.
    pub duration_minutes: i64,
    /// Appearance scope.
    pub appearance_scope: AppearanceScope,
    /// Access provisioning.
    pub access_provisioning: AccessProvisioning,
    /// Booking-level appearance type, used under a unified scope.
    pub appearance_type: AppearanceType,
    /// Default join link.
    pub location_url: Option<String>,
    /// Default venue name.
    pub location_name: Option<String>,
    /// Default venue address.
    pub location_address: Option<String>,
    /// Default dial string.
    pub dial_info: Option<String>,
    /// Host, if one has been assigned.
    pub host: Option<HostRef>,
    /// Guests in roster order.
    pub guests: Vec<Guest>,
    /// Program name.
    pub program_name: Option<String>,
    /// Talking points.
    pub talking_points: Option<String>,
}

impl BookingDraft {
    /// Returns the booking-level default value for `kind`, if any.
    #[must_use]
    pub fn default_value(&self, kind: AppearanceType) -> Option<String> {
        match kind {
            AppearanceType::Online => normalize_text(self.location_url.as_deref()),
            AppearanceType::InPerson => join_venue(
                self.location_name.as_deref(),
                self.location_address.as_deref(),
            ),
            AppearanceType::Phone => normalize_text(self.dial_info.as_deref()),
        }
    }

    /// Returns the position of the guest for `person_id`, if present.
    #[must_use]
    pub fn guest_position(&self, person_id: &str) -> Option<usize> {
        self.guests.iter().position(|g| g.person.id == person_id)
    }
}
