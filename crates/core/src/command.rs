// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use newsdesk_domain::{AccessProvisioning, AppearanceScope, AppearanceType, HostRef, PersonRef};
use serde::{Deserialize, Deserializer, Serialize};

/// A single user edit against a booking draft, as data only.
///
/// Edits are the only way to change a draft once it has been loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditCommand {
    /// Replace the subject.
    SetSubject {
        /// New subject text.
        value: String,
    },
    /// Replace the newsroom name.
    SetNewsroomName {
        /// New newsroom name.
        value: String,
    },
    /// Replace the start instant.
    SetStartAt {
        /// New start instant, as entered.
        value: String,
    },
    /// Replace the duration.
    SetDuration {
        /// New duration in minutes.
        minutes: i64,
    },
    /// Change the appearance scope.
    ///
    /// Switching to a per-guest scope forces per-guest provisioning.
    SetAppearanceScope {
        /// The new scope.
        scope: AppearanceScope,
    },
    /// Change the access provisioning.
    SetAccessProvisioning {
        /// The new provisioning mode.
        provisioning: AccessProvisioning,
    },
    /// Change the booking-level appearance type.
    SetAppearanceType {
        /// The new appearance type.
        appearance_type: AppearanceType,
    },
    /// Replace the default join link.
    SetLocationUrl {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Replace the default venue name.
    SetLocationName {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Replace the default venue address.
    SetLocationAddress {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Replace the default dial string.
    SetDialInfo {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Assign or clear the host.
    SetHost {
        /// The host, or `None` to clear.
        host: Option<HostRef>,
    },
    /// Replace the program name.
    SetProgramName {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Replace the talking points.
    SetTalkingPoints {
        /// New value, or `None` to clear.
        value: Option<String>,
    },
    /// Append a guest unless the person is already on the roster.
    AddGuest {
        /// The person to add.
        person: PersonRef,
    },
    /// Remove the guest at a roster position.
    RemoveGuest {
        /// Roster position.
        index: usize,
    },
    /// Move a guest to another roster position.
    MoveGuest {
        /// Current roster position.
        from: usize,
        /// Target roster position.
        to: usize,
    },
    /// Merge changes into the guest at a roster position.
    PatchGuest {
        /// Roster position.
        index: usize,
        /// The fields to change.
        patch: GuestPatch,
    },
}

impl EditCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetSubject { .. } => "set_subject",
            Self::SetNewsroomName { .. } => "set_newsroom_name",
            Self::SetStartAt { .. } => "set_start_at",
            Self::SetDuration { .. } => "set_duration",
            Self::SetAppearanceScope { .. } => "set_appearance_scope",
            Self::SetAccessProvisioning { .. } => "set_access_provisioning",
            Self::SetAppearanceType { .. } => "set_appearance_type",
            Self::SetLocationUrl { .. } => "set_location_url",
            Self::SetLocationName { .. } => "set_location_name",
            Self::SetLocationAddress { .. } => "set_location_address",
            Self::SetDialInfo { .. } => "set_dial_info",
            Self::SetHost { .. } => "set_host",
            Self::SetProgramName { .. } => "set_program_name",
            Self::SetTalkingPoints { .. } => "set_talking_points",
            Self::AddGuest { .. } => "add_guest",
            Self::RemoveGuest { .. } => "remove_guest",
            Self::MoveGuest { .. } => "move_guest",
            Self::PatchGuest { .. } => "patch_guest",
        }
    }
}

/// A partial update to one guest.
///
/// Connection fields use a double option: absent leaves the field alone,
/// `null` clears it, a string sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPatch {
    /// New appearance type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance_type: Option<AppearanceType>,
    /// New join link.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub join_url: Option<Option<String>>,
    /// New venue name.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub venue_name: Option<Option<String>>,
    /// New venue address.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub venue_address: Option<Option<String>>,
    /// New dial string.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub dial_info: Option<Option<String>>,
    /// New editor note.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// What happened when an edit was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The draft changed.
    Applied,
    /// The edit was valid but changed nothing (duplicate guest, stale index).
    Unchanged,
    /// The edit is not allowed.
    Rejected {
        /// Why the edit was refused.
        reason: String,
    },
}
