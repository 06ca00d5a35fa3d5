// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::roster::Tombstones;
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingDraft, ConnectionPayload,
    DerivedFlags, HostRef, PersonRef, ShapeViolation, normalize_text,
};
use serde::{Deserialize, Serialize};

/// The outbound save request handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    /// Booking identifier.
    pub booking_id: String,
    /// Trimmed subject.
    pub subject: String,
    /// Trimmed newsroom name.
    pub newsroom_name: String,
    /// Trimmed start instant.
    pub start_at: String,
    /// Duration in minutes.
    pub duration_minutes: i32,
    /// Appearance scope.
    pub appearance_scope: AppearanceScope,
    /// Access provisioning.
    pub access_provisioning: AccessProvisioning,
    /// Booking-level appearance type.
    pub appearance_type: AppearanceType,
    /// Default join link.
    pub location_url: Option<String>,
    /// Default venue name.
    pub location_name: Option<String>,
    /// Default venue address.
    pub location_address: Option<String>,
    /// Default dial string.
    pub dial_info: Option<String>,
    /// Host, if any.
    pub host: Option<HostRef>,
    /// Program name.
    pub program_name: Option<String>,
    /// Talking points.
    pub talking_points: Option<String>,
    /// Guests in roster order.
    pub guests: Vec<GuestPayload>,
    /// Stored guest ids to delete.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted_guest_ids: Vec<String>,
}

/// One guest in the outbound save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPayload {
    /// Stored identifier, or `None` for a new guest.
    pub id: Option<String>,
    /// The person appearing as this guest.
    pub person: PersonRef,
    /// Roster position.
    pub order: usize,
    /// The guest's appearance type.
    pub appearance_type: AppearanceType,
    /// Guest-level connection data, or `None` when the booking default
    /// applies. A store clears the guest's own connection columns on `None`.
    pub connection: Option<ConnectionPayload>,
}

/// Builds the save request for `draft`.
///
/// Under a per-guest scope every guest keeps its own type and emits only the
/// matching connection field. Under a unified scope every guest takes the
/// booking's type, and connection data is emitted only with per-guest
/// provisioning; shared bookings keep their single source of truth on the
/// booking row, and the store clears any connection stored on their guests.
///
/// # Errors
///
/// Returns an error if the duration does not fit the stored range. Callers
/// run shape validation first, so this only guards the conversion.
pub fn build_save_payload(
    draft: &BookingDraft,
    tombstones: &Tombstones,
) -> Result<SavePayload, ShapeViolation> {
    let duration_minutes: i32 = i32::try_from(draft.duration_minutes).map_err(|_| {
        ShapeViolation::DurationOutOfRange {
            minutes: draft.duration_minutes,
            min: newsdesk_domain::MIN_DURATION_MINUTES,
            max: newsdesk_domain::MAX_DURATION_MINUTES,
        }
    })?;

    let flags: DerivedFlags = DerivedFlags::of(draft);

    let guests: Vec<GuestPayload> = draft
        .guests
        .iter()
        .enumerate()
        .map(|(order, guest)| {
            let appearance_type: AppearanceType = flags.effective_kind(draft, guest);
            let connection: Option<ConnectionPayload> =
                if flags.per_guest_scope || flags.per_guest_provisioning {
                    Some(guest.connection.payload_for(appearance_type))
                } else {
                    None
                };

            GuestPayload {
                id: guest.id.clone(),
                person: guest.person.clone(),
                order,
                appearance_type,
                connection,
            }
        })
        .collect();

    Ok(SavePayload {
        booking_id: draft.id.clone(),
        subject: draft.subject.trim().to_string(),
        newsroom_name: draft.newsroom_name.trim().to_string(),
        start_at: draft.start_at.trim().to_string(),
        duration_minutes,
        appearance_scope: draft.appearance_scope,
        access_provisioning: draft.access_provisioning,
        appearance_type: draft.appearance_type,
        location_url: normalize_text(draft.location_url.as_deref()),
        location_name: normalize_text(draft.location_name.as_deref()),
        location_address: normalize_text(draft.location_address.as_deref()),
        dial_info: normalize_text(draft.dial_info.as_deref()),
        host: draft.host.clone(),
        program_name: normalize_text(draft.program_name.as_deref()),
        talking_points: normalize_text(draft.talking_points.as_deref()),
        guests,
        deleted_guest_ids: tombstones.ids().to_vec(),
    })
}
