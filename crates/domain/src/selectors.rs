// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived state over a booking draft.
//!
//! The resolver and the validation engine both read these flags instead of
//! recomputing scope/provisioning combinations inline, so the two can never
//! disagree about which rules apply.

use crate::appearance::{AccessProvisioning, AppearanceScope, AppearanceType};
use crate::types::{BookingDraft, Guest};
use serde::{Deserialize, Serialize};

/// Flags computed once per resolution or validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DerivedFlags {
    /// Scope is unified.
    pub unified: bool,
    /// Scope is per guest.
    pub per_guest_scope: bool,
    /// Provisioning is per guest.
    pub per_guest_provisioning: bool,
    /// Scope is unified and the booking-level type is in person.
    pub unified_in_person: bool,
    /// Guests fall back to the booking-level defaults.
    ///
    /// Only true when the scope is unified *and* provisioning is shared.
    pub uses_shared_defaults: bool,
    /// Booking-level venue name or address must be filled in.
    pub requires_default_venue: bool,
}

impl DerivedFlags {
    /// Computes the flags for `draft`.
    #[must_use]
    pub fn of(draft: &BookingDraft) -> Self {
        let unified = draft.appearance_scope == AppearanceScope::Unified;
        let per_guest_provisioning = draft.access_provisioning == AccessProvisioning::PerGuest;
        let unified_in_person = unified && draft.appearance_type == AppearanceType::InPerson;
        let uses_shared_defaults = unified && !per_guest_provisioning;

        Self {
            unified,
            per_guest_scope: !unified,
            per_guest_provisioning,
            unified_in_person,
            uses_shared_defaults,
            requires_default_venue: uses_shared_defaults && unified_in_person,
        }
    }

    /// Returns the appearance type that applies to `guest`.
    #[must_use]
    pub const fn effective_kind(&self, draft: &BookingDraft, guest: &Guest) -> AppearanceType {
        if self.per_guest_scope {
            guest.appearance_type
        } else {
            draft.appearance_type
        }
    }
}

/// Returns the appearance type that applies to `guest` within `draft`.
#[must_use]
pub fn effective_kind(draft: &BookingDraft, guest: &Guest) -> AppearanceType {
    DerivedFlags::of(draft).effective_kind(draft, guest)
}
