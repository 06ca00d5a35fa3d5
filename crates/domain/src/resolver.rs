// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Effective connection resolution.
//!
//! This is the only place where booking-level defaults reach a guest. A guest
//! borrows the booking default only when the scope is unified and provisioning
//! is shared; per-guest provisioning under a unified scope never borrows.

use crate::appearance::AppearanceType;
use crate::selectors::DerivedFlags;
use crate::types::{BookingDraft, Guest};
use serde::{Deserialize, Serialize};

/// The connection detail a viewer actually sees for one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveConnection {
    /// The appearance type in effect for the guest.
    pub kind: AppearanceType,
    /// The value to display, if any.
    pub value: Option<String>,
    /// Whether `value` came from the booking-level default.
    pub used_fallback: bool,
}

/// Computes the effective connection for one guest.
///
/// # Arguments
///
/// * `draft` - The booking the guest belongs to
/// * `guest` - The guest to resolve
#[must_use]
pub fn resolve_effective(draft: &BookingDraft, guest: &Guest) -> EffectiveConnection {
    resolve_with_flags(&DerivedFlags::of(draft), draft, guest)
}

/// Computes the effective connection for every guest, in roster order.
#[must_use]
pub fn resolve_roster(draft: &BookingDraft) -> Vec<EffectiveConnection> {
    let flags: DerivedFlags = DerivedFlags::of(draft);
    draft
        .guests
        .iter()
        .map(|guest| resolve_with_flags(&flags, draft, guest))
        .collect()
}

fn resolve_with_flags(
    flags: &DerivedFlags,
    draft: &BookingDraft,
    guest: &Guest,
) -> EffectiveConnection {
    let kind: AppearanceType = flags.effective_kind(draft, guest);

    if let Some(own) = guest.connection.display_value(kind) {
        return EffectiveConnection {
            kind,
            value: Some(own),
            used_fallback: false,
        };
    }

    if flags.uses_shared_defaults {
        let fallback: Option<String> = draft.default_value(kind);
        let used_fallback: bool = fallback.is_some();
        return EffectiveConnection {
            kind,
            value: fallback,
            used_fallback,
        };
    }

    EffectiveConnection {
        kind,
        value: None,
        used_fallback: false,
    }
}
