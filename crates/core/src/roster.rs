// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guest roster reconciliation.
//!
//! Invariants kept by every operation here:
//! - `order` equals list position for every guest
//! - a person appears at most once
//! - a stored guest id removed during the session is recorded exactly once

use crate::command::GuestPatch;
use newsdesk_domain::{BookingDraft, ConnectionDetails, Guest, PersonRef};
use serde::{Deserialize, Serialize};

/// Stored guest ids removed during the current edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tombstones {
    ids: Vec<String>,
}

impl Tombstones {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Records a removed guest id. Returns `false` if it was already recorded.
    pub fn record(&mut self, id: String) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns whether `id` has been recorded.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|recorded| recorded == id)
    }

    /// Recorded ids in removal order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns `true` if nothing has been removed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forgets every recorded id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Rewrites `order` so it matches list position.
pub fn reindex(guests: &mut [Guest]) {
    for (position, guest) in guests.iter_mut().enumerate() {
        guest.order = position;
    }
}

/// Appends `person` as a new online guest with no connection data.
///
/// Returns `false` without touching the roster if the person is already a guest.
pub fn add_guest(draft: &mut BookingDraft, person: PersonRef) -> bool {
    if draft.guest_position(&person.id).is_some() {
        return false;
    }

    let order: usize = draft.guests.len();
    draft.guests.push(Guest::new(person, order));
    true
}

/// Removes the guest at `index` and reindexes the rest.
///
/// A removed guest that carried a stored id is added to `tombstones`.
/// Returns the removed guest, or `None` if `index` is out of range.
pub fn remove_guest(
    draft: &mut BookingDraft,
    tombstones: &mut Tombstones,
    index: usize,
) -> Option<Guest> {
    if index >= draft.guests.len() {
        return None;
    }

    let removed: Guest = draft.guests.remove(index);
    if let Some(id) = &removed.id {
        tombstones.record(id.clone());
    }
    reindex(&mut draft.guests);

    Some(removed)
}

/// Moves the guest at `from` to position `to` and reindexes.
///
/// Returns `false` if either position is out of range or they are equal.
pub fn move_guest(draft: &mut BookingDraft, from: usize, to: usize) -> bool {
    let len: usize = draft.guests.len();
    if from >= len || to >= len || from == to {
        return false;
    }

    let guest: Guest = draft.guests.remove(from);
    draft.guests.insert(to, guest);
    reindex(&mut draft.guests);
    true
}

/// Merges `patch` into the guest at `index`.
///
/// Changing the appearance type clears every connection field before the
/// patch's own connection fields are applied, so nothing typed for the
/// previous type survives the switch.
///
/// Returns `false` if `index` is out of range or nothing changed.
pub fn patch_guest(draft: &mut BookingDraft, index: usize, patch: GuestPatch) -> bool {
    let Some(guest) = draft.guests.get_mut(index) else {
        return false;
    };

    let before: Guest = guest.clone();

    if let Some(kind) = patch.appearance_type
        && kind != guest.appearance_type
    {
        guest.appearance_type = kind;
        guest.connection = ConnectionDetails::empty();
    }

    if let Some(join_url) = patch.join_url {
        guest.connection.join_url = join_url;
    }
    if let Some(venue_name) = patch.venue_name {
        guest.connection.venue_name = venue_name;
    }
    if let Some(venue_address) = patch.venue_address {
        guest.connection.venue_address = venue_address;
    }
    if let Some(dial_info) = patch.dial_info {
        guest.connection.dial_info = dial_info;
    }
    if let Some(note) = patch.note {
        guest.note = note;
    }

    *guest != before
}
