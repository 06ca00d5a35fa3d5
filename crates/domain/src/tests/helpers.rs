// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingDraft, Guest, PersonKind,
    PersonRef,
};

/// A valid unified, shared, online booking with no guests.
pub fn create_test_draft() -> BookingDraft {
    BookingDraft {
        id: String::from("booking-1"),
        organization_id: String::from("org-1"),
        subject: String::from("Election night panel"),
        newsroom_name: String::from("Metro Desk"),
        start_at: String::from("2026-11-03T18:00:00Z"),
        duration_minutes: 45,
        appearance_scope: AppearanceScope::Unified,
        access_provisioning: AccessProvisioning::Shared,
        appearance_type: AppearanceType::Online,
        location_url: None,
        location_name: None,
        location_address: None,
        dial_info: None,
        host: None,
        guests: Vec::new(),
        program_name: None,
        talking_points: None,
    }
}

pub fn create_test_guest(person_id: &str, order: usize) -> Guest {
    Guest::new(
        PersonRef::new(person_id, &format!("Person {person_id}"), PersonKind::Expert),
        order,
    )
}

pub fn with_guests(mut draft: BookingDraft, person_ids: &[&str]) -> BookingDraft {
    draft.guests = person_ids
        .iter()
        .enumerate()
        .map(|(order, id)| create_test_guest(id, order))
        .collect();
    draft
}
