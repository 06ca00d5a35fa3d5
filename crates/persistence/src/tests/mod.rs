// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingRecord, GuestRecord, PersonKind,
    PersonRef,
};

pub fn create_test_record() -> BookingRecord {
    BookingRecord {
        id: String::from("booking-1"),
        organization_id: String::from("org-1"),
        subject: String::from("Election night panel"),
        newsroom_name: String::from("Metro Desk"),
        start_at: String::from("2026-11-03T18:00:00Z"),
        duration_minutes: 45,
        appearance_scope: Some(AppearanceScope::Unified),
        access_provisioning: Some(AccessProvisioning::Shared),
        appearance_type: Some(AppearanceType::Online),
        location_url: Some(String::from("https://meet.example/abc")),
        location_name: None,
        location_address: None,
        dial_info: None,
        host: None,
        program_name: Some(String::from("Evening Report")),
        talking_points: None,
        guests: vec![
            create_test_guest_record("guest-1", "p-1", 0),
            create_test_guest_record("guest-2", "p-2", 1),
        ],
    }
}

pub fn create_test_guest_record(id: &str, person_id: &str, order: i32) -> GuestRecord {
    GuestRecord {
        id: id.to_string(),
        person: PersonRef::new(person_id, &format!("Person {person_id}"), PersonKind::Expert),
        order,
        appearance_type: Some(AppearanceType::Online),
        join_url: None,
        venue_name: None,
        venue_address: None,
        dial_info: None,
    }
}

/// An in-memory database holding [`create_test_record`].
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_booking(&create_test_record()).unwrap();
    persistence
}
