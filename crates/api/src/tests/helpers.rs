// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Role, Viewer};
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingRecord, GuestRecord, PersonKind,
    PersonRef,
};
use newsdesk_persistence::Persistence;

pub fn create_test_viewer(user_id: &str, role: Role) -> Viewer {
    Viewer::new(user_id.to_string(), role, vec![String::from("org-1")])
}

pub fn create_test_producer() -> Viewer {
    create_test_viewer("producer-1", Role::Producer)
}

pub fn create_test_outsider() -> Viewer {
    Viewer::new(
        String::from("producer-9"),
        Role::Producer,
        vec![String::from("org-9")],
    )
}

/// A unified, shared, online booking with two guests and no guest links.
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
        program_name: None,
        talking_points: None,
        guests: vec![
            create_test_guest_record("guest-1", "e-1", 0),
            create_test_guest_record("guest-2", "r-1", 1),
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

/// An in-memory database holding [`create_test_record`] and a small directory.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_booking(&create_test_record()).unwrap();

    let entries: [(PersonRef, bool); 4] = [
        (PersonRef::new("e-1", "Ana Alvarez", PersonKind::Expert), false),
        (PersonRef::new("e-2", "Dana Diaz", PersonKind::Expert), true),
        (PersonRef::new("r-1", "Ana Brooks", PersonKind::Reporter), true),
        (PersonRef::new("r-2", "Cal Carter", PersonKind::Reporter), false),
    ];
    for (person, can_host) in &entries {
        persistence.upsert_person(person, *can_host).unwrap();
    }
    persistence
}
