// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingStore, SavePayload, StoreError};
use newsdesk_domain::{
    AccessProvisioning, AppearanceScope, AppearanceType, BookingRecord, GuestRecord, PersonKind,
    PersonRef,
};

/// A stored unified, shared, online booking with no guests.
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
        location_url: None,
        location_name: None,
        location_address: None,
        dial_info: None,
        host: None,
        program_name: None,
        talking_points: None,
        guests: Vec::new(),
    }
}

pub fn create_test_person(id: &str) -> PersonRef {
    PersonRef::new(id, &format!("Person {id}"), PersonKind::Expert)
}

pub fn create_test_guest_record(id: &str, person_id: &str, order: i32) -> GuestRecord {
    GuestRecord {
        id: id.to_string(),
        person: create_test_person(person_id),
        order,
        appearance_type: Some(AppearanceType::Online),
        join_url: None,
        venue_name: None,
        venue_address: None,
        dial_info: None,
    }
}

#[derive(Debug)]
pub struct FakeStoreError(pub String);

impl std::fmt::Display for FakeStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FakeStoreError {}

impl StoreError for FakeStoreError {
    fn is_not_found(&self) -> bool {
        false
    }
}

/// An in-memory store that records every payload and assigns guest ids.
#[derive(Debug, Default)]
pub struct FakeStore {
    pub saved: Vec<SavePayload>,
    pub fail_with: Option<String>,
}

impl BookingStore for FakeStore {
    type Error = FakeStoreError;

    fn load_booking(&mut self, _booking_id: &str) -> Result<BookingRecord, Self::Error> {
        Ok(create_test_record())
    }

    fn save_booking(&mut self, payload: &SavePayload) -> Result<BookingRecord, Self::Error> {
        if let Some(message) = &self.fail_with {
            return Err(FakeStoreError(message.clone()));
        }
        self.saved.push(payload.clone());

        let guests: Vec<GuestRecord> = payload
            .guests
            .iter()
            .map(|g| {
                let details: newsdesk_domain::ConnectionDetails = g
                    .connection
                    .clone()
                    .map(newsdesk_domain::ConnectionPayload::into_details)
                    .unwrap_or_else(newsdesk_domain::ConnectionDetails::empty);
                GuestRecord {
                    id: g
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("stored-{}", g.person.id)),
                    person: g.person.clone(),
                    order: i32::try_from(g.order).unwrap(),
                    appearance_type: Some(g.appearance_type),
                    join_url: details.join_url,
                    venue_name: details.venue_name,
                    venue_address: details.venue_address,
                    dial_info: details.dial_info,
                }
            })
            .collect();

        Ok(BookingRecord {
            id: payload.booking_id.clone(),
            organization_id: String::from("org-1"),
            subject: payload.subject.clone(),
            newsroom_name: payload.newsroom_name.clone(),
            start_at: payload.start_at.clone(),
            duration_minutes: payload.duration_minutes,
            appearance_scope: Some(payload.appearance_scope),
            access_provisioning: Some(payload.access_provisioning),
            appearance_type: Some(payload.appearance_type),
            location_url: payload.location_url.clone(),
            location_name: payload.location_name.clone(),
            location_address: payload.location_address.clone(),
            dial_info: payload.dial_info.clone(),
            host: payload.host.clone(),
            program_name: payload.program_name.clone(),
            talking_points: payload.talking_points.clone(),
            guests,
        })
    }
}
