// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking creation and save.
//!
//! A save is applied in one transaction, in this order:
//! 1. update the booking row
//! 2. delete tombstoned guests
//! 3. update guests that carry a stored id
//! 4. insert new guests with generated ids
//!
//! Deletes run before inserts so a person removed and re-added in the same
//! session does not trip the `(booking_id, person_id)` uniqueness constraint.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::data_models::{BookingChangeset, BookingRow, GuestChangeset, GuestRow};
use crate::diesel_schema::{booking_guests, bookings};
use crate::error::PersistenceError;
use crate::queries::bookings::{find_booking_row, list_guest_ids, load_booking};
use newsdesk::{GuestPayload, SavePayload};
use newsdesk_domain::{BookingRecord, ConnectionDetails, ConnectionPayload, validate_booking_shape};

/// Stores a new booking with its guests.
///
/// # Errors
///
/// Returns an error if:
/// - The booking fields are malformed
/// - A booking with the same id exists
/// - The write fails
pub fn create_booking(
    conn: &mut SqliteConnection,
    record: &BookingRecord,
) -> Result<BookingRecord, PersistenceError> {
    validate_booking_shape(
        &record.subject,
        &record.newsroom_name,
        &record.start_at,
        i64::from(record.duration_minutes),
    )?;

    info!(booking_id = %record.id, guests = record.guests.len(), "Creating booking");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if find_booking_row(conn, &record.id)?.is_some() {
            return Err(PersistenceError::AlreadyExists(record.id.clone()));
        }

        diesel::insert_into(bookings::table)
            .values(&BookingRow::from_record(record))
            .execute(conn)?;

        let guests: Vec<GuestRow> = record
            .guests
            .iter()
            .map(|g| GuestRow::from_record(&record.id, g))
            .collect();
        if !guests.is_empty() {
            diesel::insert_into(booking_guests::table)
                .values(&guests)
                .execute(conn)?;
        }

        load_booking(conn, &record.id)
    })
}

/// Checks the parts of a save request that do not need the database.
fn check_payload(payload: &SavePayload) -> Result<(), PersistenceError> {
    validate_booking_shape(
        &payload.subject,
        &payload.newsroom_name,
        &payload.start_at,
        i64::from(payload.duration_minutes),
    )?;

    let mut seen: HashSet<&str> = HashSet::new();
    for guest in &payload.guests {
        if !seen.insert(guest.person.id.as_str()) {
            return Err(PersistenceError::DuplicatePerson(guest.person.id.clone()));
        }
    }

    Ok(())
}

fn sort_order(guest: &GuestPayload) -> Result<i32, PersistenceError> {
    i32::try_from(guest.order).map_err(|_| {
        PersistenceError::InvalidData(format!("Guest order {} is too large", guest.order))
    })
}

fn guest_connection(guest: &GuestPayload) -> ConnectionDetails {
    // No connection payload means the guest borrows the booking default, so
    // nothing of its own is stored.
    guest
        .connection
        .clone()
        .map_or_else(ConnectionDetails::empty, ConnectionPayload::into_details)
}

fn guest_changeset(guest: &GuestPayload) -> Result<GuestChangeset, PersistenceError> {
    let details: ConnectionDetails = guest_connection(guest);

    Ok(GuestChangeset {
        person_name: guest.person.name.clone(),
        person_kind: guest.person.kind.as_str().to_string(),
        sort_order: sort_order(guest)?,
        appearance_type: Some(guest.appearance_type.as_str().to_string()),
        join_url: details.join_url,
        venue_name: details.venue_name,
        venue_address: details.venue_address,
        dial_info: details.dial_info,
    })
}

fn new_guest_row(booking_id: &str, guest: &GuestPayload) -> Result<GuestRow, PersistenceError> {
    let details: ConnectionDetails = guest_connection(guest);

    Ok(GuestRow {
        guest_id: Uuid::new_v4().to_string(),
        booking_id: booking_id.to_string(),
        person_id: guest.person.id.clone(),
        person_name: guest.person.name.clone(),
        person_kind: guest.person.kind.as_str().to_string(),
        sort_order: sort_order(guest)?,
        appearance_type: Some(guest.appearance_type.as_str().to_string()),
        join_url: details.join_url,
        venue_name: details.venue_name,
        venue_address: details.venue_address,
        dial_info: details.dial_info,
    })
}

/// Applies a save request and returns the stored booking.
///
/// The shape of the request is checked again here; the editor is not
/// trusted to have done it.
///
/// # Errors
///
/// Returns an error if:
/// - The booking fields are malformed
/// - A person appears twice in the guest list
/// - The booking does not exist
/// - A deleted or updated guest id is not stored on this booking
/// - The write fails
pub fn save_booking(
    conn: &mut SqliteConnection,
    payload: &SavePayload,
) -> Result<BookingRecord, PersistenceError> {
    check_payload(payload)?;

    let booking_id: &str = payload.booking_id.as_str();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if find_booking_row(conn, booking_id)?.is_none() {
            return Err(PersistenceError::NotFound(booking_id.to_string()));
        }

        let stored_ids: HashSet<String> = list_guest_ids(conn, booking_id)?.into_iter().collect();
        let referenced = payload
            .deleted_guest_ids
            .iter()
            .chain(payload.guests.iter().filter_map(|g| g.id.as_ref()));
        for guest_id in referenced {
            if !stored_ids.contains(guest_id) {
                return Err(PersistenceError::UnknownGuest {
                    booking_id: booking_id.to_string(),
                    guest_id: guest_id.clone(),
                });
            }
        }

        let changes: BookingChangeset = BookingChangeset {
            subject: payload.subject.clone(),
            newsroom_name: payload.newsroom_name.clone(),
            start_at: payload.start_at.clone(),
            duration_minutes: payload.duration_minutes,
            appearance_scope: Some(payload.appearance_scope.as_str().to_string()),
            access_provisioning: Some(payload.access_provisioning.as_str().to_string()),
            appearance_type: Some(payload.appearance_type.as_str().to_string()),
            location_url: payload.location_url.clone(),
            location_name: payload.location_name.clone(),
            location_address: payload.location_address.clone(),
            dial_info: payload.dial_info.clone(),
            host_id: payload.host.as_ref().map(|h| h.id.clone()),
            host_name: payload.host.as_ref().map(|h| h.name.clone()),
            program_name: payload.program_name.clone(),
            talking_points: payload.talking_points.clone(),
        };
        diesel::update(bookings::table.find(booking_id))
            .set(&changes)
            .execute(conn)?;

        if !payload.deleted_guest_ids.is_empty() {
            let deleted: usize = diesel::delete(
                booking_guests::table
                    .filter(booking_guests::booking_id.eq(booking_id))
                    .filter(booking_guests::guest_id.eq_any(&payload.deleted_guest_ids)),
            )
            .execute(conn)?;
            debug!(booking_id, deleted, "Deleted removed guests");
        }

        let mut inserted: usize = 0;
        for guest in &payload.guests {
            if let Some(guest_id) = &guest.id {
                diesel::update(booking_guests::table.find(guest_id))
                    .set(&guest_changeset(guest)?)
                    .execute(conn)?;
            } else {
                diesel::insert_into(booking_guests::table)
                    .values(&new_guest_row(booking_id, guest)?)
                    .execute(conn)?;
                inserted += 1;
            }
        }

        info!(
            booking_id,
            guests = payload.guests.len(),
            inserted,
            deleted = payload.deleted_guest_ids.len(),
            "Saved booking"
        );

        load_booking(conn, booking_id)
    })
}
