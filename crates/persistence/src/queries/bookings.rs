// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{BookingRow, GuestRow};
use crate::diesel_schema::{booking_guests, bookings};
use crate::error::PersistenceError;
use newsdesk_domain::BookingRecord;

/// Loads one booking row, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_booking_row(
    conn: &mut SqliteConnection,
    booking_id: &str,
) -> Result<Option<BookingRow>, PersistenceError> {
    Ok(bookings::table
        .find(booking_id)
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?)
}

/// Loads the guest rows of a booking in stored order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_guest_rows(
    conn: &mut SqliteConnection,
    booking_id: &str,
) -> Result<Vec<GuestRow>, PersistenceError> {
    Ok(booking_guests::table
        .filter(booking_guests::booking_id.eq(booking_id))
        .order((booking_guests::sort_order.asc(), booking_guests::guest_id.asc()))
        .select(GuestRow::as_select())
        .load(conn)?)
}

/// Lists the stored guest ids of a booking.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_guest_ids(
    conn: &mut SqliteConnection,
    booking_id: &str,
) -> Result<Vec<String>, PersistenceError> {
    Ok(booking_guests::table
        .filter(booking_guests::booking_id.eq(booking_id))
        .select(booking_guests::guest_id)
        .load(conn)?)
}

/// Loads a booking with its guests.
///
/// # Errors
///
/// Returns [`PersistenceError::NotFound`] if the booking does not exist, or
/// an error if a stored value cannot be read.
pub fn load_booking(
    conn: &mut SqliteConnection,
    booking_id: &str,
) -> Result<BookingRecord, PersistenceError> {
    debug!(booking_id, "Loading booking");

    let row: BookingRow = find_booking_row(conn, booking_id)?
        .ok_or_else(|| PersistenceError::NotFound(booking_id.to_string()))?;
    let guests: Vec<GuestRow> = list_guest_rows(conn, booking_id)?;

    row.into_record(guests)
}
