// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::payload::SavePayload;
use newsdesk_domain::BookingRecord;

/// Failure reported by a storage collaborator.
pub trait StoreError: std::error::Error {
    /// Returns `true` if the requested record does not exist.
    fn is_not_found(&self) -> bool;
}

/// The persistence collaborator for bookings.
///
/// A record returned from [`BookingStore::save_booking`] must load back into
/// the same draft that produced the payload.
pub trait BookingStore {
    /// The error type returned by this store.
    type Error: StoreError;

    /// Loads one booking with its guests.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or cannot be read.
    fn load_booking(&mut self, booking_id: &str) -> Result<BookingRecord, Self::Error>;

    /// Stores a save request atomically and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be written.
    fn save_booking(&mut self, payload: &SavePayload) -> Result<BookingRecord, Self::Error>;
}
