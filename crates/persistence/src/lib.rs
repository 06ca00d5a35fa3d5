// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for newsroom bookings.
//!
//! Bookings, their guests, and the person directory are stored in `SQLite`
//! through Diesel. The schema is created by embedded migrations when a
//! database is opened.
//!
//! [`Persistence`] implements both collaborator traits the editor consumes:
//! [`newsdesk::BookingStore`] and [`newsdesk::PersonDirectory`].
//!
//! ## Testing
//!
//! Tests open a fresh in-memory database per call to
//! [`Persistence::new_in_memory`]; nothing is shared between them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use newsdesk::{BookingStore, PersonDirectory, SavePayload, TimeWindow};
use newsdesk_domain::{BookingRecord, HostRef, PersonKind, PersonRef};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::people::SEARCH_LIMIT;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Opens a fresh in-memory database.
    ///
    /// Every call gets its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:newsdesk_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens or creates a file-backed database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Stores a new booking with its guests.
    ///
    /// This is the creation flow's entry point; edits go through
    /// [`Self::save_booking`].
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is malformed, already exists, or
    /// cannot be written.
    pub fn create_booking(
        &mut self,
        record: &BookingRecord,
    ) -> Result<BookingRecord, PersistenceError> {
        mutations::bookings::create_booking(&mut self.conn, record)
    }

    /// Loads one booking with its guests in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] if the booking does not exist.
    pub fn load_booking(&mut self, booking_id: &str) -> Result<BookingRecord, PersistenceError> {
        queries::bookings::load_booking(&mut self.conn, booking_id)
    }

    /// Applies a save request atomically and returns the stored booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be written.
    /// Nothing is written when an error is returned.
    pub fn save_booking(
        &mut self,
        payload: &SavePayload,
    ) -> Result<BookingRecord, PersistenceError> {
        mutations::bookings::save_booking(&mut self.conn, payload)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Inserts or replaces a directory entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_person(
        &mut self,
        person: &PersonRef,
        can_host: bool,
    ) -> Result<(), PersistenceError> {
        mutations::people::upsert_person(&mut self.conn, person, can_host)
    }

    /// Searches people of one kind whose name contains `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_people(
        &mut self,
        term: &str,
        kind: PersonKind,
    ) -> Result<Vec<PersonRef>, PersistenceError> {
        queries::people::search_people(&mut self.conn, term, kind)
    }

    /// Searches people who may host a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_hosts(&mut self, term: &str) -> Result<Vec<HostRef>, PersistenceError> {
        queries::people::search_hosts(&mut self.conn, term)
    }
}

impl BookingStore for Persistence {
    type Error = PersistenceError;

    fn load_booking(&mut self, booking_id: &str) -> Result<BookingRecord, Self::Error> {
        Self::load_booking(self, booking_id)
    }

    fn save_booking(&mut self, payload: &SavePayload) -> Result<BookingRecord, Self::Error> {
        Self::save_booking(self, payload)
    }
}

impl PersonDirectory for Persistence {
    type Error = PersistenceError;

    // Availability is not tracked, so the window does not narrow results.
    fn search_people(
        &mut self,
        term: &str,
        kind: PersonKind,
        _window: Option<&TimeWindow>,
    ) -> Result<Vec<PersonRef>, Self::Error> {
        Self::search_people(self, term, kind)
    }

    fn search_hosts(&mut self, term: &str) -> Result<Vec<HostRef>, Self::Error> {
        Self::search_hosts(self, term)
    }
}
