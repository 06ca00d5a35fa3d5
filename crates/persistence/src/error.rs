// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use newsdesk::StoreError;
use newsdesk_domain::ShapeViolation;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The requested booking does not exist.
    #[error("Booking not found: {0}")]
    NotFound(String),
    /// A booking with this id already exists.
    #[error("Booking already exists: {0}")]
    AlreadyExists(String),
    /// A save referenced a guest id that is not stored on the booking.
    #[error("Guest {guest_id} does not belong to booking {booking_id}")]
    UnknownGuest {
        /// The booking being saved.
        booking_id: String,
        /// The unknown guest id.
        guest_id: String,
    },
    /// A save carried the same person twice.
    #[error("Person {0} appears more than once in the guest list")]
    DuplicatePerson(String),
    /// A save carried malformed booking fields.
    #[error("{0}")]
    InvalidShape(ShapeViolation),
    /// A stored value could not be read back.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<ShapeViolation> for PersistenceError {
    fn from(err: ShapeViolation) -> Self {
        Self::InvalidShape(err)
    }
}

impl StoreError for PersistenceError {
    fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
