// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod appearance;
mod connection;
mod error;
mod resolver;
mod selectors;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use appearance::{AccessProvisioning, AppearanceScope, AppearanceType};
pub use connection::{
    ConnectionDetails, ConnectionPayload, VENUE_DELIMITER, join_venue, non_empty, normalize_text,
};
pub use error::{DomainError, ShapeViolation};
pub use resolver::{EffectiveConnection, resolve_effective, resolve_roster};
pub use selectors::{DerivedFlags, effective_kind};
pub use types::{BookingDraft, BookingRecord, Guest, GuestRecord, HostRef, PersonKind, PersonRef};
pub use validation::{
    BookingField, BookingViolation, GuestErrors, GuestField, GuestViolation, MAX_DURATION_MINUTES,
    MIN_DURATION_MINUTES, MIN_TEXT_LENGTH, Requirement, ValidationReport, parse_start_instant,
    validate, validate_booking_shape, validate_shape,
};
