// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from booking records.
//!
//! Enumerations are stored by their `as_str` names. Scope, provisioning and
//! appearance columns are nullable so older rows load with defaults.

use diesel::prelude::*;
use std::str::FromStr;

use crate::diesel_schema::{booking_guests, bookings, people};
use crate::error::PersistenceError;
use newsdesk_domain::{BookingRecord, DomainError, GuestRecord, HostRef, PersonKind, PersonRef};

/// A row of the `bookings` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookingRow {
    pub booking_id: String,
    pub organization_id: String,
    pub subject: String,
    pub newsroom_name: String,
    pub start_at: String,
    pub duration_minutes: i32,
    pub appearance_scope: Option<String>,
    pub access_provisioning: Option<String>,
    pub appearance_type: Option<String>,
    pub location_url: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub dial_info: Option<String>,
    pub host_id: Option<String>,
    pub host_name: Option<String>,
    pub program_name: Option<String>,
    pub talking_points: Option<String>,
}

/// Editable booking columns written on save.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings, treat_none_as_null = true)]
pub struct BookingChangeset {
    pub subject: String,
    pub newsroom_name: String,
    pub start_at: String,
    pub duration_minutes: i32,
    pub appearance_scope: Option<String>,
    pub access_provisioning: Option<String>,
    pub appearance_type: Option<String>,
    pub location_url: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub dial_info: Option<String>,
    pub host_id: Option<String>,
    pub host_name: Option<String>,
    pub program_name: Option<String>,
    pub talking_points: Option<String>,
}

/// A row of the `booking_guests` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = booking_guests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GuestRow {
    pub guest_id: String,
    pub booking_id: String,
    pub person_id: String,
    pub person_name: String,
    pub person_kind: String,
    pub sort_order: i32,
    pub appearance_type: Option<String>,
    pub join_url: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub dial_info: Option<String>,
}

/// Guest columns written when an existing guest is saved.
///
/// Every connection column is written; `None` stores `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = booking_guests)]
#[diesel(treat_none_as_null = true)]
pub struct GuestChangeset {
    pub person_name: String,
    pub person_kind: String,
    pub sort_order: i32,
    pub appearance_type: Option<String>,
    pub join_url: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub dial_info: Option<String>,
}

/// A row of the `people` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PersonRow {
    pub person_id: String,
    pub display_name: String,
    pub kind: String,
    pub can_host: i32,
}

fn parse_column<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value.map(parse_column).transpose()
}

impl BookingRow {
    /// Builds a row from a booking record, ignoring its guests.
    #[must_use]
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            booking_id: record.id.clone(),
            organization_id: record.organization_id.clone(),
            subject: record.subject.clone(),
            newsroom_name: record.newsroom_name.clone(),
            start_at: record.start_at.clone(),
            duration_minutes: record.duration_minutes,
            appearance_scope: record.appearance_scope.map(|s| s.as_str().to_string()),
            access_provisioning: record.access_provisioning.map(|p| p.as_str().to_string()),
            appearance_type: record.appearance_type.map(|t| t.as_str().to_string()),
            location_url: record.location_url.clone(),
            location_name: record.location_name.clone(),
            location_address: record.location_address.clone(),
            dial_info: record.dial_info.clone(),
            host_id: record.host.as_ref().map(|h| h.id.clone()),
            host_name: record.host.as_ref().map(|h| h.name.clone()),
            program_name: record.program_name.clone(),
            talking_points: record.talking_points.clone(),
        }
    }

    /// Converts this row and its guest rows into a booking record.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enumeration value is not recognized.
    pub fn into_record(self, guests: Vec<GuestRow>) -> Result<BookingRecord, PersistenceError> {
        let guests: Vec<GuestRecord> = guests
            .into_iter()
            .map(GuestRow::into_record)
            .collect::<Result<_, _>>()?;

        let host: Option<HostRef> = match (self.host_id, self.host_name) {
            (Some(id), Some(name)) => Some(HostRef { id, name }),
            _ => None,
        };

        Ok(BookingRecord {
            appearance_scope: parse_optional(self.appearance_scope.as_deref())?,
            access_provisioning: parse_optional(self.access_provisioning.as_deref())?,
            appearance_type: parse_optional(self.appearance_type.as_deref())?,
            id: self.booking_id,
            organization_id: self.organization_id,
            subject: self.subject,
            newsroom_name: self.newsroom_name,
            start_at: self.start_at,
            duration_minutes: self.duration_minutes,
            location_url: self.location_url,
            location_name: self.location_name,
            location_address: self.location_address,
            dial_info: self.dial_info,
            host,
            program_name: self.program_name,
            talking_points: self.talking_points,
            guests,
        })
    }
}

impl GuestRow {
    /// Builds a row from a guest record of `booking_id`.
    #[must_use]
    pub fn from_record(booking_id: &str, record: &GuestRecord) -> Self {
        Self {
            guest_id: record.id.clone(),
            booking_id: booking_id.to_string(),
            person_id: record.person.id.clone(),
            person_name: record.person.name.clone(),
            person_kind: record.person.kind.as_str().to_string(),
            sort_order: record.order,
            appearance_type: record.appearance_type.map(|t| t.as_str().to_string()),
            join_url: record.join_url.clone(),
            venue_name: record.venue_name.clone(),
            venue_address: record.venue_address.clone(),
            dial_info: record.dial_info.clone(),
        }
    }

    /// Converts this row into a guest record.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enumeration value is not recognized.
    pub fn into_record(self) -> Result<GuestRecord, PersistenceError> {
        Ok(GuestRecord {
            person: PersonRef {
                id: self.person_id,
                name: self.person_name,
                kind: parse_column::<PersonKind>(&self.person_kind)?,
            },
            appearance_type: parse_optional(self.appearance_type.as_deref())?,
            id: self.guest_id,
            order: self.sort_order,
            join_url: self.join_url,
            venue_name: self.venue_name,
            venue_address: self.venue_address,
            dial_info: self.dial_info,
        })
    }
}

impl PersonRow {
    /// Converts this row into a directory reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored kind is not recognized.
    pub fn into_person(self) -> Result<PersonRef, PersistenceError> {
        Ok(PersonRef {
            kind: parse_column::<PersonKind>(&self.kind)?,
            id: self.person_id,
            name: self.display_name,
        })
    }

    /// Converts this row into a host reference.
    #[must_use]
    pub fn into_host(self) -> HostRef {
        HostRef {
            id: self.person_id,
            name: self.display_name,
        }
    }
}
