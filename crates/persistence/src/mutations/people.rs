// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::PersonRow;
use crate::diesel_schema::people;
use crate::error::PersistenceError;
use newsdesk_domain::PersonRef;

/// Inserts or replaces a directory entry.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_person(
    conn: &mut SqliteConnection,
    person: &PersonRef,
    can_host: bool,
) -> Result<(), PersistenceError> {
    debug!(person_id = %person.id, kind = %person.kind, can_host, "Upserting person");

    let row: PersonRow = PersonRow {
        person_id: person.id.clone(),
        display_name: person.name.clone(),
        kind: person.kind.as_str().to_string(),
        can_host: i32::from(can_host),
    };

    diesel::replace_into(people::table)
        .values(&row)
        .execute(conn)?;

    Ok(())
}
