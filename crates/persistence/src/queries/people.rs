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
use newsdesk_domain::{HostRef, PersonKind, PersonRef};

/// Most candidates returned by one directory search.
pub const SEARCH_LIMIT: i64 = 25;

/// Builds a `LIKE` pattern matching `term` anywhere, with wildcards escaped.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern: String = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Searches people of one kind by display name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored kind is not recognized.
pub fn search_people(
    conn: &mut SqliteConnection,
    term: &str,
    kind: PersonKind,
) -> Result<Vec<PersonRef>, PersistenceError> {
    debug!(term, kind = %kind, "Searching people");

    let rows: Vec<PersonRow> = people::table
        .filter(people::kind.eq(kind.as_str()))
        .filter(people::display_name.like(contains_pattern(term)).escape('\\'))
        .order((people::display_name.asc(), people::person_id.asc()))
        .limit(SEARCH_LIMIT)
        .select(PersonRow::as_select())
        .load(conn)?;

    rows.into_iter().map(PersonRow::into_person).collect()
}

/// Searches people who may host a booking.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_hosts(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<HostRef>, PersistenceError> {
    debug!(term, "Searching hosts");

    let rows: Vec<PersonRow> = people::table
        .filter(people::can_host.eq(1))
        .filter(people::display_name.like(contains_pattern(term)).escape('\\'))
        .order((people::display_name.asc(), people::person_id.asc()))
        .limit(SEARCH_LIMIT)
        .select(PersonRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(PersonRow::into_host).collect())
}
