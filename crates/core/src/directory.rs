// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Person directory lookups used by the guest and host pickers.

use newsdesk_domain::{HostRef, PersonKind, PersonRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::OffsetDateTime;

/// Which part of the directory a guest search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Experts only.
    Experts,
    /// Reporters only.
    Reporters,
    /// Experts first, then reporters.
    #[default]
    All,
}

/// The time span a guest search is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Window start.
    pub starts_at: OffsetDateTime,
    /// Window end.
    pub ends_at: OffsetDateTime,
}

/// The directory collaborator.
pub trait PersonDirectory {
    /// The error type returned by this directory.
    type Error: std::error::Error;

    /// Searches people of one kind by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be queried.
    fn search_people(
        &mut self,
        term: &str,
        kind: PersonKind,
        window: Option<&TimeWindow>,
    ) -> Result<Vec<PersonRef>, Self::Error>;

    /// Searches people who may host a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be queried.
    fn search_hosts(&mut self, term: &str) -> Result<Vec<HostRef>, Self::Error>;
}

/// Combines two result lists, dropping later copies of an id.
///
/// The first list's entry wins on conflict and first-seen order is kept.
#[must_use]
pub fn merge_directory_results(first: Vec<PersonRef>, second: Vec<PersonRef>) -> Vec<PersonRef> {
    let mut seen: HashSet<String> = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|person| seen.insert(person.id.clone()))
        .collect()
}

/// Runs a guest search in the given mode.
///
/// # Errors
///
/// Returns the first directory error encountered.
pub fn search_directory<D: PersonDirectory>(
    directory: &mut D,
    term: &str,
    mode: SearchMode,
    window: Option<&TimeWindow>,
) -> Result<Vec<PersonRef>, D::Error> {
    match mode {
        SearchMode::Experts => directory.search_people(term, PersonKind::Expert, window),
        SearchMode::Reporters => directory.search_people(term, PersonKind::Reporter, window),
        SearchMode::All => {
            let experts: Vec<PersonRef> =
                directory.search_people(term, PersonKind::Expert, window)?;
            let reporters: Vec<PersonRef> =
                directory.search_people(term, PersonKind::Reporter, window)?;
            Ok(merge_directory_results(experts, reporters))
        }
    }
}
