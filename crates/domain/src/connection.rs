// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::appearance::AppearanceType;
use serde::{Deserialize, Serialize};

/// Separator placed between a venue name and a venue address.
pub const VENUE_DELIMITER: &str = ", ";

/// Returns the trimmed value if it has any content.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trims a value and drops it entirely when nothing is left.
#[must_use]
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    non_empty(value).map(ToString::to_string)
}

/// Joins the non-empty parts of a venue name and address.
#[must_use]
pub fn join_venue(name: Option<&str>, address: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [non_empty(name), non_empty(address)]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(VENUE_DELIMITER))
    }
}

/// Connection fields as they are edited.
///
/// While a draft is open a guest may hold values for any appearance type;
/// only the fields matching the effective type are ever emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionDetails {
    /// Online join link.
    pub join_url: Option<String>,
    /// Venue name for in-person appearances.
    pub venue_name: Option<String>,
    /// Venue address for in-person appearances.
    pub venue_address: Option<String>,
    /// Dial string for phone appearances.
    pub dial_info: Option<String>,
}

impl ConnectionDetails {
    /// Creates connection details with every field unset.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            join_url: None,
            venue_name: None,
            venue_address: None,
            dial_info: None,
        }
    }

    /// Projects the fields that belong to `kind`, trimmed, dropping the rest.
    #[must_use]
    pub fn payload_for(&self, kind: AppearanceType) -> ConnectionPayload {
        match kind {
            AppearanceType::Online => ConnectionPayload::Online {
                join_url: normalize_text(self.join_url.as_deref()),
            },
            AppearanceType::InPerson => ConnectionPayload::InPerson {
                venue_name: normalize_text(self.venue_name.as_deref()),
                venue_address: normalize_text(self.venue_address.as_deref()),
            },
            AppearanceType::Phone => ConnectionPayload::Phone {
                dial_info: normalize_text(self.dial_info.as_deref()),
            },
        }
    }

    /// Returns the displayable value for `kind`, if any.
    #[must_use]
    pub fn display_value(&self, kind: AppearanceType) -> Option<String> {
        match kind {
            AppearanceType::Online => normalize_text(self.join_url.as_deref()),
            AppearanceType::InPerson => {
                join_venue(self.venue_name.as_deref(), self.venue_address.as_deref())
            }
            AppearanceType::Phone => normalize_text(self.dial_info.as_deref()),
        }
    }

    /// Returns whether the fields required by `kind` are filled in.
    #[must_use]
    pub fn satisfies(&self, kind: AppearanceType) -> bool {
        self.display_value(kind).is_some()
    }
}

/// Connection data for exactly one appearance type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionPayload {
    /// Online appearance.
    Online {
        /// The join link.
        join_url: Option<String>,
    },
    /// In-person appearance.
    InPerson {
        /// The venue name.
        venue_name: Option<String>,
        /// The venue address.
        venue_address: Option<String>,
    },
    /// Phone appearance.
    Phone {
        /// The dial string.
        dial_info: Option<String>,
    },
}

impl ConnectionPayload {
    /// Returns the appearance type this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> AppearanceType {
        match self {
            Self::Online { .. } => AppearanceType::Online,
            Self::InPerson { .. } => AppearanceType::InPerson,
            Self::Phone { .. } => AppearanceType::Phone,
        }
    }

    /// Returns the displayable value carried by this payload.
    #[must_use]
    pub fn display_value(&self) -> Option<String> {
        match self {
            Self::Online { join_url } => normalize_text(join_url.as_deref()),
            Self::InPerson {
                venue_name,
                venue_address,
            } => join_venue(venue_name.as_deref(), venue_address.as_deref()),
            Self::Phone { dial_info } => normalize_text(dial_info.as_deref()),
        }
    }

    /// Expands this payload into flat connection fields.
    #[must_use]
    pub fn into_details(self) -> ConnectionDetails {
        match self {
            Self::Online { join_url } => ConnectionDetails {
                join_url,
                ..ConnectionDetails::empty()
            },
            Self::InPerson {
                venue_name,
                venue_address,
            } => ConnectionDetails {
                venue_name,
                venue_address,
                ..ConnectionDetails::empty()
            },
            Self::Phone { dial_info } => ConnectionDetails {
                dial_info,
                ..ConnectionDetails::empty()
            },
        }
    }
}
