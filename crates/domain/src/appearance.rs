// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a participant connects to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppearanceType {
    /// Joins through an online meeting link.
    #[default]
    Online,
    /// Appears at a physical venue.
    InPerson,
    /// Dials in by phone. May be disabled globally.
    Phone,
}

impl AppearanceType {
    /// Converts this appearance type to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::InPerson => "IN_PERSON",
            Self::Phone => "PHONE",
        }
    }

    /// Returns the type to use when phone appearances are disabled.
    ///
    /// `Phone` collapses to `Online`; every other type is returned unchanged.
    #[must_use]
    pub const fn without_phone(self) -> Self {
        match self {
            Self::Phone => Self::Online,
            other => other,
        }
    }
}

impl FromStr for AppearanceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONLINE" => Ok(Self::Online),
            "IN_PERSON" => Ok(Self::InPerson),
            "PHONE" => Ok(Self::Phone),
            _ => Err(DomainError::InvalidAppearanceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppearanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether all guests share one appearance type or each picks their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppearanceScope {
    /// Every guest uses the booking-level appearance type.
    #[default]
    Unified,
    /// Each guest selects an appearance type independently.
    PerGuest,
}

impl AppearanceScope {
    /// Converts this scope to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unified => "UNIFIED",
            Self::PerGuest => "PER_GUEST",
        }
    }
}

impl FromStr for AppearanceScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNIFIED" => Ok(Self::Unified),
            "PER_GUEST" => Ok(Self::PerGuest),
            _ => Err(DomainError::InvalidAppearanceScope(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppearanceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who supplies connection details for the guests of a booking.
///
/// `Shared` only has an effect while the scope is [`AppearanceScope::Unified`].
/// A per-guest scope always implies per-guest provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessProvisioning {
    /// The booking-level connection details are reused by every guest.
    #[default]
    Shared,
    /// Each guest carries its own connection details.
    PerGuest,
}

impl AccessProvisioning {
    /// Converts this provisioning mode to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "SHARED",
            Self::PerGuest => "PER_GUEST",
        }
    }
}

impl FromStr for AccessProvisioning {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHARED" => Ok(Self::Shared),
            "PER_GUEST" => Ok(Self::PerGuest),
            _ => Err(DomainError::InvalidAccessProvisioning(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessProvisioning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
