// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when stored or submitted values cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Appearance type is not one of the known values.
    InvalidAppearanceType(String),
    /// Appearance scope is not one of the known values.
    InvalidAppearanceScope(String),
    /// Access provisioning is not one of the known values.
    InvalidAccessProvisioning(String),
    /// Person kind is not one of the known values.
    InvalidPersonKind(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAppearanceType(value) => {
                write!(f, "Invalid appearance type: '{value}'")
            }
            Self::InvalidAppearanceScope(value) => {
                write!(f, "Invalid appearance scope: '{value}'")
            }
            Self::InvalidAccessProvisioning(value) => {
                write!(f, "Invalid access provisioning: '{value}'")
            }
            Self::InvalidPersonKind(value) => write!(f, "Invalid person kind: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}

/// A malformed or out-of-range primitive field on a booking.
///
/// Shape violations are reported on their own, one at a time, and are never
/// merged into the field-level violation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
    /// Subject is missing or shorter than the minimum length.
    SubjectTooShort {
        /// The minimum number of characters.
        min: usize,
    },
    /// Newsroom name is missing or shorter than the minimum length.
    NewsroomNameTooShort {
        /// The minimum number of characters.
        min: usize,
    },
    /// Start instant is not a valid timestamp.
    InvalidStartInstant {
        /// The rejected value.
        value: String,
        /// The parser's explanation.
        reason: String,
    },
    /// Duration falls outside the accepted range.
    DurationOutOfRange {
        /// The rejected duration in minutes.
        minutes: i64,
        /// The smallest accepted duration.
        min: i64,
        /// The largest accepted duration.
        max: i64,
    },
}

impl std::fmt::Display for ShapeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubjectTooShort { min } => {
                write!(f, "Subject must be at least {min} characters")
            }
            Self::NewsroomNameTooShort { min } => {
                write!(f, "Newsroom name must be at least {min} characters")
            }
            Self::InvalidStartInstant { value, reason } => {
                write!(f, "Start time '{value}' is not a valid timestamp: {reason}")
            }
            Self::DurationOutOfRange { minutes, min, max } => {
                write!(
                    f,
                    "Duration must be between {min} and {max} minutes, got {minutes}"
                )
            }
        }
    }
}

impl std::error::Error for ShapeViolation {}
