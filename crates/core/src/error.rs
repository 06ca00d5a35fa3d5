// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use newsdesk_domain::ShapeViolation;

/// Reasons a submit did not reach, or did not succeed at, the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A primitive field is malformed. Reported on its own.
    Shape(ShapeViolation),
    /// Required connection data is missing.
    Invalid {
        /// The one-line summary of what to fix.
        summary: String,
    },
    /// A submit is already outstanding for this draft.
    AlreadySubmitting,
    /// `finish_submit` was called without an outstanding submit.
    NotSubmitting,
    /// The store rejected or failed the save. The draft is unchanged.
    Persistence(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape(violation) => write!(f, "{violation}"),
            Self::Invalid { summary } => write!(f, "{summary}"),
            Self::AlreadySubmitting => write!(f, "A save is already in progress"),
            Self::NotSubmitting => write!(f, "No save is in progress"),
            Self::Persistence(message) => write!(f, "Save failed: {message}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<ShapeViolation> for SubmitError {
    fn from(err: ShapeViolation) -> Self {
        Self::Shape(err)
    }
}
