// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use newsdesk::{StoreError, SubmitError};
use newsdesk_domain::ValidationReport;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The viewer could not be identified.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The viewer is not allowed to perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or relationship required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The viewer could not be identified.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The viewer does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or relationship required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A primitive booking field is malformed.
    ShapeViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// Required connection data is missing.
    ValidationFailed {
        /// One-line summary of what to fix.
        summary: String,
        /// Every field-level violation.
        report: ValidationReport,
    },
    /// A submit is already outstanding for this session.
    SubmitInProgress,
    /// The store failed the save. The session is kept for a retry.
    PersistenceFailed {
        /// The store's message.
        message: String,
        /// Whether retrying may succeed.
        retryable: bool,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ShapeViolation { message } | Self::ValidationFailed { summary: message, .. } => {
                write!(f, "{message}")
            }
            Self::SubmitInProgress => write!(f, "A save is already in progress"),
            Self::PersistenceFailed { message, .. } => write!(f, "Save failed: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a submit error into an API error.
///
/// `report` is the editor's report after the failed submit, attached to
/// validation failures so the caller can highlight every field.
#[must_use]
pub fn translate_submit_error(err: SubmitError, report: &ValidationReport) -> ApiError {
    match err {
        SubmitError::Shape(violation) => ApiError::ShapeViolation {
            message: violation.to_string(),
        },
        SubmitError::Invalid { summary } => ApiError::ValidationFailed {
            summary,
            report: report.clone(),
        },
        SubmitError::AlreadySubmitting => ApiError::SubmitInProgress,
        SubmitError::NotSubmitting => ApiError::Internal {
            message: err.to_string(),
        },
        SubmitError::Persistence(message) => ApiError::PersistenceFailed {
            message,
            retryable: true,
        },
    }
}

/// Translates a store error raised while reading `booking_id`.
#[must_use]
pub fn translate_store_error<E: StoreError>(err: &E, booking_id: &str) -> ApiError {
    if err.is_not_found() {
        return ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking '{booking_id}' does not exist"),
        };
    }
    ApiError::Internal {
        message: err.to_string(),
    }
}
