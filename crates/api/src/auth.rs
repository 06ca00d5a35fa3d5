// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Viewer identity and role-based authorization.
//!
//! The viewer is resolved once per request and passed explicitly into every
//! handler; nothing here reads ambient session state.

use std::str::FromStr;
use tracing::warn;

use crate::error::AuthError;

/// Viewer roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Newsroom-wide administrator. May view and edit every booking.
    Admin,
    /// Producer. May view and edit bookings of their organizations.
    Producer,
    /// Contributor. May view bookings of their organizations.
    Contributor,
}

impl Role {
    /// Converts this role to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Producer => "producer",
            Self::Contributor => "contributor",
        }
    }

    /// Returns whether this role may change bookings.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        matches!(self, Self::Admin | Self::Producer)
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "producer" => Ok(Self::Producer),
            "contributor" => Ok(Self::Contributor),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The person making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Stable user identifier.
    pub user_id: String,
    /// The viewer's role.
    pub role: Role,
    /// Organizations the viewer belongs to.
    pub organization_ids: Vec<String>,
}

impl Viewer {
    /// Creates a new viewer.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user identifier
    /// * `role` - The viewer's role
    /// * `organization_ids` - Organizations the viewer belongs to
    #[must_use]
    pub const fn new(user_id: String, role: Role, organization_ids: Vec<String>) -> Self {
        Self {
            user_id,
            role,
            organization_ids,
        }
    }

    /// Returns whether the viewer belongs to `organization_id`.
    #[must_use]
    pub fn is_member_of(&self, organization_id: &str) -> bool {
        self.organization_ids.iter().any(|id| id == organization_id)
    }
}

/// Authorization checks for booking operations.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `viewer` may read a booking of `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the viewer is an admin or a member of the
    /// organization.
    pub fn authorize_view_booking(viewer: &Viewer, organization_id: &str) -> Result<(), AuthError> {
        if viewer.role == Role::Admin || viewer.is_member_of(organization_id) {
            return Ok(());
        }
        Err(deny(viewer, "view_booking", "organization member"))
    }

    /// Checks that `viewer` may edit and submit a booking of `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the viewer is an admin, or a producer who is a
    /// member of the organization.
    pub fn authorize_edit_booking(viewer: &Viewer, organization_id: &str) -> Result<(), AuthError> {
        match viewer.role {
            Role::Admin => Ok(()),
            Role::Producer if viewer.is_member_of(organization_id) => Ok(()),
            _ => Err(deny(viewer, "edit_booking", "Admin or Producer")),
        }
    }

    /// Checks that `viewer` opened the edit session owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewer is not the session owner.
    pub fn authorize_session_owner(viewer: &Viewer, owner_id: &str) -> Result<(), AuthError> {
        if viewer.user_id == owner_id {
            return Ok(());
        }
        Err(deny(viewer, "use_edit_session", "session owner"))
    }

    /// Checks that `viewer` may search the person directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewer's role cannot edit bookings.
    pub fn authorize_directory_search(viewer: &Viewer) -> Result<(), AuthError> {
        if viewer.role.can_edit() {
            return Ok(());
        }
        Err(deny(viewer, "search_directory", "Admin or Producer"))
    }
}

fn deny(viewer: &Viewer, action: &str, required_role: &str) -> AuthError {
    warn!(
        user_id = %viewer.user_id,
        role = %viewer.role,
        action,
        "Authorization denied"
    );
    AuthError::Unauthorized {
        action: action.to_string(),
        required_role: required_role.to_string(),
    }
}
