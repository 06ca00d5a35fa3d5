// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Viewer extraction for the server.
//!
//! Identity is resolved once per request from headers set by the upstream
//! session layer and handed to the API as an explicit [`Viewer`].

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use newsdesk_api::{Role, Viewer};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::AppState;

/// Header carrying the viewer's user id.
pub const VIEWER_ID_HEADER: &str = "X-Viewer-Id";
/// Header carrying the viewer's role.
pub const VIEWER_ROLE_HEADER: &str = "X-Viewer-Role";
/// Header carrying the viewer's organizations, comma separated.
pub const VIEWER_ORGS_HEADER: &str = "X-Viewer-Orgs";

/// Extractor for the requesting viewer.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     ViewerContext(viewer): ViewerContext,
/// ) -> Result<Json<Response>, HttpError> {
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - The id or role header is missing or blank
/// - A header is not valid text
/// - The role is not recognized
pub struct ViewerContext(pub Viewer);

impl FromRequestParts<AppState> for ViewerContext {
    type Rejection = ViewerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id: String = required_header(&parts.headers, VIEWER_ID_HEADER)?;
        let role_str: String = required_header(&parts.headers, VIEWER_ROLE_HEADER)?;

        let role: Role = Role::from_str(&role_str).map_err(|e| {
            warn!(role = %role_str, "Unrecognized viewer role");
            ViewerError::InvalidRole(e.to_string())
        })?;

        let organization_ids: Vec<String> = optional_header(&parts.headers, VIEWER_ORGS_HEADER)?
            .map(|orgs| {
                orgs.split(',')
                    .map(str::trim)
                    .filter(|org| !org.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            user_id = %user_id,
            role = %role,
            organizations = organization_ids.len(),
            "Viewer resolved"
        );

        Ok(Self(Viewer::new(user_id, role, organization_ids)))
    }
}

fn required_header(headers: &HeaderMap, name: &'static str) -> Result<String, ViewerError> {
    optional_header(headers, name)?
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            debug!(header = name, "Missing viewer header");
            ViewerError::MissingHeader(name)
        })
}

fn optional_header(headers: &HeaderMap, name: &'static str) -> Result<Option<String>, ViewerError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map(|s| s.trim().to_string()).map_err(|_| {
                warn!(header = name, "Invalid viewer header encoding");
                ViewerError::InvalidHeader(name)
            })
        })
        .transpose()
}

/// Viewer extraction errors.
#[derive(Debug)]
pub enum ViewerError {
    /// A required header is missing.
    MissingHeader(&'static str),
    /// A header is not valid text.
    InvalidHeader(&'static str),
    /// The role header names no known role.
    InvalidRole(String),
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header encoding"),
            Self::InvalidRole(reason) => reason,
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
