// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for newsroom bookings.
//!
//! This crate sits between the transport and the editor core: it resolves
//! authorization for an explicit [`Viewer`], wraps editors in owned edit
//! sessions, and shapes results into serializable responses.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, Role, Viewer};
pub use error::{ApiError, AuthError, translate_store_error, translate_submit_error};
pub use handlers::{
    EditSession, apply_edit, booking_view, get_snapshot, open_edit_session,
    open_edit_session_response, search_hosts, search_people, submit_edit_session, view_booking,
};
pub use request_response::{
    BookingView, CommandResponse, DirectoryCandidate, DirectorySearchRequest, EditorSnapshot,
    GuestView, HostSearchResponse, OpenEditSessionResponse, PeopleSearchResponse, SubmitResponse,
};
