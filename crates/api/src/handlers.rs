// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Every handler takes the [`Viewer`] explicitly and authorizes before it
//! touches a store or an edit session. Handlers are synchronous and generic
//! over the collaborator traits; the server decides how stores are shared.

use newsdesk::{
    BookingEditor, BookingStore, CommandOutcome, EditCommand, EditorOptions, PersonDirectory,
    TimeWindow, load_draft, search_directory,
};
use newsdesk_domain::{
    BookingDraft, BookingRecord, DerivedFlags, EffectiveConnection, HostRef, PersonRef,
    resolve_roster,
};
use tracing::{debug, info};

use crate::auth::{AuthorizationService, Viewer};
use crate::error::{ApiError, translate_store_error, translate_submit_error};
use crate::request_response::{
    BookingView, CommandResponse, DirectoryCandidate, DirectorySearchRequest, EditorSnapshot,
    GuestView, HostSearchResponse, OpenEditSessionResponse, PeopleSearchResponse, SubmitResponse,
};

/// One open edit session.
///
/// A session belongs to the viewer who opened it and wraps exactly one
/// [`BookingEditor`].
#[derive(Debug, Clone)]
pub struct EditSession {
    session_id: String,
    owner_id: String,
    organization_id: String,
    editor: BookingEditor,
}

impl EditSession {
    /// The session identifier.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The user who opened the session.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The organization of the booking being edited.
    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// The wrapped editor.
    #[must_use]
    pub const fn editor(&self) -> &BookingEditor {
        &self.editor
    }

    /// Captures the current session state.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        let draft: &BookingDraft = self.editor.draft();
        EditorSnapshot {
            session_id: self.session_id.clone(),
            booking_id: draft.id.clone(),
            draft: draft.clone(),
            report: self.editor.report().clone(),
            flags: DerivedFlags::of(draft),
            effective: self.editor.effective_connections(),
            deleted_guest_ids: self.editor.deleted_guest_ids().to_vec(),
            submitting: self.editor.is_submitting(),
            last_error: self.editor.last_error().map(str::to_string),
            phone_enabled: self.editor.options().phone_enabled,
        }
    }

    fn authorize(&self, viewer: &Viewer) -> Result<(), ApiError> {
        AuthorizationService::authorize_session_owner(viewer, &self.owner_id)?;
        AuthorizationService::authorize_edit_booking(viewer, &self.organization_id)?;
        Ok(())
    }
}

/// Builds the read-only view of a stored booking.
///
/// Load defaults apply, so the view matches what an editor would show.
#[must_use]
pub fn booking_view(record: BookingRecord, options: EditorOptions) -> BookingView {
    let draft: BookingDraft = load_draft(record, options);
    let effective: Vec<EffectiveConnection> = resolve_roster(&draft);

    let guests: Vec<GuestView> = draft
        .guests
        .iter()
        .zip(effective)
        .map(|(guest, connection)| GuestView {
            guest_id: guest.id.clone(),
            person: guest.person.clone(),
            order: guest.order,
            connection,
        })
        .collect();

    BookingView {
        default_connection: draft.default_value(draft.appearance_type),
        booking_id: draft.id,
        organization_id: draft.organization_id,
        subject: draft.subject,
        newsroom_name: draft.newsroom_name,
        start_at: draft.start_at,
        duration_minutes: draft.duration_minutes,
        appearance_scope: draft.appearance_scope,
        access_provisioning: draft.access_provisioning,
        appearance_type: draft.appearance_type,
        host: draft.host,
        program_name: draft.program_name,
        talking_points: draft.talking_points,
        guests,
    }
}

/// Loads a booking for reading.
///
/// # Arguments
///
/// * `store` - The booking store
/// * `viewer` - The requesting viewer
/// * `booking_id` - The booking to load
/// * `options` - Feature flags in effect
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The viewer may not read bookings of its organization
pub fn view_booking<S: BookingStore>(
    store: &mut S,
    viewer: &Viewer,
    booking_id: &str,
    options: EditorOptions,
) -> Result<BookingView, ApiError> {
    let record: BookingRecord = store
        .load_booking(booking_id)
        .map_err(|e| translate_store_error(&e, booking_id))?;

    AuthorizationService::authorize_view_booking(viewer, &record.organization_id)?;

    Ok(booking_view(record, options))
}

/// Opens an edit session on a stored booking.
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The viewer may not edit bookings of its organization
pub fn open_edit_session<S: BookingStore>(
    store: &mut S,
    viewer: &Viewer,
    booking_id: &str,
    options: EditorOptions,
) -> Result<EditSession, ApiError> {
    let record: BookingRecord = store
        .load_booking(booking_id)
        .map_err(|e| translate_store_error(&e, booking_id))?;

    AuthorizationService::authorize_edit_booking(viewer, &record.organization_id)?;

    let session: EditSession = EditSession {
        session_id: uuid::Uuid::new_v4().to_string(),
        owner_id: viewer.user_id.clone(),
        organization_id: record.organization_id.clone(),
        editor: BookingEditor::load(record, options),
    };

    info!(
        session_id = %session.session_id,
        booking_id = %booking_id,
        user_id = %viewer.user_id,
        "Opened edit session"
    );
    Ok(session)
}

/// Opens an edit session and returns it with its initial snapshot.
///
/// # Errors
///
/// Returns any error from [`open_edit_session`].
pub fn open_edit_session_response<S: BookingStore>(
    store: &mut S,
    viewer: &Viewer,
    booking_id: &str,
    options: EditorOptions,
) -> Result<(EditSession, OpenEditSessionResponse), ApiError> {
    let session: EditSession = open_edit_session(store, viewer, booking_id, options)?;
    let response: OpenEditSessionResponse = OpenEditSessionResponse {
        session_id: session.session_id.clone(),
        snapshot: session.snapshot(),
    };
    Ok((session, response))
}

/// Returns the current state of an edit session.
///
/// # Errors
///
/// Returns an error if the viewer does not own the session.
pub fn get_snapshot(session: &EditSession, viewer: &Viewer) -> Result<EditorSnapshot, ApiError> {
    session.authorize(viewer)?;
    Ok(session.snapshot())
}

/// Applies one edit to a session.
///
/// An edit that changes nothing or is not allowed still succeeds; the
/// outcome in the response says what happened.
///
/// # Errors
///
/// Returns an error if the viewer does not own the session.
pub fn apply_edit(
    session: &mut EditSession,
    viewer: &Viewer,
    command: EditCommand,
) -> Result<CommandResponse, ApiError> {
    session.authorize(viewer)?;

    let outcome: CommandOutcome = session.editor.apply(command);
    Ok(CommandResponse {
        outcome,
        snapshot: session.snapshot(),
    })
}

/// Validates and saves a session.
///
/// On success the session is reloaded from the stored booking. On any
/// failure the session keeps the draft and the removed guests, so the
/// caller can fix the draft or retry.
///
/// # Errors
///
/// Returns an error if:
/// - The viewer does not own the session
/// - A primitive field is malformed
/// - Required connection data is missing
/// - The store rejects or fails the save
pub fn submit_edit_session<S: BookingStore>(
    store: &mut S,
    session: &mut EditSession,
    viewer: &Viewer,
) -> Result<SubmitResponse, ApiError> {
    session.authorize(viewer)?;

    let record: BookingRecord = match session.editor.submit(store) {
        Ok(record) => record,
        Err(err) => return Err(translate_submit_error(err, session.editor.report())),
    };

    info!(
        session_id = %session.session_id,
        booking_id = %record.id,
        guests = record.guests.len(),
        "Saved booking"
    );

    let options: EditorOptions = session.editor.options();
    Ok(SubmitResponse {
        message: format!("Booking '{}' saved", record.id),
        booking: booking_view(record, options),
        snapshot: session.snapshot(),
    })
}

/// Searches the guest directory.
///
/// When `roster` is given, candidates already on it are flagged
/// `already_added`.
///
/// # Errors
///
/// Returns an error if:
/// - The viewer may not search the directory
/// - The time window is malformed
/// - The directory cannot be queried
pub fn search_people<D: PersonDirectory>(
    directory: &mut D,
    viewer: &Viewer,
    request: &DirectorySearchRequest,
    roster: Option<&BookingDraft>,
) -> Result<PeopleSearchResponse, ApiError> {
    AuthorizationService::authorize_directory_search(viewer)?;
    let window: Option<TimeWindow> = request.window()?;

    let people: Vec<PersonRef> =
        search_directory(directory, request.term.trim(), request.mode, window.as_ref()).map_err(
            |e| ApiError::Internal {
                message: format!("Directory search failed: {e}"),
            },
        )?;

    let candidates: Vec<DirectoryCandidate> = people
        .into_iter()
        .map(|person| DirectoryCandidate {
            already_added: roster.is_some_and(|draft| draft.guest_position(&person.id).is_some()),
            id: person.id,
            name: person.name,
            kind: person.kind,
        })
        .collect();

    debug!(
        term = %request.term,
        mode = ?request.mode,
        results = candidates.len(),
        "Directory search"
    );

    Ok(PeopleSearchResponse {
        term: request.term.clone(),
        mode: request.mode,
        candidates,
    })
}

/// Searches people who may host a booking.
///
/// # Errors
///
/// Returns an error if the viewer may not search the directory or the
/// directory cannot be queried.
pub fn search_hosts<D: PersonDirectory>(
    directory: &mut D,
    viewer: &Viewer,
    term: &str,
) -> Result<HostSearchResponse, ApiError> {
    AuthorizationService::authorize_directory_search(viewer)?;

    let hosts: Vec<HostRef> = directory
        .search_hosts(term.trim())
        .map_err(|e| ApiError::Internal {
            message: format!("Host search failed: {e}"),
        })?;

    Ok(HostSearchResponse {
        term: term.to_string(),
        hosts,
    })
}
