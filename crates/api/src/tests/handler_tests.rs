// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_outsider, create_test_persistence, create_test_producer, create_test_viewer,
};
use crate::{
    ApiError, BookingView, CommandResponse, EditSession, EditorSnapshot, Role, SubmitResponse,
    Viewer, apply_edit, get_snapshot, open_edit_session, submit_edit_session, view_booking,
};
use newsdesk::{BookingStore, CommandOutcome, EditCommand, EditorOptions, SavePayload};
use newsdesk_domain::{
    AccessProvisioning, AppearanceType, BookingRecord, EffectiveConnection, PersonKind, PersonRef,
};
use newsdesk_persistence::{Persistence, PersistenceError};

fn open_test_session(persistence: &mut Persistence) -> EditSession {
    open_edit_session(
        persistence,
        &create_test_producer(),
        "booking-1",
        EditorOptions::default(),
    )
    .unwrap()
}

/// Loads from a real database and fails every save.
struct FailingSaveStore {
    inner: Persistence,
}

impl BookingStore for FailingSaveStore {
    type Error = PersistenceError;

    fn load_booking(&mut self, booking_id: &str) -> Result<BookingRecord, Self::Error> {
        self.inner.load_booking(booking_id)
    }

    fn save_booking(&mut self, _payload: &SavePayload) -> Result<BookingRecord, Self::Error> {
        Err(PersistenceError::DatabaseError(String::from("database is locked")))
    }
}

#[test]
fn test_view_booking_resolves_shared_link_for_every_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let viewer: Viewer = create_test_viewer("contrib-1", Role::Contributor);

    let view: BookingView =
        view_booking(&mut persistence, &viewer, "booking-1", EditorOptions::default()).unwrap();

    assert_eq!(view.guests.len(), 2);
    assert_eq!(
        view.default_connection.as_deref(),
        Some("https://meet.example/abc")
    );
    for guest in &view.guests {
        assert_eq!(
            guest.connection,
            EffectiveConnection {
                kind: AppearanceType::Online,
                value: Some(String::from("https://meet.example/abc")),
                used_fallback: true,
            }
        );
    }
}

#[test]
fn test_view_unknown_booking_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<BookingView, ApiError> = view_booking(
        &mut persistence,
        &create_test_producer(),
        "booking-404",
        EditorOptions::default(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_outsider_cannot_view_or_edit() {
    let mut persistence: Persistence = create_test_persistence();
    let outsider: Viewer = create_test_outsider();

    let view: Result<BookingView, ApiError> =
        view_booking(&mut persistence, &outsider, "booking-1", EditorOptions::default());
    let edit: Result<EditSession, ApiError> =
        open_edit_session(&mut persistence, &outsider, "booking-1", EditorOptions::default());

    assert!(matches!(view, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(edit, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_open_session_snapshot_is_valid_and_owned() {
    let mut persistence: Persistence = create_test_persistence();

    let session: EditSession = open_test_session(&mut persistence);
    let snapshot: EditorSnapshot = get_snapshot(&session, &create_test_producer()).unwrap();

    assert_eq!(session.owner_id(), "producer-1");
    assert_eq!(snapshot.session_id, session.session_id());
    assert_eq!(snapshot.booking_id, "booking-1");
    assert!(snapshot.report.is_valid());
    assert!(snapshot.flags.uses_shared_defaults);
    assert_eq!(snapshot.effective.len(), 2);
    assert!(!snapshot.submitting);
    assert!(snapshot.phone_enabled);
}

#[test]
fn test_other_viewer_cannot_use_session() {
    let mut persistence: Persistence = create_test_persistence();
    let mut session: EditSession = open_test_session(&mut persistence);
    let colleague: Viewer = create_test_viewer("producer-2", Role::Producer);

    let snapshot: Result<EditorSnapshot, ApiError> = get_snapshot(&session, &colleague);
    let edit: Result<CommandResponse, ApiError> = apply_edit(
        &mut session,
        &colleague,
        EditCommand::SetSubject {
            value: String::from("Hijacked"),
        },
    );

    assert!(matches!(snapshot, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(edit, Err(ApiError::Unauthorized { .. })));
    assert_eq!(session.editor().draft().subject, "Election night panel");
}

#[test]
fn test_phone_selection_rejected_when_disabled() {
    let mut persistence: Persistence = create_test_persistence();
    let producer: Viewer = create_test_producer();
    let options: EditorOptions = EditorOptions {
        phone_enabled: false,
    };
    let mut session: EditSession =
        open_edit_session(&mut persistence, &producer, "booking-1", options).unwrap();

    let response: CommandResponse = apply_edit(
        &mut session,
        &producer,
        EditCommand::SetAppearanceType {
            appearance_type: AppearanceType::Phone,
        },
    )
    .unwrap();

    assert!(matches!(response.outcome, CommandOutcome::Rejected { .. }));
    assert_eq!(response.snapshot.draft.appearance_type, AppearanceType::Online);
    assert!(!response.snapshot.phone_enabled);
}

#[test]
fn test_per_guest_provisioning_flags_missing_links() {
    let mut persistence: Persistence = create_test_persistence();
    let producer: Viewer = create_test_producer();
    let mut session: EditSession = open_test_session(&mut persistence);

    let response: CommandResponse = apply_edit(
        &mut session,
        &producer,
        EditCommand::SetAccessProvisioning {
            provisioning: AccessProvisioning::PerGuest,
        },
    )
    .unwrap();

    assert_eq!(response.outcome, CommandOutcome::Applied);
    assert_eq!(response.snapshot.report.guest_errors.len(), 2);
    assert!(
        response
            .snapshot
            .effective
            .iter()
            .all(|e| e.value.is_none() && !e.used_fallback)
    );
}

#[test]
fn test_submit_with_missing_links_fails_validation() {
    let mut persistence: Persistence = create_test_persistence();
    let producer: Viewer = create_test_producer();
    let mut session: EditSession = open_test_session(&mut persistence);
    apply_edit(
        &mut session,
        &producer,
        EditCommand::SetAccessProvisioning {
            provisioning: AccessProvisioning::PerGuest,
        },
    )
    .unwrap();

    let result: Result<SubmitResponse, ApiError> =
        submit_edit_session(&mut persistence, &mut session, &producer);

    match result {
        Err(ApiError::ValidationFailed { summary, report }) => {
            assert!(summary.starts_with("Fix 2 items:"));
            assert_eq!(report.guest_errors.len(), 2);
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
    assert!(!session.editor().is_submitting());
}

#[test]
fn test_submit_with_short_subject_is_shape_violation() {
    let mut persistence: Persistence = create_test_persistence();
    let producer: Viewer = create_test_producer();
    let mut session: EditSession = open_test_session(&mut persistence);
    apply_edit(
        &mut session,
        &producer,
        EditCommand::SetSubject {
            value: String::from("x"),
        },
    )
    .unwrap();

    let result: Result<SubmitResponse, ApiError> =
        submit_edit_session(&mut persistence, &mut session, &producer);

    assert!(matches!(result, Err(ApiError::ShapeViolation { .. })));
}

#[test]
fn test_submit_saves_roster_changes_and_reloads() {
    let mut persistence: Persistence = create_test_persistence();
    let producer: Viewer = create_test_producer();
    let mut session: EditSession = open_test_session(&mut persistence);

    apply_edit(&mut session, &producer, EditCommand::RemoveGuest { index: 0 }).unwrap();
    apply_edit(
        &mut session,
        &producer,
        EditCommand::AddGuest {
            person: PersonRef::new("e-2", "Dana Diaz", PersonKind::Expert),
        },
    )
    .unwrap();
    assert_eq!(
        session.snapshot().deleted_guest_ids,
        vec![String::from("guest-1")]
    );

    let response: SubmitResponse =
        submit_edit_session(&mut persistence, &mut session, &producer).unwrap();

    let person_ids: Vec<&str> = response
        .booking
        .guests
        .iter()
        .map(|g| g.person.id.as_str())
        .collect();
    assert_eq!(person_ids, vec!["r-1", "e-2"]);
    assert!(response.booking.guests.iter().all(|g| g.guest_id.is_some()));
    assert!(response.snapshot.deleted_guest_ids.is_empty());
    assert!(!response.snapshot.submitting);

    let stored: BookingRecord = persistence.load_booking("booking-1").unwrap();
    assert_eq!(stored.guests.len(), 2);
    assert!(stored.guests.iter().all(|g| g.id != "guest-1"));
}

#[test]
fn test_failed_save_keeps_session_for_retry() {
    let mut store: FailingSaveStore = FailingSaveStore {
        inner: create_test_persistence(),
    };
    let producer: Viewer = create_test_producer();
    let mut session: EditSession =
        open_edit_session(&mut store, &producer, "booking-1", EditorOptions::default()).unwrap();
    apply_edit(&mut session, &producer, EditCommand::RemoveGuest { index: 1 }).unwrap();

    let result: Result<SubmitResponse, ApiError> =
        submit_edit_session(&mut store, &mut session, &producer);

    assert!(matches!(
        result,
        Err(ApiError::PersistenceFailed {
            retryable: true,
            ..
        })
    ));
    let snapshot: EditorSnapshot = session.snapshot();
    assert_eq!(snapshot.draft.guests.len(), 1);
    assert_eq!(snapshot.deleted_guest_ids, vec![String::from("guest-2")]);
    assert!(snapshot.last_error.is_some());
    assert!(!snapshot.submitting);

    let retry: Result<SubmitResponse, ApiError> =
        submit_edit_session(&mut store.inner, &mut session, &producer);
    assert!(retry.is_ok());
}
