// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use newsdesk::{EditCommand, EditorOptions};
use newsdesk_api::{
    ApiError, AuthorizationService, BookingView, CommandResponse, DirectorySearchRequest,
    EditSession, EditorSnapshot, HostSearchResponse, OpenEditSessionResponse,
    PeopleSearchResponse, SubmitResponse, apply_edit, get_snapshot, open_edit_session_response,
    search_hosts, search_people, submit_edit_session, view_booking,
};
use newsdesk_domain::{BookingDraft, ValidationReport};
use newsdesk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use session::ViewerContext;

/// Newsdesk Server - HTTP server for newsroom booking edits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Turn phone appearances off for every booking
    #[arg(long, env = "NEWSDESK_DISABLE_PHONE")]
    disable_phone: bool,
}

/// Open edit sessions keyed by session id.
type SessionRegistry = HashMap<String, EditSession>;

/// Application state shared across handlers.
///
/// Handlers that need both locks take `sessions` before `persistence`.
#[derive(Clone)]
struct AppState {
    /// The booking store and person directory.
    persistence: Arc<Mutex<Persistence>>,
    /// Open edit sessions.
    sessions: Arc<Mutex<SessionRegistry>>,
    /// Feature flags applied to every editor.
    options: EditorOptions,
}

/// Query parameters for the host search endpoint.
#[derive(Debug, Deserialize)]
struct HostSearchQuery {
    /// Name fragment to search for.
    #[serde(default)]
    term: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Field violations, for failed validation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    report: Option<ValidationReport>,
    /// Whether repeating the request may succeed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field violations, for failed validation only.
    report: Option<ValidationReport>,
    /// Whether repeating the request may succeed.
    retryable: Option<bool>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            report: None,
            retryable: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            report: self.report,
            retryable: self.retryable,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::InvalidInput { .. } | ApiError::ShapeViolation { .. } => {
                Self::new(StatusCode::BAD_REQUEST, message)
            }
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::ValidationFailed { report, .. } => Self {
                report: Some(report),
                ..Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            },
            ApiError::SubmitInProgress => Self::new(StatusCode::CONFLICT, message),
            ApiError::PersistenceFailed { retryable, .. } => {
                error!(error = %message, "Save failed");
                Self {
                    retryable: Some(retryable),
                    ..Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
                }
            }
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

fn session_not_found(session_id: &str) -> HttpError {
    HttpError::from(ApiError::ResourceNotFound {
        resource_type: String::from("Edit session"),
        message: format!("Edit session '{session_id}' does not exist"),
    })
}

/// Handler for GET `/bookings/{booking_id}`.
///
/// Returns the stored booking with every guest's effective connection.
async fn handle_view_booking(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingView>, HttpError> {
    info!(booking_id = %booking_id, user_id = %viewer.user_id, "Handling view_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let view: BookingView =
        view_booking(&mut *persistence, &viewer, &booking_id, app_state.options)?;

    Ok(Json(view))
}

/// Handler for POST `/bookings/{booking_id}/edit`.
///
/// Opens an edit session owned by the requesting viewer.
async fn handle_open_edit_session(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(booking_id): Path<String>,
) -> Result<Json<OpenEditSessionResponse>, HttpError> {
    info!(booking_id = %booking_id, user_id = %viewer.user_id, "Handling open_edit_session request");

    let mut sessions = app_state.sessions.lock().await;
    let mut persistence = app_state.persistence.lock().await;
    let (session, response) =
        open_edit_session_response(&mut *persistence, &viewer, &booking_id, app_state.options)?;
    drop(persistence);

    sessions.insert(response.session_id.clone(), session);
    Ok(Json(response))
}

/// Handler for GET `/edit/{session_id}`.
async fn handle_get_edit_session(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(session_id): Path<String>,
) -> Result<Json<EditorSnapshot>, HttpError> {
    info!(session_id = %session_id, user_id = %viewer.user_id, "Handling get_edit_session request");

    let sessions = app_state.sessions.lock().await;
    let session: &EditSession = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(&session_id))?;

    Ok(Json(get_snapshot(session, &viewer)?))
}

/// Handler for POST `/edit/{session_id}/commands`.
///
/// Applies one edit command to the session's draft.
async fn handle_apply_command(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(session_id): Path<String>,
    Json(command): Json<EditCommand>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(
        session_id = %session_id,
        user_id = %viewer.user_id,
        command = command.name(),
        "Handling apply_command request"
    );

    let mut sessions = app_state.sessions.lock().await;
    let session: &mut EditSession = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(&session_id))?;

    Ok(Json(apply_edit(session, &viewer, command)?))
}

/// Handler for POST `/edit/{session_id}/submit`.
///
/// Saves the session. The session stays open after success and after
/// failure.
async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(session_id): Path<String>,
) -> Result<Json<SubmitResponse>, HttpError> {
    info!(session_id = %session_id, user_id = %viewer.user_id, "Handling submit request");

    let mut sessions = app_state.sessions.lock().await;
    let session: &mut EditSession = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(&session_id))?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(submit_edit_session(
        &mut *persistence,
        session,
        &viewer,
    )?))
}

/// Handler for DELETE `/edit/{session_id}`.
///
/// Discards the session and every unsaved change in it.
async fn handle_discard_edit_session(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Path(session_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(session_id = %session_id, user_id = %viewer.user_id, "Handling discard request");

    let mut sessions = app_state.sessions.lock().await;
    let session: &EditSession = sessions
        .get(&session_id)
        .ok_or_else(|| session_not_found(&session_id))?;
    AuthorizationService::authorize_session_owner(&viewer, session.owner_id())
        .map_err(ApiError::from)?;

    sessions.remove(&session_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/directory/people`.
///
/// When `session_id` is given, people already on that session's roster
/// are flagged.
async fn handle_search_people(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Query(request): Query<DirectorySearchRequest>,
) -> Result<Json<PeopleSearchResponse>, HttpError> {
    info!(term = %request.term, mode = ?request.mode, "Handling search_people request");

    let roster: Option<BookingDraft> = match request.session_id.as_deref() {
        Some(session_id) => {
            let sessions = app_state.sessions.lock().await;
            let session: &EditSession = sessions
                .get(session_id)
                .ok_or_else(|| session_not_found(session_id))?;
            Some(get_snapshot(session, &viewer)?.draft)
        }
        None => None,
    };

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(search_people(
        &mut *persistence,
        &viewer,
        &request,
        roster.as_ref(),
    )?))
}

/// Handler for GET `/directory/hosts`.
async fn handle_search_hosts(
    AxumState(app_state): AxumState<AppState>,
    ViewerContext(viewer): ViewerContext,
    Query(query): Query<HostSearchQuery>,
) -> Result<Json<HostSearchResponse>, HttpError> {
    info!(term = %query.term, "Handling search_hosts request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(search_hosts(&mut *persistence, &viewer, &query.term)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/bookings/{booking_id}", get(handle_view_booking))
        .route("/bookings/{booking_id}/edit", post(handle_open_edit_session))
        .route(
            "/edit/{session_id}",
            get(handle_get_edit_session).delete(handle_discard_edit_session),
        )
        .route("/edit/{session_id}/commands", post(handle_apply_command))
        .route("/edit/{session_id}/submit", post(handle_submit))
        .route("/directory/people", get(handle_search_people))
        .route("/directory/hosts", get(handle_search_hosts))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Newsdesk Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let options: EditorOptions = EditorOptions {
        phone_enabled: !args.disable_phone,
    };
    info!(phone_enabled = options.phone_enabled, "Editor options");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        sessions: Arc::new(Mutex::new(HashMap::new())),
        options,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use newsdesk::CommandOutcome;
    use newsdesk_domain::{
        AccessProvisioning, AppearanceScope, AppearanceType, BookingRecord, GuestRecord,
        PersonKind, PersonRef,
    };
    use tower::ServiceExt;

    fn create_test_guest_record(id: &str, person_id: &str, order: i32) -> GuestRecord {
        GuestRecord {
            id: id.to_string(),
            person: PersonRef::new(person_id, &format!("Person {person_id}"), PersonKind::Expert),
            order,
            appearance_type: Some(AppearanceType::Online),
            join_url: None,
            venue_name: None,
            venue_address: None,
            dial_info: None,
        }
    }

    fn create_test_record() -> BookingRecord {
        BookingRecord {
            id: String::from("booking-1"),
            organization_id: String::from("org-1"),
            subject: String::from("Election night panel"),
            newsroom_name: String::from("Metro Desk"),
            start_at: String::from("2026-11-03T18:00:00Z"),
            duration_minutes: 45,
            appearance_scope: Some(AppearanceScope::Unified),
            access_provisioning: Some(AccessProvisioning::Shared),
            appearance_type: Some(AppearanceType::Online),
            location_url: Some(String::from("https://meet.example/abc")),
            location_name: None,
            location_address: None,
            dial_info: None,
            host: None,
            program_name: None,
            talking_points: None,
            guests: vec![
                create_test_guest_record("guest-1", "e-1", 0),
                create_test_guest_record("guest-2", "e-2", 1),
            ],
        }
    }

    /// Helper to create test app state with a seeded in-memory database.
    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence.create_booking(&create_test_record()).unwrap();
        persistence
            .upsert_person(
                &PersonRef::new("e-1", "Ana Alvarez", PersonKind::Expert),
                false,
            )
            .unwrap();
        persistence
            .upsert_person(
                &PersonRef::new("r-1", "Ana Brooks", PersonKind::Reporter),
                true,
            )
            .unwrap();

        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            options: EditorOptions::default(),
        }
    }

    fn request(method: &str, uri: &str, user_id: &str, role: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header(session::VIEWER_ID_HEADER, user_id)
            .header(session::VIEWER_ROLE_HEADER, role)
            .header(session::VIEWER_ORGS_HEADER, "org-1, org-2")
            .body(body)
            .unwrap()
    }

    fn producer_request(method: &str, uri: &str, body: Body) -> Request<Body> {
        request(method, uri, "producer-1", "producer", body)
    }

    fn command_body(command: &EditCommand) -> Body {
        Body::from(serde_json::to_string(command).unwrap())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn open_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(producer_request(
                "POST",
                "/bookings/booking-1/edit",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let opened: OpenEditSessionResponse = read_json(response).await;
        opened.session_id
    }

    #[tokio::test]
    async fn test_view_booking_returns_resolved_guests() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(request(
                "GET",
                "/bookings/booking-1",
                "contrib-1",
                "contributor",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: BookingView = read_json(response).await;
        assert_eq!(view.guests.len(), 2);
        assert!(view.guests.iter().all(|g| g.connection.used_fallback));
    }

    #[tokio::test]
    async fn test_missing_viewer_headers_is_unauthorized() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/bookings/booking-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(producer_request("GET", "/bookings/booking-404", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.error);
    }

    #[tokio::test]
    async fn test_contributor_cannot_open_edit_session() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(request(
                "POST",
                "/bookings/booking-1/edit",
                "contrib-1",
                "contributor",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.message.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_edit_and_submit_round_trip() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let session_id: String = open_session(&app).await;

        let response = app
            .clone()
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/commands"),
                command_body(&EditCommand::SetSubject {
                    value: String::from("Recount coverage"),
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let applied: CommandResponse = read_json(response).await;
        assert_eq!(applied.outcome, CommandOutcome::Applied);

        let response = app
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/submit"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let submitted: SubmitResponse = read_json(response).await;
        assert_eq!(submitted.booking.subject, "Recount coverage");

        let stored: BookingRecord = app_state
            .persistence
            .lock()
            .await
            .load_booking("booking-1")
            .unwrap();
        assert_eq!(stored.subject, "Recount coverage");
    }

    #[tokio::test]
    async fn test_submit_with_missing_links_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let session_id: String = open_session(&app).await;

        app.clone()
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/commands"),
                command_body(&EditCommand::SetAccessProvisioning {
                    provisioning: AccessProvisioning::PerGuest,
                }),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/submit"),
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let error_response: ErrorResponse = read_json(response).await;
        assert!(error_response.message.starts_with("Fix 2 items:"));
        assert_eq!(error_response.report.unwrap().guest_errors.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_with_bad_start_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let session_id: String = open_session(&app).await;

        app.clone()
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/commands"),
                command_body(&EditCommand::SetStartAt {
                    value: String::from("next tuesday"),
                }),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(producer_request(
                "POST",
                &format!("/edit/{session_id}/submit"),
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_other_viewer_cannot_use_session() {
        let app: Router = build_router(create_test_app_state());
        let session_id: String = open_session(&app).await;

        let response = app
            .oneshot(request(
                "GET",
                &format!("/edit/{session_id}"),
                "producer-2",
                "producer",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_discarded_session_is_gone() {
        let app: Router = build_router(create_test_app_state());
        let session_id: String = open_session(&app).await;

        let response = app
            .clone()
            .oneshot(producer_request(
                "DELETE",
                &format!("/edit/{session_id}"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NO_CONTENT);

        let response = app
            .oneshot(producer_request(
                "GET",
                &format!("/edit/{session_id}"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_search_flags_roster_members() {
        let app: Router = build_router(create_test_app_state());
        let session_id: String = open_session(&app).await;

        let response = app
            .oneshot(producer_request(
                "GET",
                &format!("/directory/people?term=ana&mode=all&session_id={session_id}"),
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let results: PeopleSearchResponse = read_json(response).await;
        let flagged: Vec<(String, bool)> = results
            .candidates
            .into_iter()
            .map(|c| (c.id, c.already_added))
            .collect();
        assert_eq!(
            flagged,
            vec![(String::from("e-1"), true), (String::from("r-1"), false)]
        );
    }

    #[tokio::test]
    async fn test_directory_search_rejects_half_window() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(producer_request(
                "GET",
                "/directory/people?term=ana&from=2026-11-03T18:00:00Z",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_host_search() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(producer_request(
                "GET",
                "/directory/hosts?term=ana",
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let results: HostSearchResponse = read_json(response).await;
        assert_eq!(results.hosts.len(), 1);
        assert_eq!(results.hosts[0].id, "r-1");
    }
}
