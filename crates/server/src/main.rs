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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use efetivo_api::{
    AbsenceRequest, AbsenceResponse, ApiError, AuthenticatedActor, AvailabilityRequest,
    AvailabilityResponse, ConflictingAbsenceInfo, CreatePersonRequest, DailyAbsencesResponse,
    DeleteResponse, ListPeopleResponse, PersonResponse, SearchAbsencesRequest,
    SearchAbsencesResponse, SetPersonActiveRequest, UpcomingAbsencesRequest,
    UpcomingAbsencesResponse, UpdatePersonRequest, ValidateAbsenceRequest,
    ValidateAbsenceResponse, create_absence, create_person, delete_absence, delete_person,
    get_availability, get_daily_absences, get_upcoming_absences, list_people, search_absences,
    set_person_active, update_absence, update_person, validate_absence,
};
use efetivo_domain::format_iso_date;
use efetivo_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Efetivo Server - HTTP server for absence scheduling and staff availability
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The roster and absence store.
    persistence: Arc<Mutex<Persistence>>,
}

/// A write request: the acting identity plus the operation's own fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The operation's fields.
    #[serde(flatten)]
    body: T,
}

/// A write request with no fields of its own, used by deletes.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// Query parameters naming a single day. Today when absent.
#[derive(Debug, Deserialize)]
struct DayQuery {
    /// The day, `YYYY-MM-DD`.
    date: Option<String>,
    /// Optional shift filter.
    shift: Option<String>,
}

/// Query parameters for the upcoming-absences view.
#[derive(Debug, Deserialize)]
struct UpcomingQuery {
    /// First day of the window. Today when absent.
    from: Option<String>,
    /// Number of days in the window.
    days: Option<u32>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Understaffing warnings awaiting confirmation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    /// The absences behind the warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conflicting_absences: Vec<ConflictingAbsenceInfo>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The response body.
    body: ErrorResponse,
}

impl HttpError {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: true,
                message,
                warnings: Vec::new(),
                conflicting_absences: Vec::new(),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::ConfirmationRequired {
                warnings,
                conflicting_absences,
            } => Self {
                status: StatusCode::CONFLICT,
                body: ErrorResponse {
                    error: true,
                    message,
                    warnings,
                    conflicting_absences,
                },
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Store error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Internal server error"),
                )
            }
        }
    }
}

fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    AuthenticatedActor::from_claims(actor_id, actor_role)
        .map_err(|err| HttpError::from(ApiError::from(err)))
}

/// Today's date in UTC.
fn today() -> String {
    format_iso_date(OffsetDateTime::now_utc().date())
}

// ============================================================================
// People
// ============================================================================

/// Handler for GET `/people` endpoint.
async fn handle_list_people(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListPeopleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPeopleResponse = list_people(&mut *persistence)?;
    Ok(Json(response))
}

/// Handler for POST `/people` endpoint.
async fn handle_create_person(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<CreatePersonRequest>>,
) -> Result<Json<PersonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        rank = %req.body.rank,
        "Handling create_person request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PersonResponse = create_person(&mut *persistence, req.body, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/people/{person_id}` endpoint.
async fn handle_update_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
    Json(req): Json<WriteRequest<UpdatePersonRequest>>,
) -> Result<Json<PersonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        person_id,
        "Handling update_person request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PersonResponse = update_person(&mut *persistence, person_id, req.body, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/people/{person_id}/active` endpoint.
async fn handle_set_person_active(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
    Json(req): Json<WriteRequest<SetPersonActiveRequest>>,
) -> Result<Json<PersonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        person_id,
        active = req.body.active,
        "Handling set_person_active request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PersonResponse =
        set_person_active(&mut *persistence, person_id, req.body, &actor)?;
    Ok(Json(response))
}

/// Handler for DELETE `/people/{person_id}` endpoint.
///
/// Deletes the person and every absence they own.
async fn handle_delete_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        person_id,
        "Handling delete_person request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_person(&mut *persistence, person_id, &actor)?;
    Ok(Json(response))
}

// ============================================================================
// Absences
// ============================================================================

/// Handler for GET `/absences` endpoint.
async fn handle_search_absences(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchAbsencesRequest>,
) -> Result<Json<SearchAbsencesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SearchAbsencesResponse = search_absences(&mut *persistence, &query)?;
    Ok(Json(response))
}

/// Handler for POST `/absences` endpoint.
///
/// Answers 409 with the warnings when the absence needs confirmation.
async fn handle_create_absence(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<AbsenceRequest>>,
) -> Result<Json<AbsenceResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        person_id = req.body.person_id,
        start_date = %req.body.start_date,
        end_date = %req.body.end_date,
        "Handling create_absence request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AbsenceResponse = create_absence(&mut *persistence, &req.body, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/absences/{absence_id}` endpoint.
async fn handle_update_absence(
    AxumState(app_state): AxumState<AppState>,
    Path(absence_id): Path<i64>,
    Json(req): Json<WriteRequest<AbsenceRequest>>,
) -> Result<Json<AbsenceResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        absence_id,
        "Handling update_absence request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AbsenceResponse =
        update_absence(&mut *persistence, absence_id, &req.body, &actor)?;
    Ok(Json(response))
}

/// Handler for DELETE `/absences/{absence_id}` endpoint.
async fn handle_delete_absence(
    AxumState(app_state): AxumState<AppState>,
    Path(absence_id): Path<i64>,
    Json(req): Json<ActorRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        absence_id,
        "Handling delete_absence request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_absence(&mut *persistence, absence_id, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/absences/validate` endpoint.
///
/// Dry run: nothing is written and no role is required.
async fn handle_validate_absence(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ValidateAbsenceRequest>,
) -> Result<Json<ValidateAbsenceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ValidateAbsenceResponse = validate_absence(&mut *persistence, &req)?;
    Ok(Json(response))
}

/// Handler for GET `/absences/daily` endpoint.
async fn handle_daily_absences(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DailyAbsencesResponse>, HttpError> {
    let date: String = query.date.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let response: DailyAbsencesResponse = get_daily_absences(&mut *persistence, &date)?;
    Ok(Json(response))
}

/// Handler for GET `/absences/upcoming` endpoint.
async fn handle_upcoming_absences(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<UpcomingAbsencesResponse>, HttpError> {
    let request: UpcomingAbsencesRequest = UpcomingAbsencesRequest {
        from: query.from.unwrap_or_else(today),
        days: query.days,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UpcomingAbsencesResponse = get_upcoming_absences(&mut *persistence, &request)?;
    Ok(Json(response))
}

// ============================================================================
// Availability
// ============================================================================

/// Handler for GET `/availability` endpoint.
async fn handle_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let request: AvailabilityRequest = AvailabilityRequest {
        date: query.date.unwrap_or_else(today),
        shift: query.shift,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilityResponse = get_availability(&mut *persistence, &request)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/people", get(handle_list_people).post(handle_create_person))
        .route(
            "/people/{person_id}",
            post(handle_update_person).delete(handle_delete_person),
        )
        .route("/people/{person_id}/active", post(handle_set_person_active))
        .route(
            "/absences",
            get(handle_search_absences).post(handle_create_absence),
        )
        .route("/absences/validate", post(handle_validate_absence))
        .route("/absences/daily", get(handle_daily_absences))
        .route("/absences/upcoming", get(handle_upcoming_absences))
        .route(
            "/absences/{absence_id}",
            post(handle_update_absence).delete(handle_delete_absence),
        )
        .route("/availability", get(handle_availability))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Efetivo Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
