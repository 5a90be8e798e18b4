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

mod directory;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use matchday::Engine;
use matchday_api::{
    ApiError, AuditTrailResponse, CreateTournamentRequest, DeleteTournamentResponse,
    GenerateFixturesResponse, ListMatchesResponse, ListTournamentsResponse, MatchResultResponse,
    OrphanScanResponse, PurgeOrphansResponse, RequestContext, RunLotteryResponse,
    SetDrawPoolRequest, SetResultRequest, SetRosterRequest, StandingsResponse,
    TournamentDetailResponse, TournamentResponse, create_tournament, delete_tournament,
    finish_tournament, generate_fixtures, get_audit_trail, get_standings, get_tournament_detail,
    list_matches, list_tournaments, purge_orphans, reset_tournament, run_lottery, scan_orphans,
    set_draw_pool, set_result, set_roster, undo_result,
};
use matchday_domain::ErrorKind;
use matchday_persistence::SqlitePersistence;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::directory::{ParticipantNames, load_directory};

/// Matchday Server - HTTP server for the Matchday tournament engine
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
    bind: IpAddr,

    /// JSON file mapping participant identifiers to display names
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Seed for lottery draws. Draws are unpredictable when omitted.
    #[arg(long)]
    lottery_seed: Option<u64>,
}

/// Application state shared across handlers.
///
/// The engine is wrapped in a Mutex so that one request mutates the store
/// at a time.
#[derive(Clone)]
struct AppState {
    /// The engine over the persistence layer.
    engine: Arc<Mutex<Engine<SqlitePersistence>>>,
    /// Random source for lottery draws.
    rng: Arc<Mutex<StdRng>>,
    /// Display names for standings.
    directory: Arc<ParticipantNames>,
}

/// Audit attribution carried by every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Attribution {
    /// The operator performing the action.
    actor_id: String,
    /// Correlation identifier; defaults to the operation name.
    #[serde(default)]
    cause_id: Option<String>,
    /// Why the action is being performed.
    cause_description: String,
}

impl Attribution {
    fn into_context(self, operation: &str) -> RequestContext {
        RequestContext {
            actor_id: self.actor_id,
            cause_id: self.cause_id.unwrap_or_else(|| operation.to_string()),
            cause_description: self.cause_description,
        }
    }
}

/// API request for creating a tournament.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTournamentApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// Display name.
    name: String,
    /// `lottery` or `users_only`.
    format: String,
}

/// API request for replacing a roster.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetRosterApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// Participant identifiers in roster order.
    participants: Vec<String>,
}

/// API request for replacing a draw pool.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetDrawPoolApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// Team identifiers.
    teams: Vec<String>,
}

/// API request for recording a result.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetResultApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// Home goals.
    #[serde(default)]
    score_a: Option<f64>,
    /// Away goals.
    #[serde(default)]
    score_b: Option<f64>,
}

/// API request for actions that need only attribution.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AdminActionRequest {
    #[serde(flatten)]
    attribution: Attribution,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Precondition => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Locked => StatusCode::LOCKED,
            ErrorKind::Internal => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Handler for POST `/tournaments`.
async fn handle_create_tournament(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTournamentApiRequest>,
) -> Result<Json<TournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        name = %req.name,
        format = %req.format,
        "Handling create_tournament request"
    );

    let context: RequestContext = req.attribution.into_context("create_tournament");
    let request: CreateTournamentRequest = CreateTournamentRequest {
        name: req.name,
        format: req.format,
    };

    let mut engine = app_state.engine.lock().await;
    let response: TournamentResponse = create_tournament(&mut *engine, &request, &context)?;
    Ok(Json(response))
}

/// Handler for GET `/tournaments`.
async fn handle_list_tournaments(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListTournamentsResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(list_tournaments(&mut *engine)?))
}

/// Handler for GET `/tournaments/{id}`.
async fn handle_get_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<TournamentDetailResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_tournament_detail(&mut *engine, &tournament_id)?))
}

/// Handler for DELETE `/tournaments/{id}`.
async fn handle_delete_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<DeleteTournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        "Handling delete_tournament request"
    );

    let context: RequestContext = req.attribution.into_context("delete_tournament");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(delete_tournament(
        &mut *engine,
        &tournament_id,
        &context,
    )?))
}

// ============================================================================
// Setup
// ============================================================================

/// Handler for POST `/tournaments/{id}/roster`.
async fn handle_set_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<SetRosterApiRequest>,
) -> Result<Json<TournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        participants = req.participants.len(),
        "Handling set_roster request"
    );

    let context: RequestContext = req.attribution.into_context("set_roster");
    let request: SetRosterRequest = SetRosterRequest {
        participants: req.participants,
    };
    let mut engine = app_state.engine.lock().await;
    Ok(Json(set_roster(
        &mut *engine,
        &tournament_id,
        &request,
        &context,
    )?))
}

/// Handler for POST `/tournaments/{id}/draw_pool`.
async fn handle_set_draw_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<SetDrawPoolApiRequest>,
) -> Result<Json<TournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        teams = req.teams.len(),
        "Handling set_draw_pool request"
    );

    let context: RequestContext = req.attribution.into_context("set_draw_pool");
    let request: SetDrawPoolRequest = SetDrawPoolRequest { teams: req.teams };
    let mut engine = app_state.engine.lock().await;
    Ok(Json(set_draw_pool(
        &mut *engine,
        &tournament_id,
        &request,
        &context,
    )?))
}

/// Handler for POST `/tournaments/{id}/lottery`.
async fn handle_run_lottery(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<RunLotteryResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        "Handling run_lottery request"
    );

    let context: RequestContext = req.attribution.into_context("run_lottery");
    let mut engine = app_state.engine.lock().await;
    let mut rng = app_state.rng.lock().await;
    Ok(Json(run_lottery(
        &mut *engine,
        &tournament_id,
        &mut *rng,
        &context,
    )?))
}

/// Handler for POST `/tournaments/{id}/fixtures`.
async fn handle_generate_fixtures(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<GenerateFixturesResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        "Handling generate_fixtures request"
    );

    let context: RequestContext = req.attribution.into_context("generate_fixtures");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(generate_fixtures(
        &mut *engine,
        &tournament_id,
        &context,
    )?))
}

// ============================================================================
// Results and standings
// ============================================================================

/// Handler for GET `/tournaments/{id}/matches`.
async fn handle_list_matches(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<ListMatchesResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(list_matches(&mut *engine, &tournament_id)?))
}

/// Handler for POST `/matches/{id}/result`.
async fn handle_set_result(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<String>,
    Json(req): Json<SetResultApiRequest>,
) -> Result<Json<MatchResultResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        match_id = %match_id,
        "Handling set_result request"
    );

    let context: RequestContext = req.attribution.into_context("set_result");
    let request: SetResultRequest = SetResultRequest {
        score_a: req.score_a,
        score_b: req.score_b,
    };
    let mut engine = app_state.engine.lock().await;
    Ok(Json(set_result(&mut *engine, &match_id, &request, &context)?))
}

/// Handler for POST `/matches/{id}/undo`.
async fn handle_undo_result(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<MatchResultResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        match_id = %match_id,
        "Handling undo_result request"
    );

    let context: RequestContext = req.attribution.into_context("undo_result");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(undo_result(&mut *engine, &match_id, &context)?))
}

/// Handler for GET `/tournaments/{id}/standings`.
async fn handle_get_standings(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<StandingsResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_standings(
        &mut *engine,
        &tournament_id,
        app_state.directory.as_ref(),
    )?))
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Handler for POST `/tournaments/{id}/finish`.
async fn handle_finish_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<TournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        "Handling finish_tournament request"
    );

    let context: RequestContext = req.attribution.into_context("finish_tournament");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(finish_tournament(
        &mut *engine,
        &tournament_id,
        &context,
    )?))
}

/// Handler for POST `/tournaments/{id}/reset`.
async fn handle_reset_tournament(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<TournamentResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        tournament_id = %tournament_id,
        "Handling reset_tournament request"
    );

    let context: RequestContext = req.attribution.into_context("reset_tournament");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(reset_tournament(
        &mut *engine,
        &tournament_id,
        &context,
    )?))
}

// ============================================================================
// Integrity and audit
// ============================================================================

/// Handler for GET `/integrity/orphans`.
async fn handle_scan_orphans(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<OrphanScanResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(scan_orphans(&mut *engine)?))
}

/// Handler for POST `/integrity/orphans/purge`.
async fn handle_purge_orphans(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminActionRequest>,
) -> Result<Json<PurgeOrphansResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        "Handling purge_orphans request"
    );

    let context: RequestContext = req.attribution.into_context("purge_orphans");
    let mut engine = app_state.engine.lock().await;
    Ok(Json(purge_orphans(&mut *engine, &context)?))
}

/// Handler for GET `/tournaments/{id}/audit`.
async fn handle_get_tournament_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(tournament_id): Path<String>,
) -> Result<Json<AuditTrailResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_audit_trail(&mut *engine, Some(&tournament_id))?))
}

/// Handler for GET `/audit`.
async fn handle_get_audit(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AuditTrailResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_audit_trail(&mut *engine, None)?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/tournaments",
            post(handle_create_tournament).get(handle_list_tournaments),
        )
        .route(
            "/tournaments/{id}",
            get(handle_get_tournament).delete(handle_delete_tournament),
        )
        .route("/tournaments/{id}/roster", post(handle_set_roster))
        .route("/tournaments/{id}/draw_pool", post(handle_set_draw_pool))
        .route("/tournaments/{id}/lottery", post(handle_run_lottery))
        .route("/tournaments/{id}/fixtures", post(handle_generate_fixtures))
        .route("/tournaments/{id}/matches", get(handle_list_matches))
        .route("/tournaments/{id}/standings", get(handle_get_standings))
        .route("/tournaments/{id}/finish", post(handle_finish_tournament))
        .route("/tournaments/{id}/reset", post(handle_reset_tournament))
        .route("/tournaments/{id}/audit", get(handle_get_tournament_audit))
        .route("/matches/{id}/result", post(handle_set_result))
        .route("/matches/{id}/undo", post(handle_undo_result))
        .route("/integrity/orphans", get(handle_scan_orphans))
        .route("/integrity/orphans/purge", post(handle_purge_orphans))
        .route("/audit", get(handle_get_audit))
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

    info!("Initializing Matchday Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let directory: ParticipantNames = if let Some(path) = &args.directory {
        let names: ParticipantNames = load_directory(path)?;
        info!(entries = names.len(), "Loaded participant directory");
        names
    } else {
        ParticipantNames::new()
    };

    let seed: u64 = args.lottery_seed.unwrap_or_else(rand::random::<u64>);

    let app_state: AppState = AppState {
        engine: Arc::new(Mutex::new(Engine::new(persistence))),
        rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        directory: Arc::new(directory),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
