//! REST API over [`TournamentManager`]: routes, request/response bodies, error mapping.

use crate::manager::{NewTournament, TournamentManager};
use crate::models::{
    MatchResult, Tournament, TournamentError, TournamentFormat, TournamentId, TournamentStatus,
};
use actix_web::{
    error::InternalError,
    get,
    http::StatusCode,
    post, put,
    web::{self, Data, Json, Path, Query},
    HttpResponse, Responder,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shared engine handle injected into every handler.
pub type AppState = Data<TournamentManager>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    status: u16,
}

/// Read-only projection of a tournament.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetails {
    pub id: TournamentId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(rename = "type")]
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub registered_players: usize,
    pub current_round: u32,
    pub total_rounds: u32,
}

impl From<&Tournament> for TournamentDetails {
    fn from(t: &Tournament) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            description: t.description.clone(),
            start_date: t.start_date,
            format: t.format,
            status: t.status,
            registered_players: t.players.len(),
            current_round: t.current_round(),
            total_rounds: t.total_rounds(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    description: String,
    start_date: NaiveDate,
    #[serde(rename = "type", alias = "format")]
    format: TournamentFormat,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPlayerBody {
    #[serde(alias = "name")]
    player_name: String,
    rating: i64,
}

#[derive(Deserialize)]
struct RecordResultBody {
    result: MatchResult,
}

fn default_round() -> u32 {
    1
}

#[derive(Deserialize)]
struct PairingsQuery {
    #[serde(default = "default_round")]
    round: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id, round number and 0-based pairing index.
#[derive(Deserialize)]
struct PairingPath {
    id: TournamentId,
    round: u32,
    index: usize,
}

fn status_for(err: &TournamentError) -> StatusCode {
    match err {
        TournamentError::Validation(_) => StatusCode::BAD_REQUEST,
        TournamentError::NotFound(_) => StatusCode::NOT_FOUND,
        TournamentError::InvalidState { .. }
        | TournamentError::DuplicatePlayer(_)
        | TournamentError::InsufficientPlayers { .. }
        | TournamentError::AlreadyRecorded { .. }
        | TournamentError::NotReady(_) => StatusCode::CONFLICT,
        TournamentError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
        TournamentError::Defect(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map an engine error to its HTTP response. Defects are not described to the client;
/// the manager has already logged them.
pub fn error_response(err: &TournamentError) -> HttpResponse {
    let status = status_for(err);
    let message = if err.is_defect() {
        "An unexpected error occurred".to_string()
    } else {
        err.to_string()
    };
    HttpResponse::build(status).json(ErrorBody {
        code: err.code(),
        message,
        status: status.as_u16(),
    })
}

fn details(t: &Tournament) -> HttpResponse {
    HttpResponse::Ok().json(TournamentDetails::from(t))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "chess-tournament-manager",
    })
}

/// Create a tournament; responds with its id.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let new = NewTournament {
        name: body.name,
        description: body.description,
        start_date: body.start_date,
        format: body.format,
    };
    match state.create_tournament(new) {
        Ok(t) => HttpResponse::Created().json(t.id),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let all: Vec<TournamentDetails> = state
        .tournaments()
        .iter()
        .map(|t| TournamentDetails::from(t.as_ref()))
        .collect();
    HttpResponse::Ok().json(all)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.tournament(path.id) {
        Ok(t) => details(&t),
        Err(e) => error_response(&e),
    }
}

/// Register a player (tournament must be Planned); responds with the player id.
#[post("/api/tournaments/{id}/players")]
async fn api_register_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterPlayerBody>,
) -> HttpResponse {
    match state
        .register_player(path.id, &body.player_name, body.rating)
        .await
    {
        Ok(player_id) => HttpResponse::Created().json(player_id),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/players")]
async fn api_get_players(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.players(path.id) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(&e),
    }
}

/// Start the tournament (Planned -> InProgress, round 1 generated).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.start(path.id).await {
        Ok(t) => details(&t),
        Err(e) => error_response(&e),
    }
}

#[post("/api/tournaments/{id}/cancel")]
async fn api_cancel_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.cancel(path.id).await {
        Ok(t) => details(&t),
        Err(e) => error_response(&e),
    }
}

/// Pairings of `?round=N` (default 1); empty list if the round is not generated yet.
#[get("/api/tournaments/{id}/pairings")]
async fn api_get_pairings(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<PairingsQuery>,
) -> HttpResponse {
    match state.pairings(path.id, query.round) {
        Ok(pairings) => HttpResponse::Ok().json(pairings),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.rounds(path.id) {
        Ok(rounds) => HttpResponse::Ok().json(rounds),
        Err(e) => error_response(&e),
    }
}

/// Record a result; responds with the updated round.
#[put("/api/tournaments/{id}/rounds/{round}/pairings/{index}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<PairingPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    match state
        .record_result(path.id, path.round, path.index, body.result)
        .await
    {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.standings(path.id) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(&e),
    }
}

/// Answer an extractor failure (body, path or query) with the engine's error shape.
fn malformed_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(ErrorBody {
        code: "VALIDATION_ERROR",
        message: err.to_string(),
        status: StatusCode::BAD_REQUEST.as_u16(),
    });
    InternalError::from_response(err, response).into()
}

/// Register every route plus extractor error handlers, so malformed bodies, ids
/// and query strings get the same error shape as engine errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| malformed_request(err));
    let path_config = web::PathConfig::default().error_handler(|err, _req| malformed_request(err));
    let query_config =
        web::QueryConfig::default().error_handler(|err, _req| malformed_request(err));
    cfg.app_data(json_config)
        .app_data(path_config)
        .app_data(query_config)
        .service(api_health)
        .service(api_create_tournament)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_register_player)
        .service(api_get_players)
        .service(api_start_tournament)
        .service(api_cancel_tournament)
        .service(api_get_pairings)
        .service(api_get_rounds)
        .service(api_record_result)
        .service(api_get_standings);
}
