//! REST API: JSON endpoints over the session store and turn engine.
//!
//! Handlers resolve the session, run one engine operation under the store
//! lock, and serialize the outcome. The per-turn roll / build / advance
//! choreography is left to clients; the engine enforces only what
//! `GameState` itself records.

use crate::session::{SessionError, SessionStore};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use richman_rules::{CellEffect, Player, RollResult, RulesError};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared state injected into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The session store serving this process.
    pub store: SessionStore,
}

/// Request carrying only a session id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Target session.
    pub session_id: String,
}

/// Request to initialize a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitGameRequest {
    /// Target session.
    pub session_id: String,
    /// Number of players, 1 through 6.
    pub player_count: usize,
}

/// Response to session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    /// The freshly allocated session id.
    pub session_id: String,
}

/// Acknowledgement carrying only a success flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    /// Always true on the success path.
    pub success: bool,
}

/// Response to game initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitGameResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The freshly created players.
    pub players: Vec<Player>,
    /// Index of the player whose turn it is.
    pub current_player: usize,
}

/// Response to a clear-skip call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSkipResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The player whose flag was cleared.
    pub player_id: usize,
}

/// Response to building a house.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildHouseResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The builder.
    pub player_id: usize,
    /// Cell the house was built on.
    pub position: usize,
    /// The builder's new house count on that cell.
    pub house_count: u32,
    /// Snapshot of the builder's houses.
    pub houses: std::collections::BTreeMap<usize, u32>,
}

/// Response to a turn advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPlayerResponse {
    /// Index of the new current player.
    pub current_player: usize,
    /// The new current player.
    pub player: Player,
}

/// Query parameters for the state and board endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    /// Target session.
    pub session_id: String,
}

/// Full game state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    /// Number of cells on the board.
    pub board_size: usize,
    /// The players in turn order.
    pub players: Vec<Player>,
    /// Index of the player whose turn it is.
    pub current_player_index: usize,
    /// Whether the game has been initialized.
    pub is_game_started: bool,
}

/// One cell in the board description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    /// Cell index.
    pub position: usize,
    /// The cell's effect.
    pub effect: CellEffect,
    /// Display label, empty for plain cells.
    pub label: String,
}

/// Board layout for client rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Number of cells on the board.
    pub board_size: usize,
    /// Number of dice drawn per roll.
    pub dice_count: usize,
    /// The full cell table.
    pub cells: Vec<CellView>,
}

/// API failure surfaced as a structured JSON error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let status = match err {
            SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SessionError::InvalidSession { .. } => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<RulesError> for ApiError {
    fn from(err: RulesError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, message = %self.message, "request failed");
        (
            self.status,
            Json(serde_json::json!({"error": self.message})),
        )
            .into_response()
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/create-session", post(create_session))
        .route("/api/delete-session", post(delete_session))
        .route("/api/init-game", post(init_game))
        .route("/api/roll-dice", post(roll_dice))
        .route("/api/clear-skip", post(clear_skip))
        .route("/api/build-house", post(build_house))
        .route("/api/next-player", post(next_player))
        .route("/api/game-state", get(game_state))
        .route("/api/board", get(board))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.store.create_session();
    Json(CreateSessionResponse { session_id })
}

async fn delete_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    state.store.delete_session(&req.session_id)?;
    Ok(Json(AckResponse { success: true }))
}

async fn init_game(
    State(state): State<AppState>,
    Json(req): Json<InitGameRequest>,
) -> Result<Json<InitGameResponse>, ApiError> {
    let (players, current_player) = state.store.with_game(&req.session_id, |game| {
        game.initialize(req.player_count)?;
        Ok::<_, RulesError>((game.players().to_vec(), game.current_player_index()))
    })??;

    Ok(Json(InitGameResponse {
        success: true,
        players,
        current_player,
    }))
}

async fn roll_dice(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<RollResult>, ApiError> {
    let roll = state
        .store
        .with_game(&req.session_id, |game| {
            game.roll_dice(&mut rand::thread_rng())
        })??;
    Ok(Json(roll))
}

async fn clear_skip(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ClearSkipResponse>, ApiError> {
    let player_id = state
        .store
        .with_game(&req.session_id, |game| game.clear_skip())??;
    Ok(Json(ClearSkipResponse {
        success: true,
        player_id,
    }))
}

async fn build_house(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<BuildHouseResponse>, ApiError> {
    let build = state
        .store
        .with_game(&req.session_id, |game| game.build_house())??;
    Ok(Json(BuildHouseResponse {
        success: true,
        player_id: build.player_id,
        position: build.position,
        house_count: build.house_count,
        houses: build.houses,
    }))
}

async fn next_player(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<NextPlayerResponse>, ApiError> {
    let (current_player, player) = state.store.with_game(&req.session_id, |game| {
        let index = game.next_player()?;
        Ok::<_, RulesError>((index, game.players()[index].clone()))
    })??;

    Ok(Json(NextPlayerResponse {
        current_player,
        player,
    }))
}

async fn game_state(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let snapshot = state.store.with_game(&query.session_id, |game| {
        GameStateResponse {
            board_size: game.ruleset().board_size(),
            players: game.players().to_vec(),
            current_player_index: game.current_player_index(),
            is_game_started: game.started(),
        }
    })?;
    Ok(Json(snapshot))
}

async fn board(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<BoardResponse>, ApiError> {
    let layout = state.store.with_game(&query.session_id, |game| {
        let ruleset = game.ruleset();
        BoardResponse {
            board_size: ruleset.board_size(),
            dice_count: ruleset.dice_count(),
            cells: ruleset
                .cells()
                .iter()
                .enumerate()
                .map(|(position, cell)| CellView {
                    position,
                    effect: cell.effect,
                    label: cell.effect.label().to_string(),
                })
                .collect(),
        }
    })?;
    Ok(Json(layout))
}
