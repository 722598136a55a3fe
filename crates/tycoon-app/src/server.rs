// HTTP API: season simulation, the GOAT leaderboard, and static files.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::services::ServeDir;
use tracing::{error, info};

use tycoon_basketball::{simulate_season, SeasonResult};
use tycoon_core::config::{Config, LeaderboardConfig};
use tycoon_core::{Database, LeaderboardEntry, LeaderboardStore, NewLeaderboardEntry};

use crate::request::SimulationRequest;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Storage failed; the client sees `message`, the cause is only logged.
    #[error("{message}")]
    Storage {
        message: &'static str,
        cause: anyhow::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage { message, cause } => error!("{message}: {cause:#}"),
            ApiError::Internal(message) => error!("Internal error: {message}"),
            ApiError::BadRequest(message) => info!("Rejected request: {message}"),
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn storage(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |cause| ApiError::Storage { message, cause }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Shared service state. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeaderboardStore>,
    pub leaderboard: LeaderboardConfig,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl AppState {
    /// `seed` fixes the master generator; `None` picks a random seed, which
    /// is logged so a session can be replayed.
    pub fn new(
        store: Arc<dyn LeaderboardStore>,
        leaderboard: LeaderboardConfig,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        info!("Simulation master seed: {seed}");
        AppState {
            store,
            leaderboard,
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// Derive an independent generator for one request. The master lock is
    /// held only for the single draw.
    fn request_rng(&self) -> Result<ChaCha8Rng, ApiError> {
        let mut master = self
            .rng
            .lock()
            .map_err(|_| ApiError::Internal("generator mutex poisoned".into()))?;
        Ok(ChaCha8Rng::seed_from_u64(master.gen()))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/simulate-season
async fn simulate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SeasonResult>, ApiError> {
    let request =
        SimulationRequest::from_json(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let mut rng = state.request_rng()?;
    let result = simulate_season(&request.player, request.season, &mut rng);
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<String>,
}

/// GET /api/goat-leaderboard?limit=N
async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let requested = query.limit.and_then(|raw| raw.trim().parse::<usize>().ok());
    let limit = state.leaderboard.resolve_limit(requested);
    let entries = state
        .store
        .top_entries(limit)
        .map_err(storage("Failed to retrieve leaderboard"))?;
    Ok(Json(entries))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionResponse {
    success: bool,
    player: LeaderboardEntry,
    rank: u64,
    total_players: u64,
}

/// POST /api/goat-leaderboard
async fn submit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let entry =
        NewLeaderboardEntry::from_json(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    info!(
        "Adding {} to the leaderboard with {} legacy points",
        entry.player_name, entry.legacy_points
    );

    const FAILED: &str = "Failed to add player to leaderboard";
    let player = state.store.add_entry(&entry).map_err(storage(FAILED))?;
    let rank = state
        .store
        .rank_for_score(entry.legacy_points)
        .map_err(storage(FAILED))?;
    let total_players = state.store.total_count().map_err(storage(FAILED))?;

    Ok(Json(SubmissionResponse {
        success: true,
        player,
        rank,
        total_players,
    }))
}

// ---------------------------------------------------------------------------
// Router / serving
// ---------------------------------------------------------------------------

/// Build the router. Every path outside `/api` is served from `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/simulate-season", post(simulate))
        .route("/api/goat-leaderboard", get(leaderboard).post(submit))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Open the store, bind, and serve until the process is stopped.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path).context("failed to open database")?;
    info!("Leaderboard database opened at {}", config.database.path);

    let state = AppState::new(
        Arc::new(db),
        config.leaderboard.clone(),
        config.simulation.seed,
    );
    let app = router(state, Path::new(&config.server.static_dir));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let addr = listener.local_addr().context("failed to read bound address")?;

    info!("Basketball Career Tycoon listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
    }
}
