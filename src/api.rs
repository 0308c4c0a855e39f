// 🌐 REST API - Receipt submission and points lookup
// Routes are built here so the server binary and the tests share them.

use crate::receipt::Receipt;
use crate::scoring::{score_breakdown, PointsBreakdown, ScoringError};
use crate::store::ReceiptStore;
use crate::validation::{validate, ValidationError};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReceiptStore>,
}

impl AppState {
    pub fn new<S: ReceiptStore + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub receipts: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid receipt JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Receipt not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) | ApiError::Validation(_) | ApiError::Scoring(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        receipts: state.store.len(),
    })
}

/// POST /receipts/process - Validate and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(receipt) = payload.inspect_err(|e| warn!(error = %e, "Rejected receipt body"))?;

    if let Err(e) = validate(&receipt) {
        warn!(field = e.field(), error = %e, "Rejected receipt");
        return Err(e.into());
    }

    let stored = state.store.insert(receipt);
    info!(id = %stored.id, retailer = stored.receipt.retailer_name(), "Receipt stored");

    Ok(Json(IdResponse { id: stored.id }))
}

fn breakdown_for(state: &AppState, id: &str) -> Result<PointsBreakdown, ApiError> {
    let stored = state.store.get(id).ok_or(ApiError::NotFound)?;

    score_breakdown(&stored.receipt).map_err(|e| {
        warn!(id, error = %e, "Scoring failed");
        ApiError::from(e)
    })
}

/// GET /receipts/:id/points - Points for a stored receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let breakdown = breakdown_for(&state, &id)?;
    info!(id = %id, points = breakdown.total, "Points computed");

    Ok(Json(PointsResponse {
        points: breakdown.total,
    }))
}

/// GET /receipts/:id/breakdown - Per-rule points for a stored receipt
async fn get_breakdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsBreakdown>, ApiError> {
    breakdown_for(&state, &id).map(Json)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .route("/receipts/:id/breakdown", get(get_breakdown))
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
