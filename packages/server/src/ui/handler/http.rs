//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    domain::{HazardReport, UserId},
    infrastructure::dto::{
        http::{ConnectionDto, ErrorResponseDto, HazardReportResponseDto, StatsDto},
        websocket::HazardReportPayload,
    },
    ui::state::AppState,
};

use super::bearer_token;

/// Error returned by the JSON API
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "hazard store unavailable".to_string(),
            ),
        };
        (status, Json(ErrorResponseDto { error })).into_response()
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<UserId, ApiError> {
    state
        .connect_user_usecase
        .authenticate(bearer_token(headers))
        .map_err(|e| {
            tracing::warn!("Rejected HTTP request: {}", e);
            ApiError::Unauthorized
        })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Hazard and connection counters
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsDto>, ApiError> {
    authorize(&state, &headers)?;

    let stats = state.get_stats_usecase.execute().await.map_err(|e| {
        tracing::error!("Failed to read stats: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(StatsDto {
        total_hazards: stats.total_hazards,
        active_users: stats.active_users,
    }))
}

/// Submit a hazard report over HTTP
///
/// Runs the same pipeline as the WebSocket `hazard_report` message.
pub async fn report_hazard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<HazardReportPayload>, JsonRejection>,
) -> Result<Json<HazardReportResponseDto>, ApiError> {
    let reporter_id = authorize(&state, &headers)?;

    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Rejected hazard report from '{}': {}", reporter_id, rejection);
        ApiError::BadRequest(rejection.body_text())
    })?;
    let report =
        HazardReport::try_from(payload).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let ack = state
        .report_hazard_usecase
        .execute(&reporter_id, report)
        .await
        .map_err(|e| {
            tracing::error!("Failed to process hazard report from '{}': {}", reporter_id, e);
            ApiError::Internal
        })?;

    Ok(Json(HazardReportResponseDto::from(&ack)))
}

/// Debug endpoint listing live connections (for testing purposes)
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<Vec<ConnectionDto>> {
    let connections = state.get_connections_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(connections.iter().map(ConnectionDto::from).collect())
}
