//! Broadcast takeover endpoint

use arena_core::service::{TakeoverRequest, TrackDemotion};
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::{AppError, AppResult, AppState};

const FAILURE: &str = "Failed to process takeover";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeoverBody {
    pub room_name: Option<String>,
    pub new_broadcaster_identity: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeoverResponse {
    pub success: bool,
    pub message: String,
    pub new_broadcaster: String,
    /// Number of publishers targeted for demotion
    pub previous_broadcasters: usize,
    pub tracks: Vec<TrackDemotion>,
}

/// Demote every current broadcaster in favor of the caller
///
/// Upstream failures while listing or muting never fail the request; they show
/// up as `failed` track outcomes or as a room that was assumed empty.
pub async fn takeover(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<TakeoverResponse>> {
    let body: TakeoverBody = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Takeover error: invalid request body: {}", e);
        AppError::internal_server_error(FAILURE)
    })?;

    let report = state
        .takeover_coordinator
        .takeover(TakeoverRequest {
            room_name: body.room_name,
            new_broadcaster_identity: body.new_broadcaster_identity,
        })
        .await
        .map_err(|e| AppError::from_core(e, FAILURE))?;

    if report.is_partial() {
        tracing::warn!(
            room = %report.room_name,
            failed = report.failed_count(),
            "Takeover completed with unmuted tracks"
        );
    }

    Ok(Json(TakeoverResponse {
        success: true,
        message: report.message(),
        previous_broadcasters: report.demoted_count(),
        new_broadcaster: report.new_broadcaster.into_inner(),
        tracks: report.tracks,
    }))
}
