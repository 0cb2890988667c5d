//! Join token endpoint
//!
//! `POST /api/token` signs a LiveKit access token for one participant and room.

use arena_core::service::TokenRequest;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::http::{AppError, AppResult, AppState};

const FAILURE: &str = "Failed to generate token";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenBody {
    pub identity: Option<String>,
    pub room_name: Option<String>,
    pub can_publish: Option<bool>,
    pub can_subscribe: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub token: String,
    pub identity: String,
    pub room_name: String,
}

/// Issue a join token
///
/// Omitted capability flags default to subscribe-only. The identity and room
/// name are echoed back exactly as received.
pub async fn create_token(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<CreateTokenResponse>> {
    let body: CreateTokenBody = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Token generation error: invalid request body: {}", e);
        AppError::internal_server_error(FAILURE)
    })?;

    let issued = state
        .credential_issuer
        .issue(TokenRequest {
            identity: body.identity,
            room_name: body.room_name,
            can_publish: body.can_publish,
            can_subscribe: body.can_subscribe,
        })
        .map_err(|e| AppError::from_core(e, FAILURE))?;

    Ok(Json(CreateTokenResponse {
        token: issued.token,
        identity: issued.identity.into_inner(),
        room_name: issued.room_name.into_inner(),
    }))
}
