//! Room discovery endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_name: String,
    /// Signalling URL for the browser SDK
    pub server_url: Option<String>,
}

pub async fn get_room(State(state): State<AppState>) -> Json<RoomResponse> {
    Json(RoomResponse {
        room_name: state.config.room.name.clone(),
        server_url: state.config.livekit.url().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use crate::http::test_support::{configured_router, get_json, unconfigured_router};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_room_defaults() {
        let (status, resp) = get_json(unconfigured_router(), "/api/room").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["roomName"], "arena-of-consciousness");
        assert!(resp["serverUrl"].is_null());
    }

    #[tokio::test]
    async fn test_room_server_url() {
        let (_, resp) =
            get_json(configured_router(Some("wss://arena.livekit.cloud")), "/api/room").await;
        assert_eq!(resp["serverUrl"], "wss://arena.livekit.cloud");
    }
}
