//! LiveKit RoomService client
//!
//! Twirp-over-JSON client for the administrative room API. Every call mints a
//! short-lived admin token scoped to the room it touches.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Serialize;
use url::Url;

use crate::access_token::{AccessToken, ApiCredentials, VideoGrants};
use crate::error::{check_response, json_with_limit, LiveKitError};
use crate::types::{
    ListParticipantsRequest, ListParticipantsResponse, MuteRoomTrackRequest, MuteRoomTrackResponse,
    ParticipantInfo, TrackInfo,
};

const SERVICE_PATH: &str = "/twirp/livekit.RoomService";

/// Lifetime of the admin token attached to each RoomService call
const ADMIN_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Room administration operations used by the takeover flow
#[async_trait]
pub trait RoomServiceInterface: Send + Sync {
    /// List the participants currently in `room`
    async fn list_participants(&self, room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError>;

    /// Mute or unmute one published track of `identity` in `room`
    async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<TrackInfo, LiveKitError>;
}

/// HTTP client for `livekit.RoomService`
pub struct RoomServiceClient {
    base_url: String,
    credentials: ApiCredentials,
    client: Client,
}

impl std::fmt::Debug for RoomServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomServiceClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl RoomServiceClient {
    /// Create a client with the default request timeout
    pub fn new(url: &str, credentials: ApiCredentials) -> Result<Self, LiveKitError> {
        Self::with_timeout(url, credentials, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client; `ws://` and `wss://` URLs are accepted and rewritten to HTTP(S)
    pub fn with_timeout(
        url: &str,
        credentials: ApiCredentials,
        timeout: Duration,
    ) -> Result<Self, LiveKitError> {
        let base_url = http_base_url(url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url,
            credentials,
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn admin_token(&self, room: &str) -> Result<String, LiveKitError> {
        AccessToken::new(self.credentials.clone())
            .with_grants(VideoGrants {
                room_admin: true,
                room: Some(room.to_string()),
                ..Default::default()
            })
            .with_ttl(ADMIN_TOKEN_TTL)
            .to_jwt()
    }

    async fn call<B, R>(&self, method: &str, room: &str, body: &B) -> Result<R, LiveKitError>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{SERVICE_PATH}/{method}", self.base_url);
        let token = self.admin_token(room)?;

        tracing::debug!(method = %method, room = %room, "Calling RoomService");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;

        let response = check_response(response).await?;
        json_with_limit(response).await
    }
}

#[async_trait]
impl RoomServiceInterface for RoomServiceClient {
    async fn list_participants(&self, room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError> {
        let resp: ListParticipantsResponse = self
            .call("ListParticipants", room, &ListParticipantsRequest { room })
            .await?;
        Ok(resp.participants)
    }

    async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<TrackInfo, LiveKitError> {
        let request = MuteRoomTrackRequest {
            room,
            identity,
            track_sid,
            muted,
        };
        let resp: MuteRoomTrackResponse = self.call("MutePublishedTrack", room, &request).await?;
        Ok(resp.track.unwrap_or_else(|| TrackInfo {
            sid: track_sid.to_string(),
            muted,
            ..Default::default()
        }))
    }
}

/// Normalize a LiveKit URL to the HTTP(S) base the Twirp API lives on
fn http_base_url(url: &str) -> Result<String, LiveKitError> {
    let mut parsed = Url::parse(url.trim())
        .map_err(|e| LiveKitError::InvalidConfig(format!("invalid LiveKit URL '{url}': {e}")))?;

    let scheme = match parsed.scheme() {
        "ws" | "http" => "http",
        "wss" | "https" => "https",
        other => {
            return Err(LiveKitError::InvalidConfig(format!(
                "unsupported LiveKit URL scheme '{other}'"
            )))
        }
    };
    parsed
        .set_scheme(scheme)
        .map_err(|()| LiveKitError::InvalidConfig(format!("cannot use scheme {scheme} for '{url}'")))?;

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
