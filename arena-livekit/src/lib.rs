// Arena LiveKit client
//
// Pure HTTP client for the hosted LiveKit control plane plus the join-token
// signing scheme it trusts. Independent of the rest of the workspace so it can
// be reused by tools that only need to mint tokens or poke the room service.
//
// Architecture:
// - access_token: HS256 join/admin tokens (grants, identity, TTL)
// - client: Twirp RoomService client (list participants, mute tracks)
// - types: wire types of the RoomService JSON API

pub mod access_token;
pub mod client;
pub mod error;
pub mod types;

pub use access_token::{AccessToken, ApiCredentials, Claims, VideoGrants, DEFAULT_TOKEN_TTL};
pub use client::{RoomServiceClient, RoomServiceInterface};
pub use error::LiveKitError;
pub use reqwest::StatusCode;
pub use types::{ParticipantInfo, TrackInfo, TrackType};
