//! Test helpers for arena-core tests

use std::collections::HashSet;

use arena_livekit::{
    LiveKitError, ParticipantInfo, RoomServiceInterface, StatusCode, TrackInfo, TrackType,
};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Build a participant publishing the given `(sid, type)` tracks
pub fn participant(identity: &str, tracks: &[(&str, TrackType)]) -> ParticipantInfo {
    ParticipantInfo {
        sid: format!("PA_{identity}"),
        identity: identity.to_string(),
        name: identity.to_string(),
        tracks: tracks
            .iter()
            .map(|(sid, track_type)| TrackInfo {
                sid: (*sid).to_string(),
                track_type: *track_type,
                ..Default::default()
            })
            .collect(),
    }
}

/// How the fake answers `list_participants`
pub enum ListBehavior {
    Participants(Vec<ParticipantInfo>),
    NotFound,
    Unavailable,
}

/// In-memory room service recording every call
pub struct FakeRoomService {
    list: ListBehavior,
    failing_tracks: HashSet<String>,
    list_calls: Mutex<usize>,
    mute_calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeRoomService {
    pub fn new(list: ListBehavior) -> Self {
        Self {
            list,
            failing_tracks: HashSet::new(),
            list_calls: Mutex::new(0),
            mute_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_participants(participants: Vec<ParticipantInfo>) -> Self {
        Self::new(ListBehavior::Participants(participants))
    }

    /// Make muting `track_sid` fail
    pub fn failing_track(mut self, track_sid: &str) -> Self {
        self.failing_tracks.insert(track_sid.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock()
    }

    /// `(room, identity, track_sid)` of every mute attempt, in order
    pub fn mute_calls(&self) -> Vec<(String, String, String)> {
        self.mute_calls.lock().clone()
    }
}

#[async_trait]
impl RoomServiceInterface for FakeRoomService {
    async fn list_participants(&self, _room: &str) -> Result<Vec<ParticipantInfo>, LiveKitError> {
        *self.list_calls.lock() += 1;
        match &self.list {
            ListBehavior::Participants(participants) => Ok(participants.clone()),
            ListBehavior::NotFound => Err(LiveKitError::Twirp {
                status: StatusCode::NOT_FOUND,
                code: "not_found".to_string(),
                msg: "requested room does not exist".to_string(),
            }),
            ListBehavior::Unavailable => Err(LiveKitError::Network("connection refused".to_string())),
        }
    }

    async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<TrackInfo, LiveKitError> {
        self.mute_calls
            .lock()
            .push((room.to_string(), identity.to_string(), track_sid.to_string()));

        if self.failing_tracks.contains(track_sid) {
            return Err(LiveKitError::Twirp {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal".to_string(),
                msg: "simulated mute failure".to_string(),
            });
        }

        Ok(TrackInfo {
            sid: track_sid.to_string(),
            muted,
            ..Default::default()
        })
    }
}
