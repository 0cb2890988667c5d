//! Broadcast takeover
//!
//! Demotes every current publisher in a room so a new participant becomes the
//! de facto broadcaster. Prior publishers are muted, not removed, so they stay
//! connected as viewers.
//!
//! Calls to the room service are sequential and unguarded: two concurrent
//! takeovers race, and whichever mute lands last decides who is on air.

use std::sync::Arc;

use arena_livekit::{ParticipantInfo, RoomServiceInterface, TrackInfo, TrackType};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{Identity, RoomName};
use crate::{Error, Result};

/// Raw takeover request as received from a client
#[derive(Debug, Clone, Default)]
pub struct TakeoverRequest {
    pub room_name: Option<String>,
    pub new_broadcaster_identity: Option<String>,
}

/// What happened to one track of a demoted broadcaster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrackOutcome {
    Muted,
    Failed { error: String },
    /// Not an audio/video track; left alone
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDemotion {
    pub participant: String,
    pub track_sid: String,
    pub track_type: TrackType,
    #[serde(flatten)]
    pub outcome: TrackOutcome,
}

/// Result of a takeover, including partial failures
#[derive(Debug, Clone)]
pub struct TakeoverReport {
    pub room_name: RoomName,
    pub new_broadcaster: Identity,
    /// False when the participant listing failed and the room was assumed empty
    pub room_found: bool,
    /// Identities of the publishers that were targeted for demotion
    pub previous_broadcasters: Vec<String>,
    pub tracks: Vec<TrackDemotion>,
}

impl TakeoverReport {
    fn empty_room(room_name: RoomName, new_broadcaster: Identity) -> Self {
        Self {
            room_name,
            new_broadcaster,
            room_found: false,
            previous_broadcasters: Vec::new(),
            tracks: Vec::new(),
        }
    }

    #[must_use]
    pub fn demoted_count(&self) -> usize {
        self.previous_broadcasters.len()
    }

    #[must_use]
    pub fn muted_count(&self) -> usize {
        self.count(|o| matches!(o, TrackOutcome::Muted))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, TrackOutcome::Failed { .. }))
    }

    /// At least one media track could not be muted
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&TrackOutcome) -> bool) -> usize {
        self.tracks.iter().filter(|t| pred(&t.outcome)).count()
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.room_found {
            format!(
                "Takeover successful. {} previous broadcasters removed.",
                self.demoted_count()
            )
        } else {
            "Room ready for new broadcaster".to_string()
        }
    }
}

#[derive(Clone)]
pub struct TakeoverCoordinator {
    room_service: Option<Arc<dyn RoomServiceInterface>>,
}

impl std::fmt::Debug for TakeoverCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeoverCoordinator")
            .field("configured", &self.room_service.is_some())
            .finish()
    }
}

impl TakeoverCoordinator {
    #[must_use]
    pub fn new(room_service: Option<Arc<dyn RoomServiceInterface>>) -> Self {
        Self { room_service }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.room_service.is_some()
    }

    pub async fn takeover(&self, request: TakeoverRequest) -> Result<TakeoverReport> {
        let (Some(room_name), Some(new_broadcaster)) = (
            RoomName::parse(request.room_name.as_deref()),
            Identity::parse(request.new_broadcaster_identity.as_deref()),
        ) else {
            return Err(Error::InvalidInput(
                "Missing required parameters: roomName and newBroadcasterIdentity".to_string(),
            ));
        };

        let room_service = self
            .room_service
            .as_ref()
            .ok_or_else(|| Error::Configuration("LiveKit configuration missing".to_string()))?;

        let participants = match room_service.list_participants(room_name.as_str()).await {
            Ok(participants) => participants,
            Err(e) => {
                // A room that was never created has no broadcaster to demote
                if e.is_not_found() {
                    info!(room = %room_name, "Room does not exist yet, nothing to demote");
                } else {
                    warn!(room = %room_name, error = %e, "Failed to list participants, assuming empty room");
                }
                return Ok(TakeoverReport::empty_room(room_name, new_broadcaster));
            }
        };

        let current: Vec<&ParticipantInfo> = participants
            .iter()
            .filter(|p| p.identity != new_broadcaster.as_str() && p.is_publishing_media())
            .collect();

        let mut tracks = Vec::new();
        for broadcaster in &current {
            tracks.extend(demote(room_service.as_ref(), &room_name, broadcaster).await);
        }

        let report = TakeoverReport {
            room_name,
            new_broadcaster,
            room_found: true,
            previous_broadcasters: current.iter().map(|p| p.identity.clone()).collect(),
            tracks,
        };

        info!(
            room = %report.room_name,
            new_broadcaster = %report.new_broadcaster,
            demoted = report.demoted_count(),
            muted = report.muted_count(),
            failed = report.failed_count(),
            "Takeover processed"
        );

        Ok(report)
    }
}

/// Mute every audio track, then every video track, of one participant
async fn demote(
    room_service: &dyn RoomServiceInterface,
    room_name: &RoomName,
    participant: &ParticipantInfo,
) -> Vec<TrackDemotion> {
    let ordered: Vec<&TrackInfo> = [TrackType::Audio, TrackType::Video]
        .into_iter()
        .flat_map(|kind| participant.tracks.iter().filter(move |t| t.track_type == kind))
        .collect();

    let mut outcomes = Vec::with_capacity(participant.tracks.len());
    for track in ordered {
        let outcome = match room_service
            .mute_published_track(room_name.as_str(), &participant.identity, &track.sid, true)
            .await
        {
            Ok(_) => {
                debug!(room = %room_name, participant = %participant.identity, track_sid = %track.sid, "Muted track");
                TrackOutcome::Muted
            }
            Err(e) => {
                warn!(
                    room = %room_name,
                    participant = %participant.identity,
                    track_sid = %track.sid,
                    error = %e,
                    "Failed to mute track"
                );
                TrackOutcome::Failed { error: e.to_string() }
            }
        };

        outcomes.push(TrackDemotion {
            participant: participant.identity.clone(),
            track_sid: track.sid.clone(),
            track_type: track.track_type,
            outcome,
        });
    }

    outcomes.extend(
        participant
            .tracks
            .iter()
            .filter(|t| !t.track_type.is_media())
            .map(|t| TrackDemotion {
                participant: participant.identity.clone(),
                track_sid: t.sid.clone(),
                track_type: t.track_type,
                outcome: TrackOutcome::Skipped,
            }),
    );

    outcomes
}
