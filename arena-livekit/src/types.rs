//! LiveKit RoomService wire types
//!
//! Subset of the protojson shapes returned by the Twirp API. Unknown fields are
//! ignored so upstream additions never break decoding.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of a published track
///
/// `Audio` is the proto3 zero value, so a listing that omits `type` means audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackType {
    #[default]
    Audio,
    Video,
    Data,
}

impl TrackType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
            Self::Data => "DATA",
        }
    }

    /// Audio and video tracks carry the broadcast; data tracks do not.
    #[must_use]
    pub const fn is_media(self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }

    fn from_name(name: &str) -> Self {
        match name {
            "AUDIO" => Self::Audio,
            "VIDEO" => Self::Video,
            _ => Self::Data,
        }
    }

    const fn from_number(value: i64) -> Self {
        match value {
            0 => Self::Audio,
            1 => Self::Video,
            _ => Self::Data,
        }
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TrackType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// protojson emits enum names, but numeric values are valid input too
impl<'de> Deserialize<'de> for TrackType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Self::from_name(&name),
            Raw::Number(value) => Self::from_number(value),
        })
    }
}

/// Published track as reported by `ListParticipants`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackInfo {
    pub sid: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub name: String,
    pub muted: bool,
    pub source: Option<String>,
}

/// Room participant as reported by `ListParticipants`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantInfo {
    pub sid: String,
    pub identity: String,
    pub name: String,
    pub tracks: Vec<TrackInfo>,
}

impl ParticipantInfo {
    /// Audio and video tracks of this participant
    pub fn media_tracks(&self) -> impl Iterator<Item = &TrackInfo> {
        self.tracks.iter().filter(|t| t.track_type.is_media())
    }

    #[must_use]
    pub fn is_publishing_media(&self) -> bool {
        self.media_tracks().next().is_some()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListParticipantsRequest<'a> {
    pub room: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ListParticipantsResponse {
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MuteRoomTrackRequest<'a> {
    pub room: &'a str,
    pub identity: &'a str,
    pub track_sid: &'a str,
    pub muted: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MuteRoomTrackResponse {
    pub track: Option<TrackInfo>,
}
