//! LiveKit access tokens
//!
//! HS256 JWTs signed with the project API secret. The API key is the issuer,
//! the participant identity is both subject and token id, and the `video`
//! claim carries the room grants.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::LiveKitError;

/// Default lifetime of a join token (1 hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// API key and secret pair issued by the LiveKit project
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Room permissions carried in the `video` claim
///
/// Unset capability flags are omitted from the token; the media server treats
/// an omitted publish/subscribe flag as allowed, so callers restricting a
/// participant must set the flag explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrants {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub room_join: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub room_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_publish: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_subscribe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_publish_data: Option<bool>,
}

/// JWT claims understood by the media server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// API key
    pub iss: String,
    /// Participant identity
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
    pub video: VideoGrants,
}

/// Builder for a signed access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    credentials: ApiCredentials,
    identity: Option<String>,
    name: Option<String>,
    grants: VideoGrants,
    ttl: Duration,
}

impl AccessToken {
    #[must_use]
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            identity: None,
            name: None,
            grants: VideoGrants::default(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_grants(mut self, grants: VideoGrants) -> Self {
        self.grants = grants;
        self
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sign the token, starting its expiry countdown now
    pub fn to_jwt(&self) -> Result<String, LiveKitError> {
        if self.credentials.api_key.is_empty() || self.credentials.api_secret.is_empty() {
            return Err(LiveKitError::InvalidConfig(
                "API key and secret must not be empty".to_string(),
            ));
        }

        let identity = self.identity.clone().unwrap_or_default();
        if self.grants.room_join && identity.is_empty() {
            return Err(LiveKitError::InvalidConfig(
                "identity is required for room join grants".to_string(),
            ));
        }

        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| LiveKitError::InvalidConfig("token TTL out of range".to_string()))?;
        let now = Utc::now().timestamp();

        let claims = Claims {
            iss: self.credentials.api_key.clone(),
            sub: identity.clone(),
            jti: identity,
            name: self.name.clone(),
            nbf: now,
            iat: now,
            exp: now + ttl,
            video: self.grants.clone(),
        };

        let key = EncodingKey::from_secret(self.credentials.api_secret.as_bytes());
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
    }

    /// Verify a token signed with `credentials` and return its claims
    pub fn verify(credentials: &ApiCredentials, token: &str) -> Result<Claims, LiveKitError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 60; // clock skew
        validation.set_issuer(&[credentials.api_key.as_str()]);

        let key = DecodingKey::from_secret(credentials.api_secret.as_bytes());
        Ok(decode::<Claims>(token, &key, &validation)?.claims)
    }
}
