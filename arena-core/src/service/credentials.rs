//! Join credential issuance
//!
//! Signs short-lived LiveKit access tokens. Tokens are bearer credentials: there
//! is no cache, no deduplication and no revocation beyond expiry.

use std::time::Duration;

use arena_livekit::{AccessToken, ApiCredentials, VideoGrants};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{Capabilities, Identity, RoomName};
use crate::{Error, Result};

/// Raw token request as received from a client
#[derive(Debug, Clone, Default)]
pub struct TokenRequest {
    pub identity: Option<String>,
    pub room_name: Option<String>,
    pub can_publish: Option<bool>,
    pub can_subscribe: Option<bool>,
}

/// A freshly signed join token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub identity: Identity,
    pub room_name: RoomName,
    pub capabilities: Capabilities,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CredentialIssuer {
    credentials: Option<ApiCredentials>,
    ttl: Duration,
}

impl CredentialIssuer {
    #[must_use]
    pub const fn new(credentials: Option<ApiCredentials>, ttl: Duration) -> Self {
        Self { credentials, ttl }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn issue(&self, request: TokenRequest) -> Result<IssuedToken> {
        let (Some(identity), Some(room_name)) = (
            Identity::parse(request.identity.as_deref()),
            RoomName::parse(request.room_name.as_deref()),
        ) else {
            return Err(Error::InvalidInput(
                "Missing required parameters: identity and roomName".to_string(),
            ));
        };

        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| Error::Configuration("LiveKit credentials not configured".to_string()))?;

        let capabilities = Capabilities::from_flags(request.can_publish, request.can_subscribe);
        let grants = VideoGrants {
            room_join: true,
            room: Some(room_name.as_str().to_string()),
            can_publish: Some(capabilities.can_publish),
            can_subscribe: Some(capabilities.can_subscribe),
            can_publish_data: Some(true),
            ..Default::default()
        };

        let issued_at = Utc::now();
        let token = AccessToken::new(credentials)
            .with_identity(identity.as_str())
            .with_grants(grants)
            .with_ttl(self.ttl)
            .to_jwt()?;

        let expires_at = issued_at
            + chrono::Duration::from_std(self.ttl)
                .map_err(|e| Error::Internal(format!("Token TTL out of range: {e}")))?;

        info!(
            identity = %identity,
            room = %room_name,
            can_publish = capabilities.can_publish,
            can_subscribe = capabilities.can_subscribe,
            "Issued join token"
        );

        Ok(IssuedToken {
            token,
            identity,
            room_name,
            capabilities,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_livekit::Claims;

    fn credentials() -> ApiCredentials {
        ApiCredentials::new("APIarena", "arena-secret-used-only-in-tests")
    }

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::new(Some(credentials()), Duration::from_secs(3600))
    }

    fn request(identity: Option<&str>, room: Option<&str>) -> TokenRequest {
        TokenRequest {
            identity: identity.map(str::to_string),
            room_name: room.map(str::to_string),
            ..Default::default()
        }
    }

    fn decode(token: &str) -> Claims {
        AccessToken::verify(&credentials(), token).unwrap()
    }

    #[test]
    fn test_missing_fields_are_invalid_input() {
        for req in [
            request(None, Some("arena")),
            request(Some("user-1"), None),
            request(Some(""), Some("arena")),
            request(None, None),
        ] {
            let err = issuer().issue(req).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_missing_fields_reported_before_missing_credentials() {
        let unconfigured = CredentialIssuer::new(None, Duration::from_secs(3600));
        let err = unconfigured.issue(request(None, Some("arena"))).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let unconfigured = CredentialIssuer::new(None, Duration::from_secs(3600));
        assert!(!unconfigured.is_configured());

        let err = unconfigured
            .issue(request(Some("user-1"), Some("arena")))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_defaults_to_subscribe_only() {
        let issued = issuer().issue(request(Some("user-1"), Some("arena"))).unwrap();

        assert_eq!(issued.identity.as_str(), "user-1");
        assert_eq!(issued.room_name.as_str(), "arena");

        let claims = decode(&issued.token);
        assert_eq!(claims.sub, "user-1");
        assert!(claims.video.room_join);
        assert_eq!(claims.video.room.as_deref(), Some("arena"));
        assert_eq!(claims.video.can_publish, Some(false));
        assert_eq!(claims.video.can_subscribe, Some(true));
        assert_eq!(claims.video.can_publish_data, Some(true));
    }

    #[test]
    fn test_publisher_capabilities() {
        let issued = issuer()
            .issue(TokenRequest {
                can_publish: Some(true),
                can_subscribe: Some(false),
                ..request(Some("broadcaster"), Some("arena"))
            })
            .unwrap();

        let claims = decode(&issued.token);
        assert_eq!(claims.video.can_publish, Some(true));
        assert_eq!(claims.video.can_subscribe, Some(false));
        assert!(issued.capabilities.can_publish);
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let short = CredentialIssuer::new(Some(credentials()), Duration::from_secs(90));
        let before = Utc::now().timestamp();
        let issued = short.issue(request(Some("user-1"), Some("arena"))).unwrap();

        let claims = decode(&issued.token);
        assert_eq!(claims.exp - claims.iat, 90);
        assert!(claims.iat >= before);
        assert!((issued.expires_at.timestamp() - claims.exp).abs() <= 1);
    }

    #[test]
    fn test_repeated_requests_issue_independent_tokens() {
        let issuer = issuer();
        let first = issuer.issue(request(Some("user-1"), Some("arena"))).unwrap();
        let second = issuer.issue(request(Some("user-1"), Some("arena"))).unwrap();

        let first_claims = decode(&first.token);
        let second_claims = decode(&second.token);
        assert_eq!(first_claims.sub, second_claims.sub);
        assert!(second_claims.iat >= first_claims.iat);
        assert!(second.expires_at >= first.expires_at);
    }
}
