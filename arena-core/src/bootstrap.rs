//! Service initialization and dependency injection

use std::sync::Arc;

use arena_livekit::{RoomServiceClient, RoomServiceInterface};
use tracing::{info, warn};

use crate::service::{CredentialIssuer, TakeoverCoordinator};
use crate::Config;

/// Services shared by every request handler
#[derive(Debug, Clone)]
pub struct Services {
    pub credential_issuer: CredentialIssuer,
    pub takeover_coordinator: TakeoverCoordinator,
}

/// Build services from configuration
///
/// Missing LiveKit settings are not fatal: the affected endpoints answer with a
/// configuration error until the deployment is fixed.
pub fn init_services(config: &Config) -> anyhow::Result<Services> {
    let credentials = config.livekit.credentials();
    if credentials.is_none() {
        warn!("LiveKit API key/secret not configured; token requests will fail");
    }

    let room_service: Option<Arc<dyn RoomServiceInterface>> =
        match (config.livekit.url(), credentials.clone()) {
            (Some(url), Some(credentials)) => {
                let client = RoomServiceClient::with_timeout(
                    url,
                    credentials,
                    config.livekit.request_timeout(),
                )?;
                info!("LiveKit room service at {}", client.base_url());
                Some(Arc::new(client))
            }
            _ => {
                warn!("LiveKit URL/API key/secret not all configured; takeover requests will fail");
                None
            }
        };

    Ok(Services {
        credential_issuer: CredentialIssuer::new(credentials, config.room.token_ttl()),
        takeover_coordinator: TakeoverCoordinator::new(room_service),
    })
}
