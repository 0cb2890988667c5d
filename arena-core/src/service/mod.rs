pub mod credentials;
pub mod takeover;

pub use credentials::{CredentialIssuer, IssuedToken, TokenRequest};
pub use takeover::{TakeoverCoordinator, TakeoverReport, TakeoverRequest, TrackDemotion, TrackOutcome};
