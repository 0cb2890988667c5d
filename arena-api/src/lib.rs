// Arena API Library
//
// HTTP surface of the broadcast room: join tokens, takeover and the browser pages

pub mod http;

// Re-export commonly used types
pub use http::{create_router, AppState};
