//! Browser pages

use axum::{response::Html, routing::get, Router};

use crate::http::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const TEST_MEDIA_HTML: &str = include_str!("../../assets/test-media.html");

pub fn create_pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/test-media", get(test_media))
}

/// Landing page and in-room view
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Camera and microphone diagnostics
pub async fn test_media() -> Html<&'static str> {
    Html(TEST_MEDIA_HTML)
}

#[cfg(test)]
mod tests {
    use crate::http::test_support::{get_text, unconfigured_router};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = get_text(unconfigured_router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("user-identity"));
        assert!(body.contains("/api/takeover"));
    }

    #[tokio::test]
    async fn test_media_page() {
        let (status, body) = get_text(unconfigured_router(), "/test-media").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("getUserMedia"));
    }
}
