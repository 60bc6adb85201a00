//! Route definitions for topic content.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::topic_content;
use crate::state::AppState;

/// ```text
/// POST   /generate-topic-content            -> generate_topic_content
/// GET    /topic-content/{module_id}/{topic} -> get_topic_content
/// DELETE /topic-content/{module_id}/{topic} -> invalidate_topic_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/generate-topic-content",
            post(topic_content::generate_topic_content),
        )
        .route(
            "/topic-content/{module_id}/{topic}",
            get(topic_content::get_topic_content).delete(topic_content::invalidate_topic_content),
        )
}
