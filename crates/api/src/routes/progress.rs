//! Route definitions for the `/progress` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// ```text
/// GET  /progress                      -> list_progress
/// POST /progress                      -> update_progress
/// POST /progress/{module_id}/topics   -> toggle_topic
/// POST /progress/{module_id}/complete -> complete_module
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/progress",
            get(progress::list_progress).post(progress::update_progress),
        )
        .route("/progress/{module_id}/topics", post(progress::toggle_topic))
        .route("/progress/{module_id}/complete", post(progress::complete_module))
}
