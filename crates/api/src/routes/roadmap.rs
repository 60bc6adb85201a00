//! Route definitions for roadmaps.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::roadmap;
use crate::state::AppState;

/// ```text
/// POST /generate-roadmap  -> generate_roadmap
/// GET  /roadmap           -> get_roadmap
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-roadmap", post(roadmap::generate_roadmap))
        .route("/roadmap", get(roadmap::get_roadmap))
}
