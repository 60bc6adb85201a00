//! Route definitions for assessments and challenges.

use axum::routing::post;
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// ```text
/// POST /assessment  -> submit_assessment
/// POST /challenge   -> submit_challenge
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assessment", post(submissions::submit_assessment))
        .route("/challenge", post(submissions::submit_challenge))
}
