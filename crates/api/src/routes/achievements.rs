//! Route definitions for the `/achievements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// ```text
/// GET  /achievements  -> get_achievements
/// POST /achievements  -> unlock_achievement
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/achievements",
        get(achievements::get_achievements).post(achievements::unlock_achievement),
    )
}
