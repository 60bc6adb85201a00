//! Route definitions for the `/profile` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// ```text
/// GET  /profile  -> get_profile
/// POST /profile  -> save_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(profile::get_profile).post(profile::save_profile))
}
