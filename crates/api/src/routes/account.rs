//! Route definitions for account administration.

use axum::routing::post;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Public account routes.
///
/// ```text
/// POST /signup          -> signup
/// POST /reset-password  -> reset_password
/// POST /delete-user     -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(account::signup))
        .route("/reset-password", post(account::reset_password))
        .route("/delete-user", post(account::delete_user))
}
