//! Route definitions for the `/chat` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// ```text
/// POST /chat          -> send_message
/// GET  /chat/history  -> get_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::send_message))
        .route("/chat/history", get(chat::get_history))
}
