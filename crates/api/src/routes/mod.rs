pub mod account;
pub mod achievements;
pub mod chat;
pub mod health;
pub mod profile;
pub mod progress;
pub mod roadmap;
pub mod submissions;
pub mod topic_content;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /signup                                  create account (public)
/// /reset-password                          set a new password (public)
/// /delete-user                             delete account (public)
///
/// /profile                                 get, upsert
///
/// /generate-roadmap                        generate (model or template)
/// /roadmap                                 get
///
/// /generate-topic-content                  cache-or-generate
/// /topic-content/{module_id}/{topic}       get cached, invalidate
///
/// /progress                                list, merge update
/// /progress/{module_id}/topics             toggle one topic
/// /progress/{module_id}/complete           complete module
///
/// /chat                                    ask the mentor
/// /chat/history                            get history
///
/// /assessment                              record quiz result
/// /challenge                               record challenge submission
///
/// /achievements                            get, unlock
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(account::router())
        .merge(profile::router())
        .merge(roadmap::router())
        .merge(topic_content::router())
        .merge(progress::router())
        .merge(chat::router())
        .merge(submissions::router())
        .merge(achievements::router())
}
