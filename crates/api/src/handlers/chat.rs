//! Handlers for the AI mentor chat.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use learnpath_core::chat::{append_exchange, ChatEntry, ChatRequest};
use learnpath_core::error::CoreError;
use learnpath_core::prompts::mentor_prompt;
use learnpath_core::types::Timestamp;
use learnpath_db::repositories::{ChatRepo, ProfileRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: Timestamp,
}

/// POST /api/v1/chat
///
/// Answer a question with the learner's profile as context and append the
/// exchange to their history. Nothing is recorded when the model call fails.
pub async fn send_message(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<ChatRequest>,
) -> AppResult<Json<DataResponse<ChatReply>>> {
    input.validate().map_err(CoreError::from)?;
    let question = input.message.trim();
    if question.is_empty() {
        return Err(CoreError::Validation("message must not be blank".into()).into());
    }

    let store = state.records.as_ref();
    let profile = ProfileRepo::find(store, session.user_id).await?;
    let answer = state
        .llm
        .complete(&mentor_prompt(profile.as_ref(), question))
        .await?;
    let answer = answer.trim().to_string();

    let now = Utc::now();
    let mut history = ChatRepo::history(store, session.user_id).await?;
    append_exchange(
        &mut history,
        question,
        &answer,
        now,
        state.config.chat_history_limit,
    );
    ChatRepo::save(store, session.user_id, &history).await?;

    tracing::debug!(user_id = %session.user_id, entries = history.len(), "Chat exchange recorded");

    Ok(Json(DataResponse {
        data: ChatReply {
            response: answer,
            timestamp: now,
        },
    }))
}

/// GET /api/v1/chat/history
pub async fn get_history(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ChatEntry>>>> {
    let history = ChatRepo::history(state.records.as_ref(), session.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}
