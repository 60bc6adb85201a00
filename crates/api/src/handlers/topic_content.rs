//! Handlers for per-topic learning content.
//!
//! Content is memoized per (user, module, topic) in the content cache.
//! Concurrent requests for the same uncached topic share one model call. A
//! failed generation caches nothing and surfaces as `502 GENERATION_FAILED`,
//! so the next request tries again.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use learnpath_core::keys;
use learnpath_core::llm_output::{decode_topic, GenerationError};
use learnpath_core::prompts::topic_prompt;
use learnpath_core::topic::{TopicContent, TopicRequest};
use learnpath_db::cache::CacheError;
use learnpath_llm::CompletionClient;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generate-topic-content
pub async fn generate_topic_content(
    session: Session,
    State(state): State<AppState>,
    AppJson(request): AppJson<TopicRequest>,
) -> AppResult<Json<DataResponse<TopicContent>>> {
    request.check()?;

    let key = keys::topic_content(session.user_id, &request.module_id, &request.topic);
    let cached = state
        .cache
        .get_or_generate(&key, || generate(state.llm.as_ref(), &request))
        .await
        .map_err(|e| match e {
            CacheError::Store(e) => AppError::Store(e),
            CacheError::Generate(e) => AppError::Generation(e),
        })?;

    tracing::info!(
        user_id = %session.user_id,
        module_id = %request.module_id,
        topic = %request.topic,
        cache_hit = cached.is_hit(),
        "Topic content served",
    );

    Ok(Json(DataResponse {
        data: cached.into_inner(),
    }))
}

/// GET /api/v1/topic-content/{module_id}/{topic}
///
/// Cached content, or `null` when the topic has not been generated.
pub async fn get_topic_content(
    session: Session,
    State(state): State<AppState>,
    Path((module_id, topic)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Option<TopicContent>>>> {
    keys::check_module_id(&module_id)?;
    let key = keys::topic_content(session.user_id, &module_id, &topic);
    let content = state.cache.get(&key).await?;
    Ok(Json(DataResponse { data: content }))
}

/// DELETE /api/v1/topic-content/{module_id}/{topic}
///
/// Drop the cached entry so the next generate call asks the model again.
pub async fn invalidate_topic_content(
    session: Session,
    State(state): State<AppState>,
    Path((module_id, topic)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    keys::check_module_id(&module_id)?;
    let key = keys::topic_content(session.user_id, &module_id, &topic);
    let removed = state.cache.invalidate(&key).await?;

    tracing::info!(user_id = %session.user_id, %module_id, %topic, removed, "Topic content invalidated");

    Ok(StatusCode::NO_CONTENT)
}

async fn generate(
    llm: &dyn CompletionClient,
    request: &TopicRequest,
) -> Result<TopicContent, GenerationError> {
    let completion = llm
        .complete(&topic_prompt(request))
        .await
        .map_err(|e| GenerationError::Upstream(e.to_string()))?;
    let generated = decode_topic(&completion)?;
    Ok(TopicContent::assemble(request, generated, Utc::now()))
}
