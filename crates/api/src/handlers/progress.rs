//! Handlers for per-module progress.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use learnpath_core::error::CoreError;
use learnpath_core::progress::{ProgressRecord, ProgressUpdate, TopicToggle};
use learnpath_core::roadmap::RoadmapModule;
use learnpath_core::types::UserId;
use learnpath_db::repositories::{ProgressRepo, RoadmapRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/progress
///
/// Merge an update into the module's record, creating it if needed.
pub async fn update_progress(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<ProgressUpdate>,
) -> AppResult<Json<DataResponse<ProgressRecord>>> {
    input.validate().map_err(CoreError::from)?;

    let store = state.records.as_ref();
    let now = Utc::now();
    let mut record = ProgressRepo::find(store, session.user_id, &input.module_id)
        .await?
        .unwrap_or_else(|| ProgressRecord::new(session.user_id, input.module_id.clone(), now));

    record.apply(input, now);
    ProgressRepo::save(store, &record).await?;

    tracing::info!(
        user_id = %session.user_id,
        module_id = %record.module_id,
        status = ?record.status,
        time_spent = record.time_spent,
        "Progress updated",
    );

    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/progress
pub async fn list_progress(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProgressRecord>>>> {
    let records = ProgressRepo::list_for_user(state.records.as_ref(), session.user_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/progress/{module_id}/topics
///
/// Mark one topic of a roadmap module complete or incomplete.
pub async fn toggle_topic(
    session: Session,
    State(state): State<AppState>,
    Path(module_id): Path<String>,
    AppJson(input): AppJson<TopicToggle>,
) -> AppResult<Json<DataResponse<ProgressRecord>>> {
    input.validate().map_err(CoreError::from)?;

    let module = roadmap_module(&state, session.user_id, &module_id).await?;

    let store = state.records.as_ref();
    let now = Utc::now();
    let mut record = ProgressRepo::find(store, session.user_id, &module_id)
        .await?
        .unwrap_or_else(|| ProgressRecord::new(session.user_id, module_id.clone(), now));

    record.set_topic(&module, &input.topic_id, input.completed, now)?;
    ProgressRepo::save(store, &record).await?;

    tracing::debug!(
        user_id = %session.user_id,
        %module_id,
        topic_id = %input.topic_id,
        completed = input.completed,
        "Topic toggled",
    );

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/progress/{module_id}/complete
///
/// Mark the module complete. Rejected with 400 while any of its topics is
/// still open; the stored record is not touched in that case.
pub async fn complete_module(
    session: Session,
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> AppResult<Json<DataResponse<ProgressRecord>>> {
    let module = roadmap_module(&state, session.user_id, &module_id).await?;

    let store = state.records.as_ref();
    let now = Utc::now();
    let mut record = ProgressRepo::find(store, session.user_id, &module_id)
        .await?
        .unwrap_or_else(|| ProgressRecord::new(session.user_id, module_id.clone(), now));

    record.complete_module(&module, now)?;
    ProgressRepo::save(store, &record).await?;

    tracing::info!(user_id = %session.user_id, %module_id, "Module completed");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a module in the caller's stored roadmap.
async fn roadmap_module(
    state: &AppState,
    user_id: UserId,
    module_id: &str,
) -> AppResult<RoadmapModule> {
    let roadmap = RoadmapRepo::find(state.records.as_ref(), user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Roadmap",
                id: user_id.to_string(),
            })
        })?;

    roadmap
        .content
        .find_module(module_id)
        .cloned()
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Module",
                id: module_id.to_string(),
            })
        })
}
