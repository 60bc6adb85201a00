//! Handlers for roadmap generation and retrieval.
//!
//! Generation never fails because of the model: if the call errors or its
//! output cannot be decoded, the built-in template for the learner's goal is
//! stored instead, marked with `isTemplate` and the failure kind.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use learnpath_core::llm_output::{decode_roadmap, GenerationError};
use learnpath_core::profile::Profile;
use learnpath_core::prompts::roadmap_prompt;
use learnpath_core::roadmap::{Roadmap, RoadmapContent};
use learnpath_core::templates::{template_roadmap, DEFAULT_GOAL};
use learnpath_db::repositories::{ProfileRepo, RoadmapRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/generate-roadmap
pub async fn generate_roadmap(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Roadmap>>> {
    let store = state.records.as_ref();
    let profile = ProfileRepo::find(store, session.user_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Profile not found. Please complete onboarding first.".into())
        })?;

    let now = Utc::now();
    let roadmap = match generate_content(&state, &profile).await {
        Ok(content) => Roadmap {
            user_id: profile.user_id,
            target_goal: profile
                .target_goal
                .clone()
                .unwrap_or_else(|| DEFAULT_GOAL.to_string()),
            content,
            created_at: now,
            last_updated: now,
            is_template: false,
            fallback_reason: None,
        },
        Err(e) => {
            tracing::warn!(
                user_id = %session.user_id,
                kind = e.kind(),
                error = %e,
                "Roadmap generation failed, using template",
            );
            template_roadmap(&profile, Some(e.kind().to_string()), now)
        }
    };

    RoadmapRepo::save(store, &roadmap).await?;

    tracing::info!(
        user_id = %session.user_id,
        is_template = roadmap.is_template,
        phases = roadmap.content.phases.len(),
        "Roadmap stored",
    );

    Ok(Json(DataResponse { data: roadmap }))
}

/// GET /api/v1/roadmap
///
/// The stored roadmap, or `null` before one has been generated.
pub async fn get_roadmap(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<Roadmap>>>> {
    let roadmap = RoadmapRepo::find(state.records.as_ref(), session.user_id).await?;
    Ok(Json(DataResponse { data: roadmap }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn generate_content(
    state: &AppState,
    profile: &Profile,
) -> Result<RoadmapContent, GenerationError> {
    let completion = state
        .llm
        .complete(&roadmap_prompt(profile))
        .await
        .map_err(|e| GenerationError::Upstream(e.to_string()))?;
    decode_roadmap(&completion)
}
