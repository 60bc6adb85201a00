//! Handlers for achievements and XP.

use axum::extract::State;
use axum::Json;
use learnpath_core::achievements::{Achievements, UnlockRequest};
use learnpath_core::error::CoreError;
use learnpath_db::repositories::AchievementRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/achievements
pub async fn get_achievements(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Achievements>>> {
    let achievements = AchievementRepo::get(state.records.as_ref(), session.user_id).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// POST /api/v1/achievements
///
/// Unlock an achievement. Unlocking one that is already held changes nothing.
pub async fn unlock_achievement(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<UnlockRequest>,
) -> AppResult<Json<DataResponse<Achievements>>> {
    input.validate().map_err(CoreError::from)?;

    let store = state.records.as_ref();
    let mut achievements = AchievementRepo::get(store, session.user_id).await?;

    if achievements.unlock(&input.achievement_id, input.xp) {
        AchievementRepo::save(store, session.user_id, &achievements).await?;
        tracing::info!(
            user_id = %session.user_id,
            achievement_id = %input.achievement_id,
            xp = achievements.xp,
            level = achievements.level,
            "Achievement unlocked",
        );
    }

    Ok(Json(DataResponse { data: achievements }))
}
