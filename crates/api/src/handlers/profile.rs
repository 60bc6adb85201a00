//! Handlers for the learner profile.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use learnpath_core::profile::{Profile, ProfileInput};
use learnpath_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/profile
///
/// Create or replace the caller's profile. Email and name always come from
/// the session.
pub async fn save_profile(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<ProfileInput>,
) -> AppResult<Json<DataResponse<Profile>>> {
    input.check()?;

    let store = state.records.as_ref();
    let existing = ProfileRepo::find(store, session.user_id).await?;
    let profile = Profile::from_input(
        session.user_id,
        session.email,
        session.name,
        input,
        existing.as_ref(),
        Utc::now(),
    );
    ProfileRepo::save(store, &profile).await?;

    tracing::info!(
        user_id = %profile.user_id,
        onboarding_complete = profile.onboarding_complete,
        "Profile saved",
    );

    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/profile
///
/// The stored profile, or a not-yet-onboarded stub.
pub async fn get_profile(
    session: Session,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find(state.records.as_ref(), session.user_id)
        .await?
        .unwrap_or_else(|| Profile::stub(session.user_id, session.email, session.name));

    Ok(Json(DataResponse { data: profile }))
}
