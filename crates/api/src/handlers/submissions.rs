//! Handlers for quiz assessments and coding challenge submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use learnpath_core::assessment::{
    AssessmentRecord, AssessmentRequest, ChallengeRecord, ChallengeRequest,
};
use learnpath_core::error::CoreError;
use learnpath_db::repositories::SubmissionRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Session;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/assessment
pub async fn submit_assessment(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<AssessmentRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(CoreError::from)?;

    let record = AssessmentRecord {
        user_id: session.user_id,
        module_id: input.module_id,
        score: input.score,
        results: input.results,
        completed_at: Utc::now(),
    };
    SubmissionRepo::record_assessment(state.records.as_ref(), &record).await?;

    tracing::info!(
        user_id = %session.user_id,
        module_id = %record.module_id,
        score = record.score,
        "Assessment recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// POST /api/v1/challenge
///
/// Stores the latest submission for the challenge, replacing any earlier one.
pub async fn submit_challenge(
    session: Session,
    State(state): State<AppState>,
    AppJson(input): AppJson<ChallengeRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(CoreError::from)?;

    let record = ChallengeRecord {
        user_id: session.user_id,
        challenge_id: input.challenge_id,
        code: input.code,
        completed_at: Utc::now(),
    };
    SubmissionRepo::record_challenge(state.records.as_ref(), &record).await?;

    tracing::info!(
        user_id = %session.user_id,
        challenge_id = %record.challenge_id,
        "Challenge submission recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
