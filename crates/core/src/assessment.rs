//! Quiz assessments and coding challenge submissions.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Timestamp, UserId};

/// Request body for `POST /assessment`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub module_id: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
    /// Per-question results as reported by the quiz UI.
    #[serde(default)]
    pub results: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub user_id: UserId,
    pub module_id: String,
    pub score: f64,
    pub results: serde_json::Value,
    pub completed_at: Timestamp,
}

/// Request body for `POST /challenge`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    #[validate(length(min = 1, max = 100))]
    pub challenge_id: String,
    #[validate(length(max = 100_000))]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    pub user_id: UserId,
    pub challenge_id: String,
    pub code: String,
    pub completed_at: Timestamp,
}
