//! Repository for quiz assessments and challenge submissions.
//!
//! Assessments are append-only (one key per attempt); a challenge keeps only
//! its latest submission.

use learnpath_core::assessment::{AssessmentRecord, ChallengeRecord};
use learnpath_core::keys;

use crate::error::StoreError;
use crate::kv::{put_json, KvStore};

pub struct SubmissionRepo;

impl SubmissionRepo {
    pub async fn record_assessment(
        store: &dyn KvStore,
        record: &AssessmentRecord,
    ) -> Result<(), StoreError> {
        let key = keys::assessment(record.user_id, &record.module_id, record.completed_at);
        put_json(store, &key, record).await
    }

    pub async fn record_challenge(
        store: &dyn KvStore,
        record: &ChallengeRecord,
    ) -> Result<(), StoreError> {
        let key = keys::challenge(record.user_id, &record.challenge_id);
        put_json(store, &key, record).await
    }
}
