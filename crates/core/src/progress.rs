//! Per-module progress tracking.
//!
//! One [`ProgressRecord`] exists per (user, module). Updates are merged into
//! the stored record: `status` and the optional fields overwrite, while
//! `timeSpent` accumulates. Completed topics change only through
//! [`ProgressRecord::set_topic`], and only ids belonging to the module count
//! towards completion.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::roadmap::RoadmapModule;
use crate::types::{Timestamp, UserId};

/// Lifecycle of a module for one learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub module_id: String,
    #[serde(default)]
    pub status: ProgressStatus,
    /// Accumulated minutes spent on the module.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub completed_topics: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

/// Request body for `POST /progress`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[validate(length(min = 1, max = 100))]
    pub module_id: String,
    pub status: Option<ProgressStatus>,
    pub time_spent: Option<u64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub performance_score: Option<f64>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request body for `POST /progress/{moduleId}/topics`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicToggle {
    #[validate(length(min = 1, max = 200))]
    pub topic_id: String,
    pub completed: bool,
}

impl ProgressRecord {
    pub fn new(user_id: UserId, module_id: impl Into<String>, now: Timestamp) -> Self {
        Self {
            user_id,
            module_id: module_id.into(),
            status: ProgressStatus::NotStarted,
            time_spent: 0,
            completed_topics: BTreeSet::new(),
            performance_score: None,
            notes: None,
            last_updated: now,
            completed_at: None,
        }
    }

    /// Number of completed topics that actually belong to `module`.
    pub fn completed_count(&self, module: &RoadmapModule) -> usize {
        self.completed_topics
            .iter()
            .filter(|id| module.has_topic_id(id))
            .count()
    }

    /// Merge an update into this record.
    pub fn apply(&mut self, update: ProgressUpdate, now: Timestamp) {
        if let Some(status) = update.status {
            self.set_status(status, now);
        }
        self.time_spent = self.time_spent.saturating_add(update.time_spent.unwrap_or(0));
        if update.performance_score.is_some() {
            self.performance_score = update.performance_score;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
        self.last_updated = now;
    }

    /// Mark one topic of `module` complete or incomplete.
    ///
    /// Ids outside the module are rejected. The module becomes `Completed`
    /// once every one of its topics is done, and `InProgress` otherwise.
    pub fn set_topic(
        &mut self,
        module: &RoadmapModule,
        topic_id: &str,
        completed: bool,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !module.has_topic_id(topic_id) {
            return Err(CoreError::Validation(format!(
                "Topic '{topic_id}' does not belong to module '{}'",
                module.id
            )));
        }
        if completed {
            self.completed_topics.insert(topic_id.to_string());
        } else {
            self.completed_topics.remove(topic_id);
        }

        let total_topics = module.topics.len();
        let status = if total_topics > 0 && self.completed_count(module) >= total_topics {
            ProgressStatus::Completed
        } else {
            ProgressStatus::InProgress
        };
        self.set_status(status, now);
        self.last_updated = now;
        Ok(())
    }

    /// Explicitly complete the module.
    ///
    /// Rejected while any of its topics is still open; the record is left
    /// untouched in that case.
    pub fn complete_module(&mut self, module: &RoadmapModule, now: Timestamp) -> Result<(), CoreError> {
        let total_topics = module.topics.len();
        let done = self.completed_count(module);
        if done < total_topics {
            return Err(CoreError::Validation(format!(
                "Please complete all {total_topics} topics before marking the module as complete \
                 ({done} of {total_topics} done)"
            )));
        }
        self.set_status(ProgressStatus::Completed, now);
        self.last_updated = now;
        Ok(())
    }

    fn set_status(&mut self, status: ProgressStatus, now: Timestamp) {
        match status {
            ProgressStatus::Completed if self.status != ProgressStatus::Completed => {
                self.completed_at = Some(now);
            }
            ProgressStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            _ => self.completed_at = None,
        }
        self.status = status;
    }
}
