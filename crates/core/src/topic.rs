//! Per-topic learning content.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::error::CoreError;
use crate::keys;
use crate::types::Timestamp;

/// Search endpoint used to build video links.
pub const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Request body for `POST /generate-topic-content`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicRequest {
    #[validate(length(min = 1, max = 100))]
    pub module_id: String,
    #[validate(length(min = 1, max = 200))]
    pub module_title: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub difficulty: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub target_goal: String,
}

impl TopicRequest {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        if self.module_id.trim().is_empty() || self.topic.trim().is_empty() {
            return Err(CoreError::Validation(
                "moduleId and topic must not be blank".to_string(),
            ));
        }
        keys::check_module_id(&self.module_id)
    }
}

/// Shape the model is asked to produce for a topic.
///
/// `explanation` and `keyPoints` are required; the remaining lists are
/// optional and default to empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTopic {
    pub explanation: String,
    pub key_points: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub pitfalls: Vec<String>,
    #[serde(default)]
    pub practice_ideas: Vec<String>,
    #[serde(default)]
    pub youtube_search_queries: Vec<String>,
}

impl GeneratedTopic {
    pub fn validate(&self) -> Result<(), String> {
        if self.explanation.trim().is_empty() {
            return Err("explanation is empty".to_string());
        }
        if self.key_points.iter().all(|p| p.trim().is_empty()) {
            return Err("keyPoints is empty".to_string());
        }
        Ok(())
    }
}

/// A video search suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearch {
    pub title: String,
    pub search_url: String,
    pub embed_query: String,
}

impl VideoSearch {
    pub fn for_query(query: &str) -> Self {
        Self {
            title: query.to_string(),
            search_url: youtube_search_url(query),
            embed_query: query.to_string(),
        }
    }
}

/// Cached topic content (`topic-content:{user}:{module}:{topic}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicContent {
    pub explanation: String,
    pub key_points: Vec<String>,
    pub applications: Vec<String>,
    pub pitfalls: Vec<String>,
    pub practice_ideas: Vec<String>,
    pub youtube_videos: Vec<VideoSearch>,
    pub topic: String,
    pub module_id: String,
    pub module_title: String,
    pub difficulty: String,
    pub generated_at: Timestamp,
}

impl TopicContent {
    /// Combine decoded model output with the request that produced it.
    ///
    /// Blank list entries are dropped. When the model suggested no video
    /// searches, [`default_search_queries`] are used instead.
    pub fn assemble(request: &TopicRequest, generated: GeneratedTopic, now: Timestamp) -> Self {
        let mut queries = non_blank(generated.youtube_search_queries);
        if queries.is_empty() {
            queries = default_search_queries(request);
        }

        Self {
            explanation: generated.explanation.trim().to_string(),
            key_points: non_blank(generated.key_points),
            applications: non_blank(generated.applications),
            pitfalls: non_blank(generated.pitfalls),
            practice_ideas: non_blank(generated.practice_ideas),
            youtube_videos: queries.iter().map(|q| VideoSearch::for_query(q)).collect(),
            topic: request.topic.clone(),
            module_id: request.module_id.clone(),
            module_title: request.module_title.clone(),
            difficulty: request.difficulty.clone(),
            generated_at: now,
        }
    }
}

/// Search queries derived from the request when the model offered none.
pub fn default_search_queries(request: &TopicRequest) -> Vec<String> {
    let topic = &request.topic;
    vec![
        format!("{topic} tutorial {}", request.difficulty),
        format!("{topic} explained {}", request.module_title),
        format!("{topic} {} guide", request.target_goal),
    ]
    .into_iter()
    .map(|q| q.split_whitespace().collect::<Vec<_>>().join(" "))
    .collect()
}

/// Build a YouTube search URL for `query`.
pub fn youtube_search_url(query: &str) -> String {
    match Url::parse_with_params(YOUTUBE_SEARCH_URL, &[("search_query", query)]) {
        Ok(url) => url.to_string(),
        Err(_) => YOUTUBE_SEARCH_URL.to_string(),
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
