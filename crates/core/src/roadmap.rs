//! Roadmap schema: phases containing modules containing topics.

use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, UserId};

/// Difficulty of a roadmap module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Beginner")]
    Beginner,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// A learning resource attached to a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_weeks: u32,
    pub modules: Vec<RoadmapModule>,
}

impl RoadmapModule {
    /// Id under which the `index`-th topic is tracked in progress records.
    pub fn topic_id(&self, index: usize) -> String {
        format!("{}-topic-{index}", self.id)
    }

    pub fn has_topic_id(&self, topic_id: &str) -> bool {
        topic_id
            .strip_prefix(self.id.as_str())
            .and_then(|rest| rest.strip_prefix("-topic-"))
            .and_then(|idx| idx.parse::<usize>().ok())
            .is_some_and(|idx| idx < self.topics.len() && topic_id == self.topic_id(idx))
    }
}

/// The curriculum document itself, as produced by the model or a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapContent {
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub total_estimated_weeks: u32,
    #[serde(default)]
    pub skills_to_master: Vec<String>,
}

impl RoadmapContent {
    /// Structural checks beyond what serde enforces.
    ///
    /// Phases, their modules, and every module's topic list must be
    /// non-empty, and module ids must be unique and non-blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.phases.is_empty() {
            return Err("roadmap has no phases".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for phase in &self.phases {
            if phase.title.trim().is_empty() {
                return Err(format!("phase '{}' has no title", phase.id));
            }
            if phase.modules.is_empty() {
                return Err(format!("phase '{}' has no modules", phase.id));
            }
            for module in &phase.modules {
                if module.id.trim().is_empty() {
                    return Err(format!("a module in phase '{}' has no id", phase.id));
                }
                if crate::keys::check_module_id(&module.id).is_err() {
                    return Err(format!("module id '{}' contains a key separator", module.id));
                }
                if !seen.insert(module.id.as_str()) {
                    return Err(format!("duplicate module id '{}'", module.id));
                }
                if module.topics.is_empty() {
                    return Err(format!("module '{}' has no topics", module.id));
                }
            }
        }
        Ok(())
    }

    pub fn find_module(&self, module_id: &str) -> Option<&RoadmapModule> {
        self.phases
            .iter()
            .flat_map(|p| p.modules.iter())
            .find(|m| m.id == module_id)
    }
}

/// A stored roadmap (`roadmap:{user_id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub user_id: UserId,
    pub target_goal: String,
    pub content: RoadmapContent,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
    #[serde(default)]
    pub is_template: bool,
    /// Why the template was used instead of generated content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
