//! Learner profile captured during onboarding.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

/// Maximum length of any free-text profile attribute.
pub const MAX_ATTRIBUTE_LEN: u64 = 200;

/// Maximum number of known skills a profile may list.
pub const MAX_KNOWN_SKILLS: u64 = 50;

/// A stored learner profile (`profile:{user_id}`).
///
/// Identity fields (`email`, `name`) always come from the authenticated
/// session, never from the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub background: Option<String>,
    pub current_role: Option<String>,
    pub years_of_experience: Option<String>,
    #[serde(default)]
    pub known_skills: Vec<String>,
    pub target_goal: Option<String>,
    pub preferred_language: Option<String>,
    pub learning_pace: Option<String>,
    pub hours_per_week: Option<String>,
    pub learning_style: Option<String>,
    #[serde(default)]
    pub onboarding_complete: bool,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Request body for `POST /profile`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub background: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub current_role: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub years_of_experience: Option<String>,
    #[validate(length(max = MAX_KNOWN_SKILLS))]
    #[serde(default)]
    pub known_skills: Vec<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub target_goal: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub preferred_language: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub learning_pace: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub hours_per_week: Option<String>,
    #[validate(length(max = MAX_ATTRIBUTE_LEN))]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub onboarding_complete: bool,
}

impl ProfileInput {
    /// Run field-level validation plus the onboarding rule: a profile that
    /// claims onboarding is complete must name a target goal.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;

        if self.onboarding_complete && is_blank(self.target_goal.as_deref()) {
            return Err(CoreError::Validation(
                "targetGoal is required to complete onboarding".to_string(),
            ));
        }
        if self.known_skills.iter().any(|s| s.trim().is_empty()) {
            return Err(CoreError::Validation(
                "knownSkills must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

impl Profile {
    /// Placeholder returned by `GET /profile` before onboarding.
    pub fn stub(user_id: UserId, email: Option<String>, name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            name,
            background: None,
            current_role: None,
            years_of_experience: None,
            known_skills: Vec::new(),
            target_goal: None,
            preferred_language: None,
            learning_pace: None,
            hours_per_week: None,
            learning_style: None,
            onboarding_complete: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build the profile to store from a validated input.
    ///
    /// `created_at` is carried over from `existing` so re-submitting
    /// onboarding does not reset it.
    pub fn from_input(
        user_id: UserId,
        email: Option<String>,
        name: Option<String>,
        input: ProfileInput,
        existing: Option<&Profile>,
        now: Timestamp,
    ) -> Self {
        let created_at = existing.and_then(|p| p.created_at).unwrap_or(now);
        Self {
            user_id,
            email,
            name,
            background: trimmed(input.background),
            current_role: trimmed(input.current_role),
            years_of_experience: trimmed(input.years_of_experience),
            known_skills: input
                .known_skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .collect(),
            target_goal: trimmed(input.target_goal),
            preferred_language: trimmed(input.preferred_language),
            learning_pace: trimmed(input.learning_pace),
            hours_per_week: trimmed(input.hours_per_week),
            learning_style: trimmed(input.learning_style),
            onboarding_complete: input.onboarding_complete,
            created_at: Some(created_at),
            updated_at: Some(now),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn input(goal: Option<&str>, complete: bool) -> ProfileInput {
        ProfileInput {
            target_goal: goal.map(str::to_string),
            onboarding_complete: complete,
            ..Default::default()
        }
    }

    #[test]
    fn completed_onboarding_requires_goal() {
        assert!(input(None, true).check().is_err());
        assert!(input(Some("   "), true).check().is_err());
        assert!(input(Some("Data Scientist"), true).check().is_ok());
        assert!(input(None, false).check().is_ok());
    }

    #[test]
    fn overlong_attribute_is_rejected() {
        let mut body = input(Some("Data Scientist"), true);
        body.background = Some("x".repeat(MAX_ATTRIBUTE_LEN as usize + 1));
        assert!(body.check().is_err());
    }

    #[test]
    fn empty_skill_is_rejected() {
        let mut body = input(Some("Data Scientist"), true);
        body.known_skills = vec!["Rust".into(), " ".into()];
        assert!(body.check().is_err());
    }

    #[test]
    fn from_input_preserves_created_at_and_trims() {
        let user = Uuid::new_v4();
        let earlier = Utc::now() - Duration::days(3);
        let now = Utc::now();

        let mut existing = Profile::stub(user, None, None);
        existing.created_at = Some(earlier);

        let mut body = input(Some("  Full-Stack Developer "), true);
        body.background = Some("".into());
        body.known_skills = vec![" HTML ".into()];

        let profile = Profile::from_input(
            user,
            Some("a@b.c".into()),
            Some("Ada".into()),
            body,
            Some(&existing),
            now,
        );

        assert_eq!(profile.created_at, Some(earlier));
        assert_eq!(profile.updated_at, Some(now));
        assert_eq!(profile.target_goal.as_deref(), Some("Full-Stack Developer"));
        assert_eq!(profile.background, None);
        assert_eq!(profile.known_skills, vec!["HTML".to_string()]);
    }

    #[test]
    fn stub_is_not_onboarded() {
        let stub = Profile::stub(Uuid::new_v4(), Some("a@b.c".into()), None);
        assert!(!stub.onboarding_complete);
        assert!(stub.known_skills.is_empty());
    }
}
