//! Store key layout. Every key is prefixed by its record kind and scoped by
//! the owning user. Segments are joined with [`SEPARATOR`]; only the last
//! segment of a key may contain it.

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

pub const SEPARATOR: char = ':';

/// Reject a module id that would make `topic_content` keys ambiguous.
pub fn check_module_id(module_id: &str) -> Result<(), CoreError> {
    if module_id.contains(SEPARATOR) {
        return Err(CoreError::Validation(format!(
            "moduleId must not contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}

pub fn profile(user: UserId) -> String {
    format!("profile:{user}")
}

pub fn roadmap(user: UserId) -> String {
    format!("roadmap:{user}")
}

pub fn progress(user: UserId, module_id: &str) -> String {
    format!("progress:{user}:{module_id}")
}

/// Prefix matching every progress record of `user`.
pub fn progress_prefix(user: UserId) -> String {
    format!("progress:{user}:")
}

pub fn chat(user: UserId) -> String {
    format!("chat:{user}")
}

pub fn achievements(user: UserId) -> String {
    format!("achievements:{user}")
}

pub fn assessment(user: UserId, module_id: &str, at: Timestamp) -> String {
    format!("assessment:{user}:{module_id}:{}", at.timestamp_millis())
}

pub fn challenge(user: UserId, challenge_id: &str) -> String {
    format!("challenge:{user}:{challenge_id}")
}

pub fn topic_content(user: UserId, module_id: &str, topic: &str) -> String {
    format!("topic-content:{user}:{module_id}:{topic}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn progress_key_falls_under_prefix() {
        let user = Uuid::new_v4();
        assert!(progress(user, "module-1-1").starts_with(&progress_prefix(user)));
    }

    #[test]
    fn separator_in_module_id_is_rejected() {
        assert!(check_module_id("module-1-1").is_ok());
        assert!(check_module_id("a:b").is_err());
        // A colon in the topic, the last segment, stays unambiguous.
        let user = Uuid::new_v4();
        assert_ne!(topic_content(user, "a", "b:c"), topic_content(user, "a-b", "c"));
    }

    #[test]
    fn keys_are_user_scoped() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_ne!(topic_content(a, "m", "t"), topic_content(b, "m", "t"));
        assert!(!progress(b, "m").starts_with(&progress_prefix(a)));
    }
}
