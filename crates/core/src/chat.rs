//! Mentor chat history.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Timestamp;

/// Number of entries kept per user unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

/// Append a question/answer pair and drop the oldest entries beyond `limit`.
pub fn append_exchange(
    history: &mut Vec<ChatEntry>,
    question: &str,
    answer: &str,
    now: Timestamp,
    limit: usize,
) {
    history.push(ChatEntry {
        role: ChatRole::User,
        content: question.to_string(),
        timestamp: now,
    });
    history.push(ChatEntry {
        role: ChatRole::Assistant,
        content: answer.to_string(),
        timestamp: now,
    });

    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn history_is_capped_and_keeps_newest() {
        let mut history = Vec::new();
        for i in 0..40 {
            append_exchange(&mut history, &format!("q{i}"), &format!("a{i}"), Utc::now(), 50);
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.last().unwrap().content, "a39");
        assert_eq!(history.first().unwrap().content, "q15");
        assert_eq!(history.first().unwrap().role, ChatRole::User);
    }

    #[test]
    fn short_history_is_untouched() {
        let mut history = Vec::new();
        append_exchange(&mut history, "hi", "hello", Utc::now(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
    }
}
