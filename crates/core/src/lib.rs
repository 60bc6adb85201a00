//! Domain layer for the learnpath backend.
//!
//! Everything here is pure: typed schemas for the stored records, the
//! validation and merge rules applied to them, prompt construction, the
//! built-in roadmap templates, and strict decoding of model output. No I/O.

pub mod achievements;
pub mod assessment;
pub mod chat;
pub mod error;
pub mod keys;
pub mod llm_output;
pub mod profile;
pub mod progress;
pub mod prompts;
pub mod roadmap;
pub mod templates;
pub mod topic;
pub mod types;
