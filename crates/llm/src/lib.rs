//! Client for a hosted chat-completion model.
//!
//! - [`CompletionClient`] -- the seam handlers depend on.
//! - [`OpenAiCompatibleClient`] -- `POST {base}/chat/completions` against any
//!   OpenAI-compatible endpoint (the Hugging Face router by default).

pub mod client;
pub mod config;

pub use client::{CompletionClient, LlmError, OpenAiCompatibleClient};
pub use config::LlmConfig;
