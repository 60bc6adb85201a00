/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    /// Bearer token. Requests are sent unauthenticated when absent.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Default                           |
    /// |--------------------|-----------------------------------|
    /// | `LLM_BASE_URL`     | `https://router.huggingface.co/v1`|
    /// | `LLM_API_KEY`      | unset                             |
    /// | `LLM_MODEL`        | `meta-llama/Llama-3.1-8B-Instruct`|
    /// | `LLM_TIMEOUT_SECS` | `60`                              |
    ///
    /// # Panics
    ///
    /// Panics if `LLM_TIMEOUT_SECS` is not a valid `u64`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
