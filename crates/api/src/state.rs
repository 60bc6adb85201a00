use std::sync::Arc;

use learnpath_db::cache::ContentCache;
use learnpath_db::SharedStore;
use learnpath_llm::CompletionClient;

use crate::auth::identity::IdentityProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// System of record (profiles, roadmaps, progress, chat, achievements, submissions).
    pub records: SharedStore,
    /// Memoized model output, backed by a separate store.
    pub cache: Arc<ContentCache>,
    /// Verifies bearer tokens and administers accounts.
    pub identity: Arc<dyn IdentityProvider>,
    /// Chat-completion model used for roadmaps, topic content and the mentor.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Arc<ServerConfig>,
}
