#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use learnpath_api::auth::identity::{DirectoryUser, IdentityError, IdentityProvider};
use learnpath_api::config::ServerConfig;
use learnpath_api::router::build_app_router;
use learnpath_api::state::AppState;
use learnpath_core::types::UserId;
use learnpath_db::cache::ContentCache;
use learnpath_db::MemoryKvStore;
use learnpath_llm::{CompletionClient, LlmError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        chat_history_limit: 50,
    }
}

// ---------------------------------------------------------------------------
// In-memory identity provider
// ---------------------------------------------------------------------------

struct Account {
    user: DirectoryUser,
    password: String,
}

/// Account directory plus opaque tokens, kept in memory.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: Mutex<Vec<Account>>,
    tokens: Mutex<HashMap<String, UserId>>,
}

impl MemoryIdentity {
    pub fn add_user(&self, email: &str, name: &str, confirmed: bool) -> DirectoryUser {
        let user = DirectoryUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            email_confirmed: confirmed,
        };
        self.accounts.lock().unwrap().push(Account {
            user: user.clone(),
            password: "initial-password".to_string(),
        });
        user
    }

    pub fn issue_token(&self, user_id: UserId) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.tokens.lock().unwrap().insert(token.clone(), user_id);
        token
    }

    pub fn user_by_email(&self, email: &str) -> Option<DirectoryUser> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user.email.as_deref() == Some(email))
            .map(|a| a.user.clone())
    }

    pub fn password_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user.email.as_deref() == Some(email))
            .map(|a| a.password.clone())
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn verify_token(&self, token: &str) -> Result<DirectoryUser, IdentityError> {
        let user_id = *self
            .tokens
            .lock()
            .unwrap()
            .get(token)
            .ok_or(IdentityError::InvalidToken)?;
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user.id == user_id)
            .map(|a| a.user.clone())
            .ok_or(IdentityError::InvalidToken)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<DirectoryUser>, IdentityError> {
        Ok(self.user_by_email(email))
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<DirectoryUser, IdentityError> {
        let user = DirectoryUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            email_confirmed: true,
        };
        self.accounts.lock().unwrap().push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        Ok(user)
    }

    async fn update_password(&self, user_id: UserId, password: &str) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.user.id == user_id)
            .ok_or_else(|| IdentityError::Rejected {
                status: 404,
                message: "User not found".into(),
            })?;
        account.password = password.to_string();
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), IdentityError> {
        self.accounts
            .lock()
            .unwrap()
            .retain(|a| a.user.id != user_id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scripted completion client
// ---------------------------------------------------------------------------

type Responder = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

/// A completion client that answers from a closure and counts its calls.
pub struct ScriptedLlm {
    respond: Responder,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedLlm {
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with(move |_| Ok(text.clone()))
    }

    /// Every call fails as if the endpoint were down.
    pub fn unavailable() -> Self {
        Self::with(|_| {
            Err(LlmError::Status {
                status: 503,
                body: "model unavailable".into(),
            })
        })
    }

    pub fn with(respond: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Hold every call open for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.respond)(prompt)
    }
}

// ---------------------------------------------------------------------------
// App builder
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<MemoryIdentity>,
    pub llm: Arc<ScriptedLlm>,
    pub records: Arc<MemoryKvStore>,
}

impl TestApp {
    /// A fresh router handle for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Register a confirmed account and return it with a valid bearer token.
    pub fn sign_in(&self, email: &str, name: &str) -> (DirectoryUser, String) {
        let user = self.identity.add_user(email, name, true);
        let token = self.identity.issue_token(user.id);
        (user, token)
    }
}

/// Build the full application router with all middleware layers over
/// in-memory stores, an in-memory identity provider and `llm`.
pub fn build_test_app(llm: ScriptedLlm) -> TestApp {
    let config = test_config();
    let identity = Arc::new(MemoryIdentity::default());
    let llm = Arc::new(llm);
    let records = Arc::new(MemoryKvStore::new());
    let cache = Arc::new(ContentCache::new(Arc::new(MemoryKvStore::new())));

    let state = AppState {
        records: records.clone(),
        cache,
        identity: identity.clone(),
        llm: llm.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        identity,
        llm,
        records,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A minimal onboarding payload for `POST /profile`.
pub fn profile_body(target_goal: &str) -> Value {
    json!({
        "background": "Physics graduate",
        "currentRole": "Lab technician",
        "yearsOfExperience": "2",
        "knownSkills": ["Python", "Excel"],
        "targetGoal": target_goal,
        "preferredLanguage": "Python",
        "learningPace": "moderate",
        "hoursPerWeek": "10",
        "learningStyle": "hands-on",
        "onboardingComplete": true
    })
}

/// A well-formed roadmap as the model would return it.
pub fn roadmap_completion() -> String {
    let roadmap = json!({
        "phases": [{
            "id": "phase-1",
            "title": "Core Skills",
            "description": "Get productive quickly",
            "estimatedWeeks": 4,
            "modules": [{
                "id": "module-1-1",
                "title": "SQL Fundamentals",
                "description": "Query relational data",
                "topics": ["SELECT basics", "Joins", "Aggregation"],
                "estimatedHours": 12,
                "difficulty": "beginner",
                "resources": [{ "type": "course", "title": "SQL Course", "url": "https://example.com/sql" }]
            }]
        }],
        "totalEstimatedWeeks": 4,
        "skillsToMaster": ["SQL"]
    });
    format!("Here is your roadmap:\n```json\n{roadmap}\n```\nGood luck!")
}

/// A well-formed topic payload as the model would return it.
pub fn topic_completion() -> String {
    json!({
        "explanation": "Joins combine rows from two tables.",
        "keyPoints": ["Inner joins keep matches", "Left joins keep every left row"],
        "applications": ["Reporting"],
        "pitfalls": ["Accidental cross joins"],
        "practiceIdeas": ["Join orders to customers"],
        "youtubeSearchQueries": ["sql joins explained"]
    })
    .to_string()
}
