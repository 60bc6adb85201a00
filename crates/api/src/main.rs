use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnpath_api::auth::supabase::{SupabaseConfig, SupabaseIdentity};
use learnpath_api::config::ServerConfig;
use learnpath_api::router::build_app_router;
use learnpath_api::state::AppState;
use learnpath_db::cache::ContentCache;
use learnpath_db::PgKvStore;
use learnpath_llm::{LlmConfig, OpenAiCompatibleClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnpath_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = learnpath_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    learnpath_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    learnpath_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Stores ---
    let records = Arc::new(PgKvStore::records(pool.clone()));
    let cache = Arc::new(ContentCache::new(Arc::new(PgKvStore::cache(pool))));

    // --- Identity provider ---
    let supabase = SupabaseConfig::from_env();
    tracing::info!(
        url = %supabase.url,
        local_jwt = supabase.jwt_secret.is_some(),
        "Identity provider configured",
    );
    let identity =
        Arc::new(SupabaseIdentity::new(supabase).expect("Failed to build identity client"));

    // --- Model ---
    let llm_config = LlmConfig::from_env();
    tracing::info!(
        base_url = %llm_config.base_url,
        model = %llm_config.model,
        authenticated = llm_config.api_key.is_some(),
        "Completion client configured",
    );
    let llm =
        Arc::new(OpenAiCompatibleClient::new(llm_config).expect("Failed to build model client"));

    // --- App state ---
    let state = AppState {
        records,
        cache,
        identity,
        llm,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signalled_tx.send(());
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            match result {
                Ok(Ok(())) => tracing::info!("Server stopped"),
                Ok(Err(e)) => tracing::error!(error = %e, "Server error"),
                Err(e) => tracing::error!(error = %e, "Server task failed"),
            }
            return;
        }
        _ = signalled_rx => {}
    }

    // --- Drain in-flight requests ---
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("Graceful shutdown complete"),
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => tracing::error!(error = %e, "Server task failed during shutdown"),
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "In-flight requests did not finish in time, exiting"
        ),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
