use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nano_api::config::ServerConfig;
use nano_api::router::build_app_router;
use nano_api::state::AppState;
use nano_core::archive::PromptArchive;
use nano_core::enhance::PromptEnhancer;
use nano_gemini::{GeminiApi, GeminiEnhancer};
use nano_store::FileStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nano_api=debug,nano_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let store = FileStore::open(&config.data_dir).expect("Failed to open data directory");
    let archive = PromptArchive::new(Arc::new(store));

    // --- Enhancement ---
    let enhancer: Option<Arc<dyn PromptEnhancer>> = match &config.gemini {
        Some(gemini) => {
            tracing::info!(model = %gemini.model, "Gemini enhancement enabled");
            let api = GeminiApi::new(
                gemini.api_url.clone(),
                gemini.model.clone(),
                gemini.api_key.clone(),
                Duration::from_secs(config.enhance_timeout_secs),
            )
            .expect("Failed to build Gemini HTTP client");
            let enhancer: Arc<dyn PromptEnhancer> = Arc::new(GeminiEnhancer::new(api));
            Some(enhancer)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; enhancement disabled");
            None
        }
    };

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(config, archive, enhancer);

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
