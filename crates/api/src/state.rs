use std::sync::Arc;

use nano_core::archive::PromptArchive;
use nano_core::enhance::PromptEnhancer;
use nano_core::PromptSession;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The prompt being edited. Handlers hold the lock only briefly.
    pub session: Arc<Mutex<PromptSession>>,
    /// Persisted history and library.
    pub archive: PromptArchive,
    /// Enhancement service, if configured.
    pub enhancer: Option<Arc<dyn PromptEnhancer>>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        archive: PromptArchive,
        enhancer: Option<Arc<dyn PromptEnhancer>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(PromptSession::default())),
            archive,
            enhancer,
        }
    }
}
