use crate::config::Config;
use crate::session::RunStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completed run results, session-scoped and cleared on reset.
    pub runs: RunStore,
}
