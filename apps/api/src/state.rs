use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds configuration only: every request builds its own reporter, so streams never
/// share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
