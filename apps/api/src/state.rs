use sqlx::PgPool;

use crate::config::Config;
use crate::screening::ScreeningOptions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Vocabulary, weights, policy, and shortlist size for screening runs.
    /// Built once at startup from [`Config::screening_options`].
    pub options: ScreeningOptions,
}
