use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::AuthConfig;
use crate::config::Config;
use crate::llm_client::ReasoningService;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Reasoning service used by skill extraction and advice. Unconfigured
    /// when no API key is set.
    pub llm: Arc<dyn ReasoningService>,
    pub config: Config,
    pub auth: AuthConfig,
    /// Scorer used by matching runs. Wraps `llm` with the keyword fallback.
    pub match_scorer: Arc<dyn MatchScorer>,
}

impl FromRef<AppState> for AuthConfig {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
