mod advice;
mod applications;
mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod messaging;
mod models;
mod profiles;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthConfig;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{LlmClient, ReasoningService};
use crate::matching::scorer::scorer_for;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting uWork API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize reasoning service
    let llm: Arc<dyn ReasoningService> = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);
    if llm.is_configured() {
        info!(
            "LLM client initialized (model: {}, timeout: {}s)",
            llm_client::MODEL,
            config.llm_timeout_secs
        );
    } else {
        warn!("ANTHROPIC_API_KEY not set; AI features will use fallback heuristics");
    }

    let match_scorer = scorer_for(Arc::clone(&llm));
    info!("Match scorer: {}", match_scorer.name());

    // Build app state
    let state = AppState {
        db,
        s3,
        llm,
        config: config.clone(),
        auth: AuthConfig::from(&config),
        match_scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the web frontend's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "uwork-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
