//! lfa-studio - LFA design engine service
//!
//! HTTP service for authoring Logical Framework Analysis projects:
//! journey progression, completion tracking, gamification, and
//! multi-check design validation.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lfa_studio::validation::{GroqAssessor, ValidationAggregator};
use lfa_studio::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting lfa-studio");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration: TOML file, then data folder (ENV -> TOML -> OS default)
    let toml_config = lfa_common::config::load_toml_config()?;
    let data_folder = lfa_common::config::resolve_data_folder(&toml_config);
    let db_path = lfa_common::config::database_path(&data_folder)?;
    info!("Database: {}", db_path.display());

    let db_pool = lfa_studio::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Groq credentials: DB setting -> ENV -> TOML. A missing key degrades
    // every check to its fallback instead of blocking startup.
    let api_key = lfa_studio::config::resolve_groq_api_key(&db_pool, &toml_config).await?;
    if api_key.is_none() {
        warn!(
            "No Groq API key configured ({} or config.toml); validation checks will return fallbacks",
            lfa_studio::config::GROQ_API_KEY_ENV
        );
    }
    let model = lfa_studio::config::resolve_groq_model(&db_pool, &toml_config).await?;
    let assessor = GroqAssessor::new(api_key.unwrap_or_default(), model)
        .map_err(|e| anyhow::anyhow!("Failed to build assessor client: {}", e))?;
    let aggregator = ValidationAggregator::new(Arc::new(assessor));

    let state = AppState::new(db_pool, aggregator);
    let app = lfa_studio::build_router(state);

    let bind_address = lfa_studio::config::resolve_bind_address(&toml_config);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
