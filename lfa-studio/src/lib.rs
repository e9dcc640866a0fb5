//! lfa-studio library interface
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod journey;
pub mod model;
pub mod validation;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use validation::ValidationAggregator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Assessment check runner
    pub aggregator: ValidationAggregator,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, aggregator: ValidationAggregator) -> Self {
        Self {
            db,
            aggregator,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::project_routes())
        .merge(api::component_routes())
        .merge(api::progress_routes())
        .merge(api::validation_routes())
        .with_state(state)
}
