//! Database access for lfa-studio
//!
//! One SQLite database holds projects, their components, the version
//! audit log, journey progress, and settings. Timestamps are stored as
//! RFC3339 TEXT, UUIDs as TEXT, and structured fields as JSON TEXT.

pub mod components;
pub mod progress;
pub mod projects;
pub mod settings;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::Path;
use uuid::Uuid;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize connection pool against an in-memory database (tests)
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create tables if they don't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            theme TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'IN_PROGRESS',
            completion_percentage INTEGER NOT NULL DEFAULT 0,
            geography TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lfa_components (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            component_type TEXT NOT NULL,
            content TEXT NOT NULL,
            is_complete INTEGER NOT NULL DEFAULT 0,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(project_id, component_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS version_history (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL,
            component_id TEXT NOT NULL REFERENCES lfa_components(id),
            changed_by TEXT,
            previous_content TEXT NOT NULL,
            new_content TEXT NOT NULL,
            change_summary TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_progress (
            project_id TEXT PRIMARY KEY REFERENCES projects(id),
            current_level INTEGER NOT NULL DEFAULT 1,
            current_quest INTEGER NOT NULL DEFAULT 1,
            completed_quests TEXT NOT NULL DEFAULT '[]',
            earned_badges TEXT NOT NULL DEFAULT '[]',
            total_points INTEGER NOT NULL DEFAULT 0,
            streak_days INTEGER NOT NULL DEFAULT 0,
            last_activity_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!(
        "Database tables initialized (projects, lfa_components, version_history, project_progress, settings)"
    );

    Ok(())
}

/// Parse a stored RFC3339 timestamp column
pub(crate) fn parse_timestamp(column: &str, value: &str) -> lfa_common::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| lfa_common::Error::Internal(format!("Failed to parse {}: {}", column, e)))
}

/// Parse a stored UUID column
pub(crate) fn parse_uuid(column: &str, value: &str) -> lfa_common::Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| lfa_common::Error::Internal(format!("Failed to parse {}: {}", column, e)))
}
