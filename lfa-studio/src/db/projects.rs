//! Project database operations
//!
//! Project creation is transactional: the project row, its six empty
//! components, and the initial journey progress row commit together or
//! not at all.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use lfa_common::{Error, Result};

use crate::journey::ProjectProgress;
use crate::model::{
    ComponentContent, ComponentType, Geography, LfaProject, ProjectStatus,
};

/// Create a project with its six empty components and initial progress
pub async fn create_project(
    pool: &SqlitePool,
    title: &str,
    theme: &str,
    geography: Option<&Geography>,
) -> Result<LfaProject> {
    let now = lfa_common::time::now();
    let project = LfaProject {
        id: Uuid::new_v4(),
        title: title.to_string(),
        theme: theme.to_string(),
        status: ProjectStatus::InProgress,
        completion_percentage: 0,
        geography: geography.cloned(),
        created_at: now,
        updated_at: now,
    };

    let geography_json = project
        .geography
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to serialize geography: {}", e)))?;
    let now_str = now.to_rfc3339();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO projects (id, title, theme, status, completion_percentage, geography, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(project.id.to_string())
    .bind(&project.title)
    .bind(&project.theme)
    .bind(project.status.as_str())
    .bind(project.completion_percentage as i64)
    .bind(&geography_json)
    .bind(&now_str)
    .bind(&now_str)
    .execute(&mut *tx)
    .await?;

    for component_type in ComponentType::ALL {
        let content = serde_json::to_string(&ComponentContent::empty_for(component_type))
            .map_err(|e| Error::Internal(format!("Failed to serialize content: {}", e)))?;
        sqlx::query(
            r#"
            INSERT INTO lfa_components (id, project_id, component_type, content, is_complete, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, 0, 1, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(project.id.to_string())
        .bind(component_type.as_str())
        .bind(&content)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&mut *tx)
        .await?;
    }

    let progress = ProjectProgress::new(now);
    sqlx::query(
        r#"
        INSERT INTO project_progress (project_id, current_level, current_quest, completed_quests, earned_badges, total_points, streak_days, last_activity_at)
        VALUES (?, ?, ?, '[]', '[]', 0, 0, ?)
        "#,
    )
    .bind(project.id.to_string())
    .bind(progress.current_level as i64)
    .bind(progress.current_quest as i64)
    .bind(&now_str)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(project_id = %project.id, title = %project.title, "Created project");

    Ok(project)
}

/// Load one project
pub async fn get_project(pool: &SqlitePool, project_id: Uuid) -> Result<Option<LfaProject>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, theme, status, completion_percentage, geography, created_at, updated_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(project_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(|row| project_from_row(&row)).transpose()
}

/// List all projects, most recently updated first
pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<LfaProject>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, theme, status, completion_percentage, geography, created_at, updated_at
        FROM projects
        ORDER BY updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(project_from_row).collect()
}

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<LfaProject> {
    let id: String = row.get("id");
    let status: String = row.get("status");
    let geography: Option<String> = row.get("geography");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(LfaProject {
        id: super::parse_uuid("id", &id)?,
        title: row.get("title"),
        theme: row.get("theme"),
        status: ProjectStatus::parse(&status)
            .ok_or_else(|| Error::Internal(format!("Unknown project status: {}", status)))?,
        completion_percentage: row.get::<i64, _>("completion_percentage") as u8,
        geography: geography
            .map(|g| serde_json::from_str(&g))
            .transpose()
            .map_err(|e| Error::Internal(format!("Failed to deserialize geography: {}", e)))?,
        created_at: super::parse_timestamp("created_at", &created_at)?,
        updated_at: super::parse_timestamp("updated_at", &updated_at)?,
    })
}

/// Persist a recomputed completion percentage and derived status
pub async fn update_completion(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    project_id: Uuid,
    percentage: u8,
    status: ProjectStatus,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE projects
        SET completion_percentage = ?, status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(percentage as i64)
    .bind(status.as_str())
    .bind(updated_at.to_rfc3339())
    .bind(project_id.to_string())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
