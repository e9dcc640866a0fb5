//! Component database operations
//!
//! A component update is one transaction: content write, version bump,
//! audit-log insert, and the project's completion recompute commit
//! together. Readers therefore never observe a version without its
//! history entry or a stale completion percentage.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use lfa_common::{Error, Result};

use crate::completion;
use crate::model::{ComponentContent, ComponentType, LfaComponent};

/// Load all components of a project in canonical type order
pub async fn get_components(pool: &SqlitePool, project_id: Uuid) -> Result<Vec<LfaComponent>> {
    let rows = sqlx::query(
        r#"
        SELECT id, project_id, component_type, content, is_complete, version, created_at, updated_at
        FROM lfa_components
        WHERE project_id = ?
        "#,
    )
    .bind(project_id.to_string())
    .fetch_all(pool)
    .await?;

    let mut components: Vec<LfaComponent> = rows
        .iter()
        .map(component_from_row)
        .collect::<Result<Vec<_>>>()?;
    components.sort_by_key(|c| {
        ComponentType::ALL
            .iter()
            .position(|t| *t == c.component_type)
    });

    Ok(components)
}

/// Load one component by project and type
pub async fn get_component(
    pool: &SqlitePool,
    project_id: Uuid,
    component_type: ComponentType,
) -> Result<Option<LfaComponent>> {
    let row = sqlx::query(
        r#"
        SELECT id, project_id, component_type, content, is_complete, version, created_at, updated_at
        FROM lfa_components
        WHERE project_id = ? AND component_type = ?
        "#,
    )
    .bind(project_id.to_string())
    .bind(component_type.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(|row| component_from_row(&row)).transpose()
}

/// Atomically update a component's content and completeness flag
///
/// Bumps the version, appends one audit-log entry, and recomputes the
/// project's completion percentage and status, all in one transaction.
/// Returns the updated component.
pub async fn update_component(
    pool: &SqlitePool,
    project_id: Uuid,
    content: &ComponentContent,
    is_complete: bool,
    changed_by: Option<&str>,
) -> Result<LfaComponent> {
    let component_type = content.component_type();
    let now = lfa_common::time::now();
    let now_str = now.to_rfc3339();

    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r#"
        SELECT id, project_id, component_type, content, is_complete, version, created_at, updated_at
        FROM lfa_components
        WHERE project_id = ? AND component_type = ?
        "#,
    )
    .bind(project_id.to_string())
    .bind(component_type.as_str())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        Error::NotFound(format!(
            "Component {} of project {}",
            component_type.as_str(),
            project_id
        ))
    })?;

    let current = component_from_row(&row)?;
    let new_version = current.version + 1;

    let previous_json = serde_json::to_string(&current.content)
        .map_err(|e| Error::Internal(format!("Failed to serialize previous content: {}", e)))?;
    let new_json = serde_json::to_string(content)
        .map_err(|e| Error::Internal(format!("Failed to serialize content: {}", e)))?;
    let change_summary = format!("{} updated to v{}", component_type.as_str(), new_version);

    sqlx::query(
        r#"
        UPDATE lfa_components
        SET content = ?, is_complete = ?, version = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&new_json)
    .bind(is_complete)
    .bind(new_version)
    .bind(&now_str)
    .bind(current.id.to_string())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO version_history (id, project_id, component_id, changed_by, previous_content, new_content, change_summary, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(project_id.to_string())
    .bind(current.id.to_string())
    .bind(changed_by)
    .bind(&previous_json)
    .bind(&new_json)
    .bind(&change_summary)
    .bind(&now_str)
    .execute(&mut *tx)
    .await?;

    // Recompute the materialized completion view inside the same
    // transaction, using the just-written flag for this component
    let flag_rows = sqlx::query(
        "SELECT component_type, is_complete FROM lfa_components WHERE project_id = ?",
    )
    .bind(project_id.to_string())
    .fetch_all(&mut *tx)
    .await?;

    let complete = flag_rows
        .iter()
        .filter(|r| r.get::<bool, _>("is_complete"))
        .count();
    let percentage = completion::percentage_of(complete, flag_rows.len());
    let status = completion::status_for(percentage);

    super::projects::update_completion(&mut tx, project_id, percentage, status, now).await?;

    tx.commit().await?;

    tracing::info!(
        project_id = %project_id,
        component_type = component_type.as_str(),
        version = new_version,
        completion = percentage,
        "Updated component"
    );

    Ok(LfaComponent {
        content: content.clone(),
        is_complete,
        version: new_version,
        updated_at: now,
        ..current
    })
}

/// Load the audit log of one component, newest first
pub async fn get_version_history(
    pool: &SqlitePool,
    component_id: Uuid,
) -> Result<Vec<crate::model::VersionEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT id, project_id, component_id, changed_by, previous_content, new_content, change_summary, created_at
        FROM version_history
        WHERE component_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(component_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let id: String = row.get("id");
            let project_id: String = row.get("project_id");
            let component_id: String = row.get("component_id");
            let previous: String = row.get("previous_content");
            let new: String = row.get("new_content");
            let created_at: String = row.get("created_at");

            Ok(crate::model::VersionEntry {
                id: super::parse_uuid("id", &id)?,
                project_id: super::parse_uuid("project_id", &project_id)?,
                component_id: super::parse_uuid("component_id", &component_id)?,
                changed_by: row.get("changed_by"),
                previous_content: serde_json::from_str(&previous).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize previous content: {}", e))
                })?,
                new_content: serde_json::from_str(&new).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize new content: {}", e))
                })?,
                change_summary: row.get("change_summary"),
                created_at: super::parse_timestamp("created_at", &created_at)?,
            })
        })
        .collect()
}

fn component_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<LfaComponent> {
    let id: String = row.get("id");
    let project_id: String = row.get("project_id");
    let component_type: String = row.get("component_type");
    let content: String = row.get("content");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let component_type = ComponentType::parse(&component_type)
        .ok_or_else(|| Error::Internal(format!("Unknown component type: {}", component_type)))?;

    Ok(LfaComponent {
        id: super::parse_uuid("id", &id)?,
        project_id: super::parse_uuid("project_id", &project_id)?,
        component_type,
        content: serde_json::from_str(&content)
            .map_err(|e| Error::Internal(format!("Failed to deserialize content: {}", e)))?,
        is_complete: row.get("is_complete"),
        version: row.get("version"),
        created_at: super::parse_timestamp("created_at", &created_at)?,
        updated_at: super::parse_timestamp("updated_at", &updated_at)?,
    })
}
