//! Journey progress database operations
//!
//! The completed-quest set and earned badges are stored as JSON TEXT;
//! the rest of the record maps to plain columns. Saves are upserts so a
//! progress row can be restored from an export without ceremony.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use lfa_common::{Error, Result};

use crate::journey::ProjectProgress;

/// Load the progress record of one project
pub async fn get_progress(pool: &SqlitePool, project_id: Uuid) -> Result<Option<ProjectProgress>> {
    let row = sqlx::query(
        r#"
        SELECT current_level, current_quest, completed_quests, earned_badges,
               total_points, streak_days, last_activity_at
        FROM project_progress
        WHERE project_id = ?
        "#,
    )
    .bind(project_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let completed_quests: String = row.get("completed_quests");
            let earned_badges: String = row.get("earned_badges");
            let last_activity_at: String = row.get("last_activity_at");

            Ok(Some(ProjectProgress {
                current_level: row.get::<i64, _>("current_level") as u32,
                current_quest: row.get::<i64, _>("current_quest") as u32,
                completed_quests: serde_json::from_str(&completed_quests).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize completed_quests: {}", e))
                })?,
                earned_badges: serde_json::from_str(&earned_badges).map_err(|e| {
                    Error::Internal(format!("Failed to deserialize earned_badges: {}", e))
                })?,
                total_points_earned: row.get::<i64, _>("total_points") as u64,
                streak_days: row.get::<i64, _>("streak_days") as u32,
                last_activity_at: super::parse_timestamp("last_activity_at", &last_activity_at)?,
            }))
        }
        None => Ok(None),
    }
}

/// Persist a progress record (insert or update)
pub async fn save_progress(
    pool: &SqlitePool,
    project_id: Uuid,
    progress: &ProjectProgress,
) -> Result<()> {
    let completed_quests = serde_json::to_string(&progress.completed_quests)
        .map_err(|e| Error::Internal(format!("Failed to serialize completed_quests: {}", e)))?;
    let earned_badges = serde_json::to_string(&progress.earned_badges)
        .map_err(|e| Error::Internal(format!("Failed to serialize earned_badges: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO project_progress (
            project_id, current_level, current_quest, completed_quests,
            earned_badges, total_points, streak_days, last_activity_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(project_id) DO UPDATE SET
            current_level = excluded.current_level,
            current_quest = excluded.current_quest,
            completed_quests = excluded.completed_quests,
            earned_badges = excluded.earned_badges,
            total_points = excluded.total_points,
            streak_days = excluded.streak_days,
            last_activity_at = excluded.last_activity_at
        "#,
    )
    .bind(project_id.to_string())
    .bind(progress.current_level as i64)
    .bind(progress.current_quest as i64)
    .bind(&completed_quests)
    .bind(&earned_badges)
    .bind(progress.total_points_earned as i64)
    .bind(progress.streak_days as i64)
    .bind(progress.last_activity_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}
