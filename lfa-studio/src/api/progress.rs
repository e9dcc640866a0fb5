//! Journey progress endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::journey::{self, ProjectProgress, QuestCompletion, JOURNEY};
use crate::AppState;

/// PUT /projects/:id/progress request body (manual pointer override)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideProgressRequest {
    pub current_level: u32,
    pub current_quest: u32,
}

/// POST /projects/:id/progress/complete-quest request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestRequest {
    pub level_id: u32,
    pub quest_id: String,
}

/// POST /projects/:id/progress/complete-quest response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestResponse {
    pub progress: ProjectProgress,
    pub outcome: QuestCompletion,
}

/// GET /projects/:id/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<ProjectProgress>> {
    let progress = load_progress(&state, project_id).await?;
    Ok(Json(progress))
}

/// PUT /projects/:id/progress
///
/// Manual pointer override. The pointer stays within catalog bounds and
/// the level never decreases; skipping forward backfills the skipped
/// quests into the completed set (no points or badges) so the set stays
/// a superset of all quests below the pointer.
pub async fn override_progress(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<OverrideProgressRequest>,
) -> ApiResult<Json<ProjectProgress>> {
    let mut progress = load_progress(&state, project_id).await?;

    let level = JOURNEY
        .level(request.current_level)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown level: {}", request.current_level)))?;
    if request.current_quest < 1 || request.current_quest > level.last_position() {
        return Err(ApiError::BadRequest(format!(
            "Quest position {} out of range for level {}",
            request.current_quest, request.current_level
        )));
    }
    if request.current_level < progress.current_level {
        return Err(ApiError::BadRequest(format!(
            "Level cannot decrease (current {}, requested {})",
            progress.current_level, request.current_level
        )));
    }

    journey::backfill_completed(
        &JOURNEY,
        &mut progress,
        request.current_level,
        request.current_quest,
    );
    progress.current_level = request.current_level;
    progress.current_quest = request.current_quest;
    db::progress::save_progress(&state.db, project_id, &progress).await?;

    Ok(Json(progress))
}

/// POST /projects/:id/progress/complete-quest
pub async fn complete_quest(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<CompleteQuestRequest>,
) -> ApiResult<Json<CompleteQuestResponse>> {
    let mut progress = load_progress(&state, project_id).await?;
    let now = lfa_common::time::now();

    let outcome = journey::complete_quest(
        &JOURNEY,
        &mut progress,
        request.level_id,
        &request.quest_id,
        now,
    )?;

    db::progress::save_progress(&state.db, project_id, &progress).await?;

    Ok(Json(CompleteQuestResponse { progress, outcome }))
}

async fn load_progress(state: &AppState, project_id: Uuid) -> ApiResult<ProjectProgress> {
    db::progress::get_progress(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Progress for project {}", project_id)))
}

/// Build progress routes
pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/:id/progress",
            get(get_progress).put(override_progress),
        )
        .route(
            "/projects/:id/progress/complete-quest",
            post(complete_quest),
        )
}
