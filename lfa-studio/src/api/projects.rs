//! Project endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::model::{Geography, LfaProject};
use crate::AppState;

/// POST /projects request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub theme: String,
    #[serde(default)]
    pub geography: Option<Geography>,
}

/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<Json<LfaProject>> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Project title is required".to_string()));
    }
    if request.theme.trim().is_empty() {
        return Err(ApiError::BadRequest("Project theme is required".to_string()));
    }

    let project = db::projects::create_project(
        &state.db,
        request.title.trim(),
        request.theme.trim(),
        request.geography.as_ref(),
    )
    .await?;

    Ok(Json(project))
}

/// GET /projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<LfaProject>>> {
    let projects = db::projects::list_projects(&state.db).await?;
    Ok(Json(projects))
}

/// GET /projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<LfaProject>> {
    let project = db::projects::get_project(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {}", project_id)))?;

    Ok(Json(project))
}

/// Build project routes
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project).get(list_projects))
        .route("/projects/:id", get(get_project))
}
