//! Component endpoints
//!
//! The update handler enforces the content-tag check at the boundary: a
//! payload whose tagged content disagrees with the declared component
//! type is rejected before any write.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::model::{ComponentContent, ComponentType, LfaComponent};
use crate::AppState;

/// PUT /projects/:id/components request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentRequest {
    pub component_type: ComponentType,
    pub content: ComponentContent,
    pub is_complete: bool,
    #[serde(default)]
    pub changed_by: Option<String>,
}

/// PUT /projects/:id/components response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentResponse {
    pub component: LfaComponent,
    /// Project completion after the transactional recompute
    pub completion_percentage: u8,
}

/// GET /projects/:id/components
pub async fn get_components(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<LfaComponent>>> {
    ensure_project_exists(&state, project_id).await?;
    let components = db::components::get_components(&state.db, project_id).await?;
    Ok(Json(components))
}

/// PUT /projects/:id/components
pub async fn update_component(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<UpdateComponentRequest>,
) -> ApiResult<Json<UpdateComponentResponse>> {
    if request.content.component_type() != request.component_type {
        return Err(ApiError::ContentTypeMismatch {
            payload: request.content.component_type().as_str().to_string(),
            declared: request.component_type.as_str().to_string(),
        });
    }

    ensure_project_exists(&state, project_id).await?;

    let component = db::components::update_component(
        &state.db,
        project_id,
        &request.content,
        request.is_complete,
        request.changed_by.as_deref(),
    )
    .await?;

    let project = db::projects::get_project(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {}", project_id)))?;

    Ok(Json(UpdateComponentResponse {
        component,
        completion_percentage: project.completion_percentage,
    }))
}

async fn ensure_project_exists(state: &AppState, project_id: Uuid) -> ApiResult<()> {
    db::projects::get_project(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {}", project_id)))?;
    Ok(())
}

/// Build component routes
pub fn component_routes() -> Router<AppState> {
    Router::new().route(
        "/projects/:id/components",
        get(get_components).put(update_component),
    )
}
