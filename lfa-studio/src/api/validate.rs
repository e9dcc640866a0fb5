//! Validation endpoint
//!
//! Assessment degradation is not an HTTP error: a failed check surfaces
//! as its fallback inside a 200 body.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::validation::{extract, ComprehensiveValidation, SingleValidation, ValidationType};
use crate::AppState;

/// POST /validate request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub project_id: Uuid,
    #[serde(default = "default_validation_type")]
    pub validation_type: ValidationType,
}

fn default_validation_type() -> ValidationType {
    ValidationType::Full
}

/// POST /validate response body
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ValidateResponse {
    Full(ComprehensiveValidation),
    #[serde(rename_all = "camelCase")]
    Single {
        validation_type: ValidationType,
        result: SingleValidation,
    },
}

/// POST /validate
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let project = db::projects::get_project(&state.db, request.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {}", request.project_id)))?;
    let components = db::components::get_components(&state.db, request.project_id).await?;

    let content = extract::extract_content(&project, &components);

    let response = match request.validation_type {
        ValidationType::Full => ValidateResponse::Full(state.aggregator.run_full(&content).await),
        validation_type => ValidateResponse::Single {
            validation_type,
            result: state.aggregator.run_single(validation_type, &content).await,
        },
    };

    Ok(Json(response))
}

/// Build validation routes
pub fn validation_routes() -> Router<AppState> {
    Router::new().route("/validate", post(validate))
}
