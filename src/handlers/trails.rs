use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::error::ApiError;
use crate::middleware::{parse_id, ApiResponse, ApiResult, ValidJson};
use crate::models::{CreateTrail, ManageTrailContent, Stored, Trail, TrailOrder, UpdateTrail};
use crate::services::trail::TrailContents;

/// POST /trails - Create inside the journey named by `journeyId`
pub async fn create(State(state): State<AppState>, ValidJson(payload): ValidJson<CreateTrail>) -> ApiResult<Stored<Trail>> {
    let trail = state.trails.create(payload).await?;
    Ok(ApiResponse::created(trail))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<Trail>>> {
    Ok(ApiResponse::success(state.trails.find_all().await?))
}

/// GET /trails/journey/:id
pub async fn list_by_journey(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Stored<Trail>>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.trails.find_by_journey(id).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Trail>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.trails.find_by_id(id).await?))
}

/// PUT /trails/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateTrail>,
) -> ApiResult<Stored<Trail>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.trails.update(id, payload).await?))
}

fn content_id(body: ManageTrailContent) -> Result<uuid::Uuid, ApiError> {
    body.content_id
        .ok_or_else(|| ApiError::validation_error("contentId is required", None))
}

/// PUT /trails/:id/addContent
pub async fn add_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ManageTrailContent>,
) -> ApiResult<Stored<Trail>> {
    let id = parse_id("id", &id)?;
    let content_id = content_id(body)?;
    Ok(ApiResponse::success(state.trails.add_content(id, content_id).await?))
}

/// PUT /trails/:id/removeContent
pub async fn remove_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ManageTrailContent>,
) -> ApiResult<Stored<Trail>> {
    let id = parse_id("id", &id)?;
    let content_id = content_id(body)?;
    Ok(ApiResponse::success(state.trails.remove_content(id, content_id).await?))
}

/// GET /trails/:id/contents
pub async fn contents(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TrailContents> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.trails.contents(id).await?))
}

/// PUT /trails/:id/reconcile
pub async fn reconcile(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Trail>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.trails.reconcile(id).await?))
}

/// DELETE /trails/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id("id", &id)?;
    state.trails.delete(id).await?;
    Ok(ApiResponse::success(json!({ "message": "Trail deleted successfully" })))
}

/// PATCH /trails/update-trail-order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<TrailOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.trails.update_order(&body.trails).await?))
}
