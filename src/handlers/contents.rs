use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::middleware::{parse_id, ApiResponse, ApiResult, ValidJson};
use crate::models::{Content, ContentOrder, CreateContent, Stored, UpdateContent};

/// POST /contents - Create inside the trail named by `trailId`
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateContent>,
) -> ApiResult<Stored<Content>> {
    let content = state.contents.create(payload).await?;
    Ok(ApiResponse::created(content))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<Content>>> {
    Ok(ApiResponse::success(state.contents.find_all().await?))
}

/// GET /contents/trail/:id
pub async fn list_by_trail(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Stored<Content>>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.find_by_trail(id).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Content>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.find_by_id(id).await?))
}

/// PATCH /contents/:id - Partial update; a new `trailId` moves the content
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateContent>,
) -> ApiResult<Stored<Content>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.update(id, payload).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Content>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.contents.delete(id).await?))
}

/// PATCH /contents/order/update-order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ContentOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.contents.update_order(&body.contents).await?))
}
