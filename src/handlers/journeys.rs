use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::error::ApiError;
use crate::middleware::{parse_id, ApiResponse, ApiResult, ValidJson};
use crate::models::{CreateJourney, Journey, JourneyOrder, JourneyParent, ManageJourneyTrail, Stored, UpdateJourney};
use crate::services::journey::JourneyTrails;

/// POST /journeys - Create under the subject or start point named in the body
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateJourney>,
) -> ApiResult<Stored<Journey>> {
    let journey = state.journeys.create(payload).await?;
    Ok(ApiResponse::created(journey))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<Journey>>> {
    Ok(ApiResponse::success(state.journeys.find_all().await?))
}

/// GET /journeys/subject/:id
pub async fn list_by_subject(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Stored<Journey>>> {
    let id = parse_id("id", &id)?;
    let parent = JourneyParent::Subject(id);
    Ok(ApiResponse::success(state.journeys.find_by_parent(parent).await?))
}

/// GET /journeys/point/:id
pub async fn list_by_point(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Stored<Journey>>> {
    let id = parse_id("id", &id)?;
    let parent = JourneyParent::StartPoint(id);
    Ok(ApiResponse::success(state.journeys.find_by_parent(parent).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Journey>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.journeys.find_by_id(id).await?))
}

/// PUT /journeys/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateJourney>,
) -> ApiResult<Stored<Journey>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.journeys.update(id, payload).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Journey>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.journeys.delete(id).await?))
}

/// PATCH /journeys/:id/add-trail
pub async fn add_trail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ManageJourneyTrail>,
) -> ApiResult<Stored<Journey>> {
    let id = parse_id("id", &id)?;
    let trail_id = body
        .trail_id
        .ok_or_else(|| ApiError::validation_error("trailId is required", None))?;
    Ok(ApiResponse::success(state.journeys.add_trail(id, trail_id).await?))
}

/// GET /journeys/:id/trails
pub async fn trails(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<JourneyTrails> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.journeys.trails(id).await?))
}

/// PUT /journeys/:id/reconcile
pub async fn reconcile(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Journey>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.journeys.reconcile(id).await?))
}

/// PATCH /journeys/update-journeys-order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<JourneyOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.journeys.update_order(&body.journeys).await?))
}
