use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::error::ApiError;
use crate::middleware::{parse_id, ApiResponse, ApiResult, BearerToken, ValidJson};
use crate::models::{CreateStartPoint, ManageStartPointJourney, StartPoint, StartPointOrder, Stored, UpdateStartPoint};
use crate::services::start_point::StartPointJourneys;

/// POST /points
pub async fn create(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidJson(payload): ValidJson<CreateStartPoint>,
) -> ApiResult<Stored<StartPoint>> {
    let point = state.points.create(payload, &token).await?;
    Ok(ApiResponse::created(point))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<StartPoint>>> {
    Ok(ApiResponse::success(state.points.find_all().await?))
}

/// GET /points/user/:userId
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Stored<StartPoint>>> {
    Ok(ApiResponse::success(state.points.find_by_user(&user_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<StartPoint>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.points.find_by_id(id).await?))
}

/// PUT /points/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateStartPoint>,
) -> ApiResult<Stored<StartPoint>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.points.update(id, payload).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<StartPoint>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.points.delete(id).await?))
}

/// PATCH /points/:id/add-journey
pub async fn add_journey(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ManageStartPointJourney>,
) -> ApiResult<Stored<StartPoint>> {
    let id = parse_id("id", &id)?;
    let journey_id = body
        .journey_id
        .ok_or_else(|| ApiError::validation_error("journeyId is required", None))?;
    Ok(ApiResponse::success(state.points.add_journey(id, journey_id).await?))
}

/// GET /points/:id/journeys
pub async fn journeys(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StartPointJourneys> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.points.journeys(id).await?))
}

/// PUT /points/:id/reconcile
pub async fn reconcile(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<StartPoint>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.points.reconcile(id).await?))
}

/// PATCH /points/update-point-order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<StartPointOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.points.update_order(&body.points).await?))
}
