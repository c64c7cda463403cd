use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::middleware::{parse_id, ApiResponse, ApiResult, BearerToken, ValidJson};
use crate::models::{CreateSubject, Stored, Subject, SubjectOrder, UpdateSubject};
use crate::services::subject::SubjectJourneys;

/// POST /subjects - Create a subject for the token's user, optionally inside
/// the Knowledge Area named by `knowledgeId`
pub async fn create(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidJson(payload): ValidJson<CreateSubject>,
) -> ApiResult<Stored<Subject>> {
    let subject = state.subjects.create(payload, &token).await?;
    Ok(ApiResponse::created(subject))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<Subject>>> {
    Ok(ApiResponse::success(state.subjects.find_all().await?))
}

/// GET /subjects/users/:userId
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Stored<Subject>>> {
    Ok(ApiResponse::success(state.subjects.find_by_user(&user_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Subject>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.subjects.find_by_id(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateSubject>,
) -> ApiResult<Stored<Subject>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.subjects.update(id, payload).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Subject>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.subjects.delete(id).await?))
}

/// PUT /subjects/:id/journeys/:journeyId
pub async fn add_journey(
    State(state): State<AppState>,
    Path((id, journey_id)): Path<(String, String)>,
) -> ApiResult<Stored<Subject>> {
    let id = parse_id("id", &id)?;
    let journey_id = parse_id("journeyId", &journey_id)?;
    Ok(ApiResponse::success(state.subjects.add_journey(id, journey_id).await?))
}

/// GET /subjects/:id/journeys
pub async fn journeys(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<SubjectJourneys> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.subjects.journeys(id).await?))
}

/// PUT /subjects/:id/reconcile - Re-attach journeys that point at this
/// subject but are missing from its list
pub async fn reconcile(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Subject>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.subjects.reconcile(id).await?))
}

/// PATCH /subjects/order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SubjectOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.subjects.update_order(&body.subjects).await?))
}
