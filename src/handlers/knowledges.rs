use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::store::BulkWriteSummary;
use crate::middleware::{parse_id, ApiResponse, ApiResult, BearerToken, ValidJson};
use crate::models::{CreateKnowledge, Knowledge, KnowledgeOrder, Stored, UpdateKnowledge};
use crate::services::knowledge::KnowledgeSubjects;

/// POST /knowledges - Create a Knowledge Area for the token's user
pub async fn create(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidJson(payload): ValidJson<CreateKnowledge>,
) -> ApiResult<Stored<Knowledge>> {
    let knowledge = state.knowledges.create(payload, &token).await?;
    Ok(ApiResponse::created(knowledge))
}

/// GET /knowledges
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Stored<Knowledge>>> {
    Ok(ApiResponse::success(state.knowledges.find_all().await?))
}

/// GET /knowledges/users/:userId
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<Stored<Knowledge>>> {
    Ok(ApiResponse::success(state.knowledges.find_by_user(&user_id).await?))
}

/// GET /knowledges/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Knowledge>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.knowledges.find_by_id(id).await?))
}

/// PATCH /knowledges/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateKnowledge>,
) -> ApiResult<Stored<Knowledge>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.knowledges.update(id, payload).await?))
}

/// DELETE /knowledges/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Stored<Knowledge>> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.knowledges.delete(id).await?))
}

/// PUT /knowledges/:id/subjects/:subjectId - Link an existing subject
pub async fn add_subject(
    State(state): State<AppState>,
    Path((id, subject_id)): Path<(String, String)>,
) -> ApiResult<Stored<Knowledge>> {
    let id = parse_id("id", &id)?;
    let subject_id = parse_id("subjectId", &subject_id)?;
    Ok(ApiResponse::success(state.knowledges.add_subject(id, subject_id).await?))
}

/// GET /knowledges/:id/subjects - The area with its subjects resolved
pub async fn subjects(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<KnowledgeSubjects> {
    let id = parse_id("id", &id)?;
    Ok(ApiResponse::success(state.knowledges.subjects(id).await?))
}

/// PATCH /knowledges/order
pub async fn update_order(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<KnowledgeOrder>,
) -> ApiResult<BulkWriteSummary> {
    Ok(ApiResponse::success(state.knowledges.update_order(&body.knowledge).await?))
}
