//! Job API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Job, JobCreate, JobUpdate};

use crate::core::ServerState;
use crate::server::extractor::{ApiJson, ApiPath};

/// GET /api/jobs - 获取所有职位
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Job>>> {
    Ok(Json(state.jobs.list_all().await?))
}

/// GET /api/jobs/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Job>> {
    state
        .jobs
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::JobNotFound).with_detail("id", id))
}

/// GET /api/jobs/by-name/:name
pub async fn get_by_name(
    State(state): State<ServerState>,
    ApiPath(name): ApiPath<String>,
) -> AppResult<Json<Job>> {
    state
        .jobs
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(ErrorCode::JobNotFound).with_detail("name", name))
}

/// POST /api/jobs - 创建职位
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<JobCreate>,
) -> AppResult<Json<Job>> {
    Ok(Json(state.jobs.add(payload).await?))
}

/// PUT /api/jobs/:id - 更新职位
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<JobUpdate>,
) -> AppResult<Json<Job>> {
    Ok(Json(state.jobs.update(payload.into_job(id)).await?))
}

/// DELETE /api/jobs/:id - 删除职位
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    state.jobs.delete(id).await?;
    Ok(Json(true))
}

/// GET /api/jobs/:id/has-employees
pub async fn has_employees(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.employees.has_employees_in_job(id).await?))
}
