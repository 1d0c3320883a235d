//! Department API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};

use crate::core::ServerState;
use crate::server::extractor::{ApiJson, ApiPath};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", id)
}

/// GET /api/departments - 获取所有部门
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    let departments = state.departments.list_all().await?;
    Ok(Json(departments))
}

/// GET /api/departments/:id - 获取单个部门
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Department>> {
    let department = state
        .departments
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(department))
}

/// GET /api/departments/by-name/:name - 按名称查找
pub async fn get_by_name(
    State(state): State<ServerState>,
    ApiPath(name): ApiPath<String>,
) -> AppResult<Json<Department>> {
    let department = state
        .departments
        .get_by_name(&name)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("name", name))?;
    Ok(Json(department))
}

/// POST /api/departments - 创建部门
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DepartmentCreate>,
) -> AppResult<Json<Department>> {
    let department = state.departments.add(payload).await?;
    Ok(Json(department))
}

/// PUT /api/departments/:id - 更新部门
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    let department = state
        .departments
        .update(payload.into_department(id))
        .await?;
    Ok(Json(department))
}

/// DELETE /api/departments/:id - 删除部门
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    state.departments.delete(id).await?;
    Ok(Json(true))
}

/// GET /api/departments/:id/has-employees - 部门下是否有员工
pub async fn has_employees(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    let result = state.employees.has_employees_in_department(id).await?;
    Ok(Json(result))
}
