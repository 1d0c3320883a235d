//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`departments`] - 部门管理接口
//! - [`jobs`] - 职位管理接口
//! - [`employees`] - 员工管理接口

pub mod departments;
pub mod employees;
pub mod health;
pub mod jobs;

use axum::Router;

use crate::core::ServerState;

/// All routes, still waiting for state
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(departments::router())
        .merge(jobs::router())
        .merge(employees::router())
}
