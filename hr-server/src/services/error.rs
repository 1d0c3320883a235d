//! Service-layer error type
//!
//! `ServiceError` bridges repository faults and business-rule violations
//! ([`AppError`]) so services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

/// - `Repo`: unexpected store fault (logged, reported to the client generically)
/// - `App`: business-rule violation (passed through to the client)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Repo(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Repo(repo_err) => {
                tracing::error!(error = %repo_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError).with_detail("cause", repo_err.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
