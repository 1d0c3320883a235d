//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::DepartmentNotFound
            | Self::JobNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DepartmentNameExists
            | Self::DepartmentHasEmployees
            | Self::JobNameExists
            | Self::JobHasEmployees => StatusCode::CONFLICT,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and remaining business rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
