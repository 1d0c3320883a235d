//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error with code, message and details
//! - [`ApiResponse`]: Error body of failed requests
//!
//! # Error Code Ranges
//!
//! - 0xxx: General request errors
//! - 1xxx: Department errors
//! - 2xxx: Job errors
//! - 3xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::DepartmentNotFound).with_detail("id", 42);
//! assert_eq!(err.user_message(), "Operation failed: Department not found");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 1001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, UNEXPECTED_FAULT_MESSAGE};
