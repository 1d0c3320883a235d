//! Unified error codes for the personnel records service
//!
//! Error codes are organized by category:
//! - 0xxx: General request errors
//! - 1xxx: Department errors
//! - 2xxx: Job errors
//! - 3xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so API clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 1001,
    /// Another department already uses this name
    DepartmentNameExists = 1002,
    /// Department still has employees assigned
    DepartmentHasEmployees = 1003,
    /// Employee must be assigned to a department
    DepartmentRequired = 1004,

    // ==================== 2xxx: Job ====================
    /// Job not found
    JobNotFound = 2001,
    /// Another job already uses this name
    JobNameExists = 2002,
    /// Job still has employees assigned
    JobHasEmployees = 2003,
    /// Employee must be assigned to a job
    JobRequired = 2004,

    // ==================== 3xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee name is required
    EmployeeNameRequired = 3002,
    /// Employee identity card number is required
    EmployeeCardIdRequired = 3003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field is missing",
            Self::ValueOutOfRange => "Value is out of range",

            // Department
            Self::DepartmentNotFound => "Department not found",
            Self::DepartmentNameExists => "Department name already exists",
            Self::DepartmentHasEmployees => "Department still has employees",
            Self::DepartmentRequired => "Department is required",

            // Job
            Self::JobNotFound => "Job not found",
            Self::JobNameExists => "Job name already exists",
            Self::JobHasEmployees => "Job still has employees",
            Self::JobRequired => "Job is required",

            // Employee
            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeNameRequired => "Employee name is required",
            Self::EmployeeCardIdRequired => "Employee card id is required",

            // System
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown `u16` into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Department
            1001 => Ok(ErrorCode::DepartmentNotFound),
            1002 => Ok(ErrorCode::DepartmentNameExists),
            1003 => Ok(ErrorCode::DepartmentHasEmployees),
            1004 => Ok(ErrorCode::DepartmentRequired),

            // Job
            2001 => Ok(ErrorCode::JobNotFound),
            2002 => Ok(ErrorCode::JobNameExists),
            2003 => Ok(ErrorCode::JobHasEmployees),
            2004 => Ok(ErrorCode::JobRequired),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeNameRequired),
            3003 => Ok(ErrorCode::EmployeeCardIdRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
