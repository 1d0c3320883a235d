//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Lengths are counted in characters, not bytes, since most input is CJK.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Department, job and employee names
pub const MAX_NAME_LEN: usize = 100;

/// Remarks, hobbies, specialities
pub const MAX_REMARK_LEN: usize = 500;

/// Short identifiers: card id, phone, tel, QQ, post code, party, race, education
pub const MAX_SHORT_TEXT_LEN: usize = 50;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

fn too_long(field: &str, len: usize, max_len: usize) -> AppError {
    AppError::with_message(
        ErrorCode::ValueOutOfRange,
        format!("{field} is too long ({len} chars, max {max_len})"),
    )
    .with_detail("field", field)
}

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    let len = value.trim().chars().count();
    if len > max_len {
        return Err(too_long(field, len, max_len));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(too_long(field, v.chars().count(), max_len));
    }
    Ok(())
}
