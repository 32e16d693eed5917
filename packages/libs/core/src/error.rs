//! 공통 에러 타입
//!
//! Jobly 전체(SQL 빌더, 검증, API 서비스)에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

use crate::validation::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

/// Jobly 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Query Building Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("No data")]
    EmptyUpdate,

    #[error("unknown filter: {name}")]
    UnknownFilter { name: String },

    #[error("filter template for '{name}' has no value marker")]
    InvalidFilterTemplate { name: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("validation failed: {}", join_messages(.errors))]
    Validation { errors: Vec<ValidationError> },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("{message}")]
    NotFound { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Error::Unauthorized {
            message: message.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::EmptyUpdate
            | Error::UnknownFilter { .. }
            | Error::Validation { .. }
            | Error::BadRequest { .. }
            | Error::Json(_) => 400,

            // 401 Unauthorized
            Error::Unauthorized { .. } | Error::InvalidToken { .. } => 401,

            // 404 Not Found
            Error::NotFound { .. } => 404,

            // 500 Internal Server Error
            Error::InvalidFilterTemplate { .. } => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyUpdate => "EMPTY_UPDATE",
            Error::UnknownFilter { .. } => "UNKNOWN_FILTER",
            Error::InvalidFilterTemplate { .. } => "INVALID_FILTER_TEMPLATE",
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::BadRequest { .. } => "BAD_REQUEST",
            Error::Unauthorized { .. } => "UNAUTHORIZED",
            Error::InvalidToken { .. } => "INVALID_TOKEN",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// 검증 실패 목록 (Validation 에러가 아니면 빈 슬라이스)
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Error::Validation { errors } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::EmptyUpdate.status_code(), 400);
        assert_eq!(
            Error::UnknownFilter {
                name: "color".to_string()
            }
            .status_code(),
            400
        );
        assert_eq!(Error::not_found("No job: 7").status_code(), 404);
        assert_eq!(Error::unauthorized("login required").status_code(), 401);
        assert_eq!(
            Error::InvalidFilterTemplate {
                name: "title".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_empty_update_message() {
        assert_eq!(Error::EmptyUpdate.to_string(), "No data");
        assert_eq!(Error::EmptyUpdate.code(), "EMPTY_UPDATE");
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = Error::Validation {
            errors: vec![
                ValidationError::new("instance", "requires property \"title\""),
                ValidationError::new("instance.salary", "is not of a type(s) integer"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "validation failed: instance requires property \"title\"; instance.salary is not of a type(s) integer"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }
}
