use actix_web::{HttpResponse, ResponseError};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    /// Constraint violations are the storage layer's verdict on user
    /// input, so they surface as conflicts instead of 500s.
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if let Some(mapped) = constraint_violation(db_err.code().as_deref()) {
                return mapped;
            }
        }
        AppError::Database(e)
    }
}

/// 23505 is a duplicate key, 23503 a row still referenced by another
/// table (a car with bookings, for example). Anything else stays an
/// opaque database error.
fn constraint_violation(code: Option<&str>) -> Option<AppError> {
    match code {
        Some("23505") => Some(AppError::Conflict(
            "A record with this key already exists".to_string(),
        )),
        Some("23503") => Some(AppError::Conflict(
            "Record is referenced by other data and cannot be deleted".to_string(),
        )),
        _ => None,
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<validator::ValidationError> for AppError {
    fn from(e: validator::ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "validation_error".to_string(),
                message: msg.clone(),
            }),
            AppError::Authentication(msg) => HttpResponse::Unauthorized().json(ErrorResponse {
                error: "authentication_error".to_string(),
                message: msg.clone(),
            }),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(ErrorResponse {
                error: "authorization_error".to_string(),
                message: msg.clone(),
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: msg.clone(),
            }),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(ErrorResponse {
                error: "conflict".to_string(),
                message: msg.clone(),
            }),
            other => {
                error!("Unhandled error: {}", other);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "internal_server_error".to_string(),
                    message: "An internal server error occurred".to_string(),
                })
            }
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Validation("bad input".to_string());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authentication_maps_to_401() {
        let err = AppError::Authentication("no token".to_string());
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound("car".to_string());
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_key_is_a_conflict() {
        let err = constraint_violation(Some("23505")).unwrap();
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn referenced_row_delete_is_a_conflict() {
        let err = constraint_violation(Some("23503")).unwrap();
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn other_database_codes_stay_opaque() {
        assert!(constraint_violation(Some("42P01")).is_none());
        assert!(constraint_violation(None).is_none());
    }

    #[test]
    fn internal_errors_leak_no_detail() {
        let err = AppError::Internal("pool exhausted at 10.0.0.3".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
