use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized access")]
    Unauthenticated,
    #[error("Forbidden user or token has expired")]
    Forbidden,
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(e: mongodb::bson::oid::Error) -> Self {
        AppError::InvalidId(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::Token(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": true,
                "message": "Unauthorized access"
            })),
            AppError::Forbidden | AppError::Token(_) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": true,
                "message": "Forbidden user or token has expired"
            })),
            other => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": other.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Token(TokenError::Expired).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn signing_failure_is_a_server_error() {
        let err: AppError = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidAlgorithm,
        )
        .into();
        assert!(matches!(err, AppError::Signing(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn everything_else_is_a_500() {
        assert_eq!(
            AppError::InvalidId("zz".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Serialization("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bad_object_id_becomes_invalid_id() {
        let err: AppError = mongodb::bson::oid::ObjectId::parse_str("not-hex").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidId(_)));
    }
}
