use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::SaleNotFound(_)
            | DomainError::CorrelativeNotFound(_)
            | DomainError::PaymentMethodNotFound(_) => AppError::NotFound(e.to_string()),
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            // A correlative conflict is retried inside the service; one that
            // escapes is a server-side failure.
            DomainError::CorrelativeTaken(_) | DomainError::Internal(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(
                serde_json::json!({
                    "error": "Internal server error"
                }),
            ),
        }
    }
}
