use thiserror::Error;
use uuid::Uuid;

use super::status::SaleStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Sale not found with id: {0}")]
    SaleNotFound(Uuid),

    #[error("Sale not found with correlative: {0}")]
    CorrelativeNotFound(String),

    #[error("Payment method not found with id: {0}")]
    PaymentMethodNotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: SaleStatus, to: SaleStatus },

    /// The generated correlative already exists; the caller is expected to
    /// retry with a fresh one.
    #[error("Correlative already in use: {0}")]
    CorrelativeTaken(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
