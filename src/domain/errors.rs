use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Order not found")]
    OrderNotFound,
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
    #[error("Invalid payment signature")]
    InvalidSignature,
    #[error("Payment verification mismatch")]
    PaymentTampering,
    #[error("Invalid order transition from '{from}'")]
    InvalidTransition { from: String },
    #[error("Internal error: {0}")]
    Internal(String),
}
