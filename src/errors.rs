use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Payment gateway unavailable")]
    BadGateway(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownProduct(_)
            | DomainError::InvalidInput(_)
            | DomainError::InvalidSignature
            | DomainError::PaymentTampering => AppError::BadRequest(e.to_string()),
            DomainError::OrderNotFound => AppError::NotFound,
            DomainError::InvalidTransition { .. } => AppError::Conflict(e.to_string()),
            DomainError::GatewayUnavailable(msg) => AppError::BadGateway(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Internal detail never leaks to the client beyond a generic
            // message; the cause is logged server-side.
            AppError::Internal(msg) => {
                log::error!("internal error: {msg}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
            AppError::BadGateway(msg) => {
                log::error!("payment gateway call failed: {msg}");
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "Payment gateway unavailable"
                }))
            }
            other => HttpResponse::build(other.status_code()).json(serde_json::json!({
                "error": other.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn unknown_product_maps_to_400() {
        let err: AppError = DomainError::UnknownProduct("prod_9".to_string()).into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("prod_9"));
    }

    #[test]
    fn invalid_signature_maps_to_400() {
        let err: AppError = DomainError::InvalidSignature.into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn tampering_maps_to_400() {
        let err: AppError = DomainError::PaymentTampering.into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn order_not_found_maps_to_404() {
        let err: AppError = DomainError::OrderNotFound.into();
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let err: AppError = DomainError::InvalidTransition {
            from: "cancelled".to_string(),
        }
        .into();
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn gateway_unavailable_maps_to_502() {
        let err: AppError = DomainError::GatewayUnavailable("timeout".to_string()).into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_error_is_opaque() {
        let err: AppError = DomainError::Internal("connection string leaked".to_string()).into();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
