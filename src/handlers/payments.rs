use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::{ConfirmTransition, PaymentProof, ShippingDetails};
use crate::domain::ports::Notification;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentOrderRequest {
    /// Amount in minor currency units (e.g. paise); must equal the order total.
    pub amount: i64,
    pub currency: String,
    /// The order id this payment settles.
    pub receipt: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentOrderResponse {
    pub intent_id: String,
    pub amount: i64,
    pub currency: String,
    /// Public gateway key for the client-side checkout widget.
    pub public_key: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShippingDetailsRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl From<ShippingDetailsRequest> for ShippingDetails {
    fn from(r: ShippingDetailsRequest) -> Self {
        ShippingDetails {
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            city: r.city,
            state: r.state,
            zip: r.zip,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub intent_id: String,
    pub transaction_id: String,
    pub signature: String,
    #[serde(default)]
    pub shipping_details: Option<ShippingDetailsRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_status: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /payments/create-order
///
/// Requests a payment intent from the gateway for an existing order. The
/// requested amount must equal the order's locked-in total; the intent is
/// recorded before it is handed back so verification can re-check the amount
/// later.
#[utoipa::path(
    post,
    path = "/payments/create-order",
    request_body = CreatePaymentOrderRequest,
    responses(
        (status = 200, description = "Payment intent created", body = CreatePaymentOrderResponse),
        (status = 400, description = "Amount does not match the order total"),
        (status = 404, description = "Receipt does not name a known order"),
        (status = 502, description = "Payment gateway unavailable"),
    ),
    tag = "payments"
)]
pub async fn create_payment_order(
    state: web::Data<AppState>,
    body: web::Json<CreatePaymentOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let bridge = state.payments.clone();

    {
        let bridge = bridge.clone();
        let receipt = body.receipt.clone();
        let amount = body.amount;
        web::block(move || bridge.validate_receipt(amount, &receipt))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;
    }

    let intent = bridge
        .request_intent(body.amount, &body.currency, &body.receipt)
        .await?;

    let record = {
        let bridge = bridge.clone();
        let receipt = body.receipt.clone();
        web::block(move || bridge.record_intent(intent, &receipt))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??
    };

    Ok(HttpResponse::Ok().json(CreatePaymentOrderResponse {
        intent_id: record.intent_id,
        amount: record.amount_minor,
        currency: record.currency,
        public_key: bridge.public_key().to_string(),
    }))
}

/// POST /payments/verify
///
/// Handles the gateway completion callback: HMAC signature check, amount
/// re-check against the recorded intent, then the transactional
/// `pending -> confirmed` transition. Duplicate callbacks are idempotent and
/// do not re-send the payment notification.
#[utoipa::path(
    post,
    path = "/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified, order confirmed", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid signature or amount mismatch"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is in a state that cannot be confirmed"),
    ),
    tag = "payments"
)]
pub async fn verify_payment(
    state: web::Data<AppState>,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let transaction_id = body.transaction_id.clone();

    let bridge = state.payments.clone();
    let (transition, order) = web::block(move || {
        let proof = PaymentProof {
            intent_id: body.intent_id,
            transaction_id: body.transaction_id,
            signature: body.signature,
        };
        let shipping = body.shipping_details.map(ShippingDetails::from);
        bridge.confirm_payment(&body.order_id, &proof, shipping.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    // Notify only on the first confirmation, never on a duplicate callback.
    if transition == ConfirmTransition::Apply {
        let _ = state.notifications.dispatch(Notification::PaymentConfirmed {
            order: order.clone(),
            transaction_id,
        });
    }

    Ok(HttpResponse::Ok().json(VerifyPaymentResponse {
        success: true,
        order_id: order.id,
        payment_status: order.payment_status.as_str().to_string(),
    }))
}
