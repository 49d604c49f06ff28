use std::sync::Arc;

use bigdecimal::{BigDecimal, ToPrimitive};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::PaymentConfig;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    ConfirmTransition, OrderView, PaymentIntent, PaymentProof, ShippingDetails,
};
use crate::domain::ports::{GatewayIntent, OrderRepository, PaymentGateway};

/// Compute the callback signature the gateway is expected to send:
/// hex-encoded HMAC-SHA256 over `"{intent_id}|{transaction_id}"`.
///
/// The service itself never signs anything in production; this exists for
/// tests and local gateway stubs.
pub fn sign_callback(secret: &str, intent_id: &str, transaction_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{intent_id}|{transaction_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a gateway completion callback. Constant-time comparison via
/// `Mac::verify_slice`; a malformed (non-hex) signature is simply invalid.
pub fn verify_callback_signature(
    secret: &str,
    intent_id: &str,
    transaction_id: &str,
    signature: &str,
) -> bool {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{intent_id}|{transaction_id}").as_bytes());
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };
    mac.verify_slice(&sig_bytes).is_ok()
}

/// An order total expressed in minor currency units, the unit the gateway
/// deals in. Totals carry scale 2, so the conversion is exact.
pub fn total_minor(total: &BigDecimal) -> Result<i64, DomainError> {
    (total * BigDecimal::from(100))
        .with_scale(0)
        .to_i64()
        .ok_or_else(|| DomainError::Internal(format!("order total '{total}' out of range")))
}

/// Talks to the external payment processor and guards the single trust
/// boundary of the system: nothing transitions an order to `confirmed`
/// without a valid callback signature and an amount that matches the total
/// the intent was created for.
#[derive(Clone)]
pub struct PaymentBridge {
    gateway: Arc<dyn PaymentGateway>,
    repo: Arc<dyn OrderRepository>,
    config: PaymentConfig,
}

impl PaymentBridge {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        repo: Arc<dyn OrderRepository>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            gateway,
            repo,
            config,
        }
    }

    pub fn public_key(&self) -> &str {
        &self.config.key_id
    }

    /// Check that `receipt` names an existing order and that the requested
    /// amount equals its locked-in total.
    pub fn validate_receipt(&self, amount_minor: i64, receipt: &str) -> Result<(), DomainError> {
        let order = self
            .repo
            .find_by_id(receipt)?
            .ok_or(DomainError::OrderNotFound)?;
        if amount_minor != total_minor(&order.total)? {
            return Err(DomainError::PaymentTampering);
        }
        Ok(())
    }

    /// Ask the gateway for a payment intent. Remote failures surface as
    /// `GatewayUnavailable`; there is no retry here.
    pub async fn request_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayIntent, DomainError> {
        self.gateway
            .create_intent(amount_minor, currency, receipt)
            .await
    }

    /// Persist the intent so verification can later re-check its amount
    /// against the order total.
    pub fn record_intent(
        &self,
        intent: GatewayIntent,
        order_id: &str,
    ) -> Result<PaymentIntent, DomainError> {
        let record = PaymentIntent {
            intent_id: intent.intent_id,
            order_id: order_id.to_string(),
            amount_minor: intent.amount_minor,
            currency: intent.currency,
        };
        self.repo.record_intent(&record)?;
        Ok(record)
    }

    pub fn verify_callback(&self, intent_id: &str, transaction_id: &str, signature: &str) -> bool {
        verify_callback_signature(&self.config.key_secret, intent_id, transaction_id, signature)
    }

    /// Full callback handling: signature check, amount re-check against the
    /// recorded intent, then the transactional `pending -> confirmed`
    /// transition. A failed check never mutates the order.
    pub fn confirm_payment(
        &self,
        order_id: &str,
        proof: &PaymentProof,
        shipping: Option<&ShippingDetails>,
    ) -> Result<(ConfirmTransition, OrderView), DomainError> {
        if !self.verify_callback(&proof.intent_id, &proof.transaction_id, &proof.signature) {
            return Err(DomainError::InvalidSignature);
        }

        let order = self
            .repo
            .find_by_id(order_id)?
            .ok_or(DomainError::OrderNotFound)?;

        // Signature validity alone does not prove the amount. The intent we
        // recorded at creation time must exist, belong to this order, and
        // carry exactly the order's total.
        let intent = self
            .repo
            .find_intent(&proof.intent_id)?
            .ok_or(DomainError::PaymentTampering)?;
        if intent.order_id != order.id || intent.amount_minor != total_minor(&order.total)? {
            return Err(DomainError::PaymentTampering);
        }

        self.repo.confirm_payment(order_id, proof, shipping)
    }
}
