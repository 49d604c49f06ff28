use std::env;

/// Payment gateway credentials and endpoint, injected into the
/// `PaymentBridge` at construction time. No process-wide singletons: tests
/// build their own instances with throwaway secrets.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL of the gateway REST API.
    pub gateway_url: String,
    /// Public key id, returned to clients so they can open the checkout.
    pub key_id: String,
    /// Shared secret. Signs nothing on our side; used to recompute the
    /// HMAC of gateway completion callbacks.
    pub key_secret: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            gateway_url: env::var("PAYMENT_GATEWAY_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".to_string()),
            key_id: env::var("PAYMENT_KEY_ID").expect("PAYMENT_KEY_ID must be set"),
            key_secret: env::var("PAYMENT_KEY_SECRET").expect("PAYMENT_KEY_SECRET must be set"),
        }
    }
}
