use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::PaymentConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::{GatewayIntent, PaymentGateway};

/// REST client for the payment processor. Any transport failure or non-2xx
/// response surfaces as `GatewayUnavailable`; the caller decides whether to
/// retry.
pub struct HttpPaymentGateway {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl HttpPaymentGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GatewayOrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayIntent, DomainError> {
        let resp = self
            .http
            .post(format!("{}/orders", self.config.gateway_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| DomainError::GatewayUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::GatewayUnavailable(format!(
                "gateway returned {}",
                resp.status()
            )));
        }

        let body: GatewayOrderResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::GatewayUnavailable(format!("malformed response: {e}")))?;

        Ok(GatewayIntent {
            intent_id: body.id,
            amount_minor: body.amount,
            currency: body.currency,
        })
    }
}
