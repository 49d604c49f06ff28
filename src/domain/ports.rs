use async_trait::async_trait;
use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::order::{
    ConfirmTransition, OrderItem, OrderView, PaymentIntent, PaymentProof, Product, ShippingDetails,
};

/// Storage port. Implementations must make `create` and `confirm_payment`
/// transactional: the read-check-write in `confirm_payment` has to run under
/// the store's serialization discipline (single transaction or row lock) so
/// two concurrent callbacks cannot both observe `pending`.
pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, items: Vec<OrderItem>, total: BigDecimal) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: &str) -> Result<Option<OrderView>, DomainError>;
    fn list(&self) -> Result<Vec<OrderView>, DomainError>;

    fn record_intent(&self, intent: &PaymentIntent) -> Result<(), DomainError>;
    fn find_intent(&self, intent_id: &str) -> Result<Option<PaymentIntent>, DomainError>;

    /// Apply `pending -> confirmed` atomically: status, payment status,
    /// payment identifiers and shipping details all commit together.
    /// Returns the transition outcome alongside the resulting order so the
    /// caller can decide whether to notify.
    fn confirm_payment(
        &self,
        order_id: &str,
        proof: &PaymentProof,
        shipping: Option<&ShippingDetails>,
    ) -> Result<(ConfirmTransition, OrderView), DomainError>;
}

/// Read-only catalog port. `resolve` applies legacy alias mapping before the
/// lookup, so callers always deal in canonical product ids.
pub trait CatalogQuery: Send + Sync + 'static {
    fn resolve(&self, product_id: &str) -> Result<Option<Product>, DomainError>;
    fn list(&self) -> Result<Vec<Product>, DomainError>;
}

#[derive(Debug, Clone)]
pub struct GatewayIntent {
    pub intent_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Remote payment processor port.
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayIntent, DomainError>;
}

#[derive(Debug, Clone)]
pub enum Notification {
    OrderConfirmed {
        order: OrderView,
    },
    PaymentConfirmed {
        order: OrderView,
        transaction_id: String,
    },
}

/// Outbound notification port (email, webhook, ...). Delivery is best-effort;
/// errors are reported back as strings for the dispatcher to log.
pub trait Notifier: Send + Sync + 'static {
    fn send(&self, notification: &Notification) -> Result<(), String>;
}
