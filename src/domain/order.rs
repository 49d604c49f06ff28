use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use super::errors::DomainError;

/// Display-level order status. `Confirmed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Internal(format!(
                "unrecognised order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(DomainError::Internal(format!(
                "unrecognised payment status '{other}'"
            ))),
        }
    }
}

/// Outcome of attempting the `pending -> confirmed` transition.
///
/// `AlreadyConfirmed` exists so duplicate gateway callbacks stay idempotent:
/// the caller reports success but must not re-write shipping details or
/// re-send notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTransition {
    Apply,
    AlreadyConfirmed,
}

/// The order state machine, checked inside the repository transaction that
/// also performs the write. Keeping it a pure function lets every storage
/// backend share the exact same transition rules.
pub fn confirm_transition(current: OrderStatus) -> Result<ConfirmTransition, DomainError> {
    match current {
        OrderStatus::Pending => Ok(ConfirmTransition::Apply),
        OrderStatus::Confirmed => Ok(ConfirmTransition::AlreadyConfirmed),
        OrderStatus::Cancelled => Err(DomainError::InvalidTransition {
            from: current.as_str().to_string(),
        }),
    }
}

/// Generate a fresh order id. Human-readable prefix, UUID-backed so
/// concurrent creations cannot collide.
pub fn new_order_id() -> String {
    format!("ORD-{}", Uuid::new_v4().simple())
}

/// A catalog product, read-only to the order core.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub brand: String,
    pub category: String,
    pub image_url: String,
    pub rating: f64,
    pub review_count: i32,
}

/// One requested cart line. Transient input, never persisted standalone.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: i32,
}

/// A stored (product reference, quantity) pair on an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Payment identifiers attached to an order at confirmation time.
#[derive(Debug, Clone)]
pub struct PaymentProof {
    pub intent_id: String,
    pub transaction_id: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub created_date: NaiveDate,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: BigDecimal,
    pub items: Vec<OrderItem>,
    pub payment: Option<PaymentProof>,
    pub shipping: Option<ShippingDetails>,
}

/// A gateway-side payment reservation, recorded so the completion callback
/// can be checked against the order total it was created for.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub intent_id: String,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirms() {
        assert_eq!(
            confirm_transition(OrderStatus::Pending).unwrap(),
            ConfirmTransition::Apply
        );
    }

    #[test]
    fn confirmed_is_idempotent() {
        assert_eq!(
            confirm_transition(OrderStatus::Confirmed).unwrap(),
            ConfirmTransition::AlreadyConfirmed
        );
    }

    #[test]
    fn cancelled_rejects_confirmation() {
        let err = confirm_transition(OrderStatus::Cancelled).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition { ref from } if from == "cancelled"
        ));
    }

    #[test]
    fn status_round_trips() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(s.as_str()).unwrap(), s);
        }
        assert!(OrderStatus::parse("shipped").is_err());
    }

    #[test]
    fn order_ids_are_unique() {
        let a = new_order_id();
        let b = new_order_id();
        assert!(a.starts_with("ORD-"));
        assert_ne!(a, b);
    }
}
