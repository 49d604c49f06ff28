use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::ports::{Notification, Notifier};

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::OrderConfirmed { .. } => "order-confirmed",
            Notification::PaymentConfirmed { .. } => "payment-confirmed",
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            Notification::OrderConfirmed { order } => &order.id,
            Notification::PaymentConfirmed { order, .. } => &order.id,
        }
    }
}

/// Fires notifications after a state transition has committed. Delivery is
/// fire-and-forget: the spawned task logs failures and nothing ever reports
/// them back to the request that triggered the transition.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Spawn delivery of one notification. The returned handle is ignored by
    /// request handlers; tests await it to observe delivery.
    pub fn dispatch(&self, notification: Notification) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            let kind = notification.kind();
            let order_id = notification.order_id().to_string();
            if let Err(e) = notifier.send(&notification) {
                log::warn!("failed to deliver {kind} notification for {order_id}: {e}");
            } else {
                log::info!("delivered {kind} notification for {order_id}");
            }
        })
    }
}
