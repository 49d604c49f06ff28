use crate::domain::ports::{Notification, Notifier};

/// Notifier that hands the structured event to the log. Template rendering
/// and actual mail delivery live outside this service; deployments wire in
/// their own `Notifier` the same way tests wire in a recording one.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: &Notification) -> Result<(), String> {
        match notification {
            Notification::OrderConfirmed { order } => {
                log::info!(
                    "order confirmation: order={} total={} items={}",
                    order.id,
                    order.total,
                    order.items.len()
                );
            }
            Notification::PaymentConfirmed {
                order,
                transaction_id,
            } => {
                let recipient = order
                    .shipping
                    .as_ref()
                    .map(|s| s.email.as_str())
                    .unwrap_or("<no email on file>");
                log::info!(
                    "payment confirmation: order={} transaction={} amount={} to={}",
                    order.id,
                    transaction_id,
                    order.total,
                    recipient
                );
            }
        }
        Ok(())
    }
}
