pub mod notifications;
pub mod orders;
pub mod payments;
pub mod pricing;
