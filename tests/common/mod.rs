//! In-memory implementations of the service's ports, used to exercise the
//! full HTTP surface without Postgres or a live payment gateway.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;

use storefront_service::application::notifications::NotificationDispatcher;
use storefront_service::application::orders::OrderService;
use storefront_service::application::payments::PaymentBridge;
use storefront_service::config::PaymentConfig;
use storefront_service::domain::errors::DomainError;
use storefront_service::domain::order::{
    confirm_transition, new_order_id, ConfirmTransition, OrderItem, OrderStatus, OrderView,
    PaymentIntent, PaymentProof, PaymentStatus, Product, ShippingDetails,
};
use storefront_service::domain::ports::{
    CatalogQuery, GatewayIntent, Notification, Notifier, OrderRepository, PaymentGateway,
};
use storefront_service::infrastructure::catalog::canonical_id;
use storefront_service::AppState;

pub const TEST_SECRET: &str = "test_gateway_secret";
pub const TEST_KEY_ID: &str = "rzp_test_key";

// ── Order store ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryStore {
    orders: Mutex<Vec<OrderView>>,
    intents: Mutex<HashMap<String, PaymentIntent>>,
}

impl InMemoryStore {
    pub fn order(&self, id: &str) -> Option<OrderView> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// Test hook: cancellation policy is external to the service, so tests
    /// flip the status directly to set up terminal-state scenarios.
    pub fn set_status(&self, id: &str, status: OrderStatus) {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .expect("unknown order in set_status");
        order.status = status;
    }
}

impl OrderRepository for InMemoryStore {
    fn create(&self, items: Vec<OrderItem>, total: BigDecimal) -> Result<OrderView, DomainError> {
        let order = OrderView {
            id: new_order_id(),
            created_date: Utc::now().date_naive(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            total,
            items,
            payment: None,
            shipping: None,
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<OrderView>, DomainError> {
        Ok(self.order(id))
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        Ok(self.orders.lock().unwrap().clone())
    }

    fn record_intent(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        self.intents
            .lock()
            .unwrap()
            .insert(intent.intent_id.clone(), intent.clone());
        Ok(())
    }

    fn find_intent(&self, intent_id: &str) -> Result<Option<PaymentIntent>, DomainError> {
        Ok(self.intents.lock().unwrap().get(intent_id).cloned())
    }

    fn confirm_payment(
        &self,
        order_id: &str,
        proof: &PaymentProof,
        shipping: Option<&ShippingDetails>,
    ) -> Result<(ConfirmTransition, OrderView), DomainError> {
        // The mutex plays the role of the row lock: the read-check-write
        // below is serialized per store.
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::OrderNotFound)?;

        let transition = confirm_transition(order.status)?;
        if transition == ConfirmTransition::Apply {
            order.status = OrderStatus::Confirmed;
            order.payment_status = PaymentStatus::Paid;
            order.payment = Some(proof.clone());
            order.shipping = shipping.cloned();
        }
        Ok((transition, order.clone()))
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn with_products(entries: &[(&str, &str, &str)]) -> Self {
        let products = entries
            .iter()
            .map(|(id, name, price)| {
                (
                    id.to_string(),
                    Product {
                        id: id.to_string(),
                        name: name.to_string(),
                        description: format!("{name} description"),
                        price: BigDecimal::from_str(price).unwrap(),
                        brand: "Apex Performance".to_string(),
                        category: "Engine".to_string(),
                        image_url: String::new(),
                        rating: 4.5,
                        review_count: 10,
                    },
                )
            })
            .collect();
        Self {
            products: Mutex::new(products),
        }
    }

    pub fn set_price(&self, id: &str, price: &str) {
        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(id).expect("unknown product in set_price");
        product.price = BigDecimal::from_str(price).unwrap();
    }
}

impl CatalogQuery for InMemoryCatalog {
    fn resolve(&self, product_id: &str) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .get(canonical_id(product_id))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> =
            self.products.lock().unwrap().values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }
}

// ── Gateway ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeGateway {
    counter: AtomicU64,
    pub unavailable: AtomicBool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayIntent, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::GatewayUnavailable(
                "connection refused".to_string(),
            ));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayIntent {
            intent_id: format!("pay_intent_{n}"),
            amount_minor,
            currency: currency.to_string(),
        })
    }
}

// ── Notifier ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn count(&self, kind: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == kind)
            .count()
    }

    /// Let every already-spawned delivery task run to completion, then count
    /// notifications of `kind`. The test runtime is single-threaded, so
    /// yielding drains the spawn queue deterministically with no sleeps.
    pub async fn delivered(&self, kind: &str) -> usize {
        for _ in 0..64 {
            tokio::task::yield_now().await;
        }
        self.count(kind)
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, notification: &Notification) -> Result<(), String> {
        self.sent.lock().unwrap().push((
            notification.kind().to_string(),
            notification.order_id().to_string(),
        ));
        Ok(())
    }
}

// ── Wiring ───────────────────────────────────────────────────────────────────

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub gateway: Arc<FakeGateway>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::with_products(&[
            ("prod_1", "V8 Turbocharger Kit", "50.00"),
            ("prod_2", "Performance Brake Kit", "1299.00"),
            ("prod_8", "Cold Air Intake System", "399.99"),
        ]));
        let store = Arc::new(InMemoryStore::default());
        let gateway = Arc::new(FakeGateway::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let config = PaymentConfig {
            gateway_url: "http://gateway.invalid".to_string(),
            key_id: TEST_KEY_ID.to_string(),
            key_secret: TEST_SECRET.to_string(),
        };

        let state = AppState::new(
            OrderService::new(catalog.clone(), store.clone()),
            PaymentBridge::new(gateway.clone(), store.clone(), config),
            NotificationDispatcher::new(notifier.clone()),
            catalog.clone(),
        );

        Self {
            state,
            store,
            catalog,
            gateway,
            notifier,
        }
    }
}
