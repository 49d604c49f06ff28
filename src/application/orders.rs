use std::sync::Arc;

use crate::application::pricing::{price_cart, PricedLine};
use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, OrderItem, OrderView};
use crate::domain::ports::{CatalogQuery, OrderRepository};

/// An order together with its items resolved to full catalog products, the
/// shape the read endpoints return.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: OrderView,
    pub items: Vec<PricedLine>,
}

/// Prices carts and drives the order ledger. Pure orchestration: pricing is
/// a snapshot read, persistence is a single repository transaction.
#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<dyn CatalogQuery>,
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(catalog: Arc<dyn CatalogQuery>, repo: Arc<dyn OrderRepository>) -> Self {
        Self { catalog, repo }
    }

    /// Price the cart, then persist the order with its locked-in total.
    /// Fails before any write if a product is unknown or a quantity invalid.
    pub fn create_order(&self, items: Vec<LineItem>) -> Result<OrderDetail, DomainError> {
        let cart = price_cart(self.catalog.as_ref(), &items)?;

        let order_items = cart
            .lines
            .iter()
            .map(|l| OrderItem {
                product_id: l.product.id.clone(),
                quantity: l.quantity,
            })
            .collect();

        let order = self.repo.create(order_items, cart.total.clone())?;
        Ok(OrderDetail {
            order,
            items: cart.lines,
        })
    }

    pub fn get_order(&self, id: &str) -> Result<Option<OrderDetail>, DomainError> {
        match self.repo.find_by_id(id)? {
            Some(order) => Ok(Some(self.with_products(order)?)),
            None => Ok(None),
        }
    }

    pub fn list_orders(&self) -> Result<Vec<OrderDetail>, DomainError> {
        self.repo
            .list()?
            .into_iter()
            .map(|order| self.with_products(order))
            .collect()
    }

    fn with_products(&self, order: OrderView) -> Result<OrderDetail, DomainError> {
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            match self.catalog.resolve(&item.product_id)? {
                Some(product) => items.push(PricedLine {
                    product,
                    quantity: item.quantity,
                }),
                // A product removed from the catalog after the order was
                // placed; the order total stays valid, the line is just not
                // displayable.
                None => log::warn!(
                    "order {} references product '{}' no longer in catalog",
                    order.id,
                    item.product_id
                ),
            }
        }
        Ok(OrderDetail { order, items })
    }
}
