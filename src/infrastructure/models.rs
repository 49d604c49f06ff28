use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    OrderItem, OrderStatus, OrderView, PaymentIntent, PaymentProof, PaymentStatus, Product,
    ShippingDetails,
};
use crate::schema::{order_items, orders, payment_intents, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: String,
    pub created_date: NaiveDate,
    pub status: String,
    pub payment_status: String,
    pub total: BigDecimal,
    pub payment_intent_id: Option<String>,
    pub payment_transaction_id: Option<String>,
    pub payment_signature: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_zip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: String,
    pub created_date: NaiveDate,
    pub status: String,
    pub payment_status: String,
    pub total: BigDecimal,
}

/// Everything the `pending -> confirmed` transition writes, applied as one
/// UPDATE inside the locking transaction. `None` shipping fields are left
/// untouched by diesel's changeset semantics.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct ConfirmPaymentChangeset {
    pub status: String,
    pub payment_status: String,
    pub payment_intent_id: String,
    pub payment_transaction_id: String,
    pub payment_signature: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_zip: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
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

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            brand: row.brand,
            category: row.category,
            image_url: row.image_url,
            rating: row.rating,
            review_count: row.review_count,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payment_intents)]
#[diesel(primary_key(intent_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentIntentRow {
    pub intent_id: String,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = payment_intents)]
pub struct NewPaymentIntentRow {
    pub intent_id: String,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

impl From<PaymentIntentRow> for PaymentIntent {
    fn from(row: PaymentIntentRow) -> Self {
        PaymentIntent {
            intent_id: row.intent_id,
            order_id: row.order_id,
            amount_minor: row.amount_minor,
            currency: row.currency,
        }
    }
}

impl OrderRow {
    pub fn into_view(self, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
        let payment = match (
            self.payment_intent_id,
            self.payment_transaction_id,
            self.payment_signature,
        ) {
            (Some(intent_id), Some(transaction_id), Some(signature)) => Some(PaymentProof {
                intent_id,
                transaction_id,
                signature,
            }),
            _ => None,
        };

        let shipping = match (
            self.customer_name,
            self.customer_email,
            self.customer_phone,
            self.shipping_address,
            self.shipping_city,
            self.shipping_state,
            self.shipping_zip,
        ) {
            (Some(name), Some(email), Some(phone), Some(address), Some(city), Some(state), Some(zip)) => {
                Some(ShippingDetails {
                    name,
                    email,
                    phone,
                    address,
                    city,
                    state,
                    zip,
                })
            }
            _ => None,
        };

        Ok(OrderView {
            id: self.id,
            created_date: self.created_date,
            status: OrderStatus::parse(&self.status)?,
            payment_status: PaymentStatus::parse(&self.payment_status)?,
            total: self.total,
            items: items
                .into_iter()
                .map(|i| OrderItem {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
            payment,
            shipping,
        })
    }
}
