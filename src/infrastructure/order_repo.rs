use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    confirm_transition, new_order_id, ConfirmTransition, OrderItem, OrderStatus, OrderView,
    PaymentIntent, PaymentProof, PaymentStatus, ShippingDetails,
};
use crate::domain::ports::OrderRepository;
use crate::infrastructure::models::{
    ConfirmPaymentChangeset, NewOrderItemRow, NewOrderRow, NewPaymentIntentRow, OrderItemRow,
    OrderRow, PaymentIntentRow,
};
use crate::schema::{order_items, orders, payment_intents};

/// Postgres-backed order ledger. Creation and confirmation each run inside a
/// single transaction; confirmation additionally takes a `FOR UPDATE` row
/// lock so concurrent callbacks for the same order serialize on the
/// read-check-write.
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_view(conn: &mut PgConnection, order_id: &str) -> Result<Option<OrderView>, DomainError> {
    let row = orders::table
        .find(order_id)
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let items = order_items::table
        .filter(order_items::order_id.eq(&row.id))
        .select(OrderItemRow::as_select())
        .load(conn)?;

    Ok(Some(row.into_view(items)?))
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, items: Vec<OrderItem>, total: BigDecimal) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order_id = new_order_id();
            let new_order = NewOrderRow {
                id: order_id.clone(),
                created_date: Utc::now().date_naive(),
                status: OrderStatus::Pending.as_str().to_string(),
                payment_status: PaymentStatus::Unpaid.as_str().to_string(),
                total,
            };
            diesel::insert_into(orders::table)
                .values(&new_order)
                .execute(conn)?;

            let rows: Vec<NewOrderItemRow> = items
                .iter()
                .map(|item| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id: order_id.clone(),
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&rows)
                .execute(conn)?;

            load_view(conn, &order_id)?.ok_or_else(|| {
                DomainError::Internal("created order not visible in its own transaction".to_string())
            })
        })
    }

    fn find_by_id(&self, id: &str) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;
        load_view(&mut conn, id)
    }

    fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.asc())
            .load(&mut conn)?;

        let item_rows: Vec<OrderItemRow> = OrderItemRow::belonging_to(&rows)
            .select(OrderItemRow::as_select())
            .load(&mut conn)?;

        item_rows
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(items, row)| row.into_view(items))
            .collect()
    }

    fn record_intent(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(payment_intents::table)
            .values(&NewPaymentIntentRow {
                intent_id: intent.intent_id.clone(),
                order_id: intent.order_id.clone(),
                amount_minor: intent.amount_minor,
                currency: intent.currency.clone(),
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn find_intent(&self, intent_id: &str) -> Result<Option<PaymentIntent>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = payment_intents::table
            .find(intent_id)
            .select(PaymentIntentRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(PaymentIntent::from))
    }

    fn confirm_payment(
        &self,
        order_id: &str,
        proof: &PaymentProof,
        shipping: Option<&ShippingDetails>,
    ) -> Result<(ConfirmTransition, OrderView), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Row lock: a concurrent callback for the same order blocks here
            // until this transaction commits, then observes `confirmed`.
            let row = orders::table
                .find(order_id)
                .select(OrderRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::OrderNotFound)?;

            let transition = confirm_transition(OrderStatus::parse(&row.status)?)?;

            if transition == ConfirmTransition::Apply {
                let changes = ConfirmPaymentChangeset {
                    status: OrderStatus::Confirmed.as_str().to_string(),
                    payment_status: PaymentStatus::Paid.as_str().to_string(),
                    payment_intent_id: proof.intent_id.clone(),
                    payment_transaction_id: proof.transaction_id.clone(),
                    payment_signature: proof.signature.clone(),
                    customer_name: shipping.map(|s| s.name.clone()),
                    customer_email: shipping.map(|s| s.email.clone()),
                    customer_phone: shipping.map(|s| s.phone.clone()),
                    shipping_address: shipping.map(|s| s.address.clone()),
                    shipping_city: shipping.map(|s| s.city.clone()),
                    shipping_state: shipping.map(|s| s.state.clone()),
                    shipping_zip: shipping.map(|s| s.zip.clone()),
                    updated_at: Utc::now(),
                };
                diesel::update(orders::table.find(order_id))
                    .set(&changes)
                    .execute(conn)?;
            }

            let view = load_view(conn, order_id)?.ok_or(DomainError::OrderNotFound)?;
            Ok((transition, view))
        })
    }
}
