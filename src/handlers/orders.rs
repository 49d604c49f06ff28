use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::application::orders::OrderDetail;
use crate::application::pricing::PricedLine;
use crate::domain::order::LineItem;
use crate::domain::ports::Notification;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub brand: String,
    pub category: String,
    pub image_url: String,
    pub rating: f64,
    pub review_count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product: ProductResponse,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    /// Calendar date of creation, e.g. "2026-08-10"
    pub date: String,
    pub status: String,
    pub payment_status: String,
    /// Decimal total as a string, locked in at creation time
    pub total: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<PricedLine> for OrderItemResponse {
    fn from(line: PricedLine) -> Self {
        OrderItemResponse {
            product: ProductResponse {
                id: line.product.id,
                name: line.product.name,
                description: line.product.description,
                price: line.product.price.to_string(),
                brand: line.product.brand,
                category: line.product.category,
                image_url: line.product.image_url,
                rating: line.product.rating,
                review_count: line.product.review_count,
            },
            quantity: line.quantity,
        }
    }
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        OrderResponse {
            id: detail.order.id,
            date: detail.order.created_date.to_string(),
            status: detail.order.status.as_str().to_string(),
            payment_status: detail.order.payment_status.as_str().to_string(),
            total: detail.order.total.to_string(),
            items: detail.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Prices the cart against the current catalog and persists the order with
/// its line items in a single transaction. Any unknown product id aborts the
/// whole request; nothing is persisted.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created in pending state", body = OrderResponse),
        (status = 400, description = "Unknown product or invalid quantity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let items: Vec<LineItem> = body
        .into_inner()
        .items
        .into_iter()
        .map(|i| LineItem {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();

    let orders = state.orders.clone();
    let detail = web::block(move || orders.create_order(items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    // After commit only; delivery failure never surfaces here.
    let _ = state.notifications.dispatch(Notification::OrderConfirmed {
        order: detail.order.clone(),
    });

    Ok(HttpResponse::Created().json(json!({ "order": OrderResponse::from(detail) })))
}

/// GET /orders/{id}
///
/// Returns the order with its items resolved to full product details and the
/// per-item quantity taken from the stored line items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id, e.g. ORD-..."),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let orders = state.orders.clone();
    let detail = web::block(move || orders.get_order(&order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match detail {
        Some(detail) => Ok(HttpResponse::Ok().json(OrderResponse::from(detail))),
        None => Err(AppError::NotFound),
    }
}

/// GET /orders
///
/// Returns all orders in insertion order.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "List of orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = state.orders.clone();
    let details = web::block(move || orders.list_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderResponse> = details.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}
