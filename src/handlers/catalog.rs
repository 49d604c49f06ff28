use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::handlers::orders::ProductResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total: usize,
}

/// GET /products
///
/// Unfiltered catalog listing. Search, sorting and filtering belong to the
/// catalog service proper; this projection exists so the storefront can
/// render what the order endpoints reference.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All catalog products", body = ProductListResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let catalog = state.catalog.clone();
    let products = web::block(move || catalog.list())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<ProductResponse> = products
        .into_iter()
        .map(|p| ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            brand: p.brand,
            category: p.category,
            image_url: p.image_url,
            rating: p.rating,
            review_count: p.review_count,
        })
        .collect();

    let total = items.len();
    Ok(HttpResponse::Ok().json(ProductListResponse { items, total }))
}
