pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;
use std::time::Instant;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::notifications::NotificationDispatcher;
use application::orders::OrderService;
use application::payments::PaymentBridge;
use domain::ports::CatalogQuery;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Everything the handlers need, wired once at startup (or per-test with
/// in-memory ports).
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub payments: PaymentBridge,
    pub notifications: NotificationDispatcher,
    pub catalog: Arc<dyn CatalogQuery>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        orders: OrderService,
        payments: PaymentBridge,
        notifications: NotificationDispatcher,
        catalog: Arc<dyn CatalogQuery>,
    ) -> Self {
        Self {
            orders,
            payments,
            notifications,
            catalog,
            started_at: Instant::now(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::payments::create_payment_order,
        handlers::payments::verify_payment,
        handlers::catalog::list_products,
    ),
    components(schemas(
        handlers::orders::CreateOrderItemRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::ProductResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
        handlers::payments::CreatePaymentOrderRequest,
        handlers::payments::CreatePaymentOrderResponse,
        handlers::payments::ShippingDetailsRequest,
        handlers::payments::VerifyPaymentRequest,
        handlers::payments::VerifyPaymentResponse,
        handlers::catalog::ProductListResponse,
    )),
    tags(
        (name = "orders", description = "Order creation and read projections"),
        (name = "payments", description = "Payment intent creation and callback verification"),
        (name = "catalog", description = "Read-only catalog projections"),
    )
)]
pub struct ApiDoc;

/// Register all API routes. Shared between the real server and the
/// integration tests, which assemble their own `App` over fake ports.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health))
        .route("/products", web::get().to(handlers::catalog::list_products))
        .service(
            web::scope("/orders")
                .route("", web::post().to(handlers::orders::create_order))
                .route("", web::get().to(handlers::orders::list_orders))
                .route("/{id}", web::get().to(handlers::orders::get_order)),
        )
        .service(
            web::scope("/payments")
                .route("/create-order", web::post().to(handlers::payments::create_payment_order))
                .route("/verify", web::post().to(handlers::payments::verify_payment)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
