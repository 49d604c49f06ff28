use std::env;
use std::sync::Arc;

use dotenvy::dotenv;

use storefront_service::application::notifications::NotificationDispatcher;
use storefront_service::application::orders::OrderService;
use storefront_service::application::payments::PaymentBridge;
use storefront_service::config::PaymentConfig;
use storefront_service::domain::ports::{CatalogQuery, Notifier, OrderRepository, PaymentGateway};
use storefront_service::infrastructure::catalog::DieselCatalog;
use storefront_service::infrastructure::gateway::HttpPaymentGateway;
use storefront_service::infrastructure::notifier::LogNotifier;
use storefront_service::infrastructure::order_repo::DieselOrderRepository;
use storefront_service::{build_server, create_pool, run_migrations, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let payment_config = PaymentConfig::from_env();

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let catalog: Arc<dyn CatalogQuery> = Arc::new(DieselCatalog::new(pool.clone()));
    let repo: Arc<dyn OrderRepository> = Arc::new(DieselOrderRepository::new(pool.clone()));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(HttpPaymentGateway::new(payment_config.clone()));
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    let state = AppState::new(
        OrderService::new(catalog.clone(), repo.clone()),
        PaymentBridge::new(gateway, repo, payment_config),
        NotificationDispatcher::new(notifier),
        catalog,
    );

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(state, &host, port)?.await
}
