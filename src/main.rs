use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salesdesk::config::Config;
use salesdesk::core::cache::{Cache, MemoryCache};
use salesdesk::middleware::RequestLog;
use salesdesk::modules::customers::repositories::{CustomerRepository, MySqlCustomerRepository};
use salesdesk::modules::customers::services::PhoneValidator;
use salesdesk::modules::orders::repositories::{MySqlOrderRepository, OrderRepository};
use salesdesk::modules::reports::repositories::{MySqlReportStore, ReportStore};
use salesdesk::modules::reports::services::ReportService;
use salesdesk::modules::sales::repositories::{MySqlSalesRepository, SalesRepository};
use salesdesk::modules::{customers, orders, reports};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesdesk=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting SalesDesk Order Management API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Shared cache behind every cache-aside consumer
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());

    let customers_repo: Arc<dyn CustomerRepository> =
        Arc::new(MySqlCustomerRepository::new(db_pool.clone(), cache.clone()));
    let orders_repo: Arc<dyn OrderRepository> =
        Arc::new(MySqlOrderRepository::new(db_pool.clone(), cache.clone()));
    let sales_repo: Arc<dyn SalesRepository> = Arc::new(MySqlSalesRepository::new(db_pool.clone()));
    let report_store: Arc<dyn ReportStore> = Arc::new(MySqlReportStore::new(db_pool.clone()));

    let report_service = web::Data::new(ReportService::new(
        report_store,
        cache.clone(),
        Duration::from_secs(config.app.report_cache_ttl_secs),
    ));
    let phone_validator = web::Data::new(
        PhoneValidator::new(&config.services).expect("Failed to build phone validation client"),
    );

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .app_data(web::Data::from(customers_repo.clone()))
            .app_data(web::Data::from(orders_repo.clone()))
            .app_data(web::Data::from(sales_repo.clone()))
            .app_data(report_service.clone())
            .app_data(phone_validator.clone())
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
            .service(
                web::scope("/api/v1")
                    .configure(customers::controllers::configure)
                    .configure(orders::controllers::configure)
                    .configure(reports::controllers::configure),
            )
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "salesdesk"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "SalesDesk Order Management API",
        "version": "0.1.0",
        "status": "running"
    }))
}
