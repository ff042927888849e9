mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::MongoDB;
use crate::middleware::UserDirectory;
use crate::services::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting Course Marketplace...");
    log::info!("📊 Database: {}", config.database_name);

    let db = MongoDB::connect(&config).await;

    // An unreachable database is not fatal: routes answer 500 until it is back.
    match db.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected successfully");
            if let Err(e) = db.ensure_indexes().await {
                log::warn!("⚠️  Index creation failed: {}", e);
            }
        }
        Err(e) => log::error!("❌ MongoDB ping failed, starting degraded: {}", e),
    }

    let db_data = web::Data::new(db.clone());
    let directory: web::Data<dyn UserDirectory> =
        web::Data::from(Arc::new(db) as Arc<dyn UserDirectory>);
    let tokens = web::Data::new(TokenService::from_config(&config));

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    let allowed_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);
        if allowed_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(directory.clone())
            .app_data(tokens.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
