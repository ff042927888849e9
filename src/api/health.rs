use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Course marketplace server is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; `status` is `degraded` when MongoDB is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(db: web::Data<MongoDB>) -> impl Responder {
    let (status, database) = match db.ping().await {
        Ok(()) => ("healthy", "up"),
        Err(e) => {
            log::warn!("⚠️ Health check: MongoDB unreachable: {}", e);
            ("degraded", "down")
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
