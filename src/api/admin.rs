use actix_web::{web, HttpResponse, Responder};

use super::store_failure;
use crate::database::MongoDB;
use crate::models::AdminStats;
use crate::services::stats_service;

#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard counters", body = AdminStats),
        (status = 401, description = "Missing token or caller is not an admin"),
        (status = 403, description = "Bad token or caller not in the user store")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_stats(db: web::Data<MongoDB>) -> impl Responder {
    match stats_service::admin_stats(&db).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => store_failure("Failed to fetch admin stats", e),
    }
}
