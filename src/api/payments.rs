use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use super::store_failure;
use crate::database::MongoDB;
use crate::models::{CheckoutRequest, PaymentCount};
use crate::services::payment_service;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuery {
    /// Set for a single-class purchase; only that cart row is cleared.
    pub class_id: Option<String>,
}

pub async fn checkout(
    db: web::Data<MongoDB>,
    query: web::Query<CheckoutQuery>,
    request: web::Json<CheckoutRequest>,
) -> impl Responder {
    log::info!(
        "💳 POST /payment-info - {} ({} class(es))",
        request.user_email,
        request.classes_id.len()
    );

    match payment_service::checkout(&db, request.into_inner(), query.class_id.as_deref()).await {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => store_failure("Failed to record payment", e),
    }
}

pub async fn payment_history(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match payment_service::payment_history(&db, &email).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => store_failure("Failed to fetch payment history", e),
    }
}

#[utoipa::path(
    get,
    path = "/payment-history-length/{email}",
    tag = "Payments",
    params(("email" = String, Path, description = "Buyer email")),
    responses(
        (status = 200, description = "Number of payments", body = PaymentCount),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Bad or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn payment_count(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match payment_service::payment_count(&db, &email).await {
        Ok(count) => HttpResponse::Ok().json(count),
        Err(e) => store_failure("Failed to count payments", e),
    }
}
