use actix_web::{web, HttpResponse, Responder};

use super::{found, store_failure, EmailQuery};
use crate::database::MongoDB;
use crate::models::CartItem;
use crate::services::cart_service;

pub async fn add_to_cart(db: web::Data<MongoDB>, item: web::Json<CartItem>) -> impl Responder {
    log::info!("🛒 POST /add-to-cart - class {} for {}", item.class_id, item.user_mail);

    match cart_service::add_to_cart(&db, item.into_inner()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to add to cart", e),
    }
}

/// GET /cart-item/{classId}?email=
pub async fn get_cart_item(
    db: web::Data<MongoDB>,
    class_id: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    match cart_service::find_cart_item(&db, &class_id, query.email.as_deref()).await {
        Ok(item) => found(item),
        Err(e) => store_failure("Failed to fetch cart item", e),
    }
}

pub async fn get_cart(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match cart_service::cart_classes(&db, &email).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => store_failure("Failed to fetch cart", e),
    }
}

/// DELETE /delete-cart-item/{classId}[?email=]
pub async fn delete_cart_item(
    db: web::Data<MongoDB>,
    class_id: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    log::info!("🗑️ DELETE /delete-cart-item/{}", class_id);

    match cart_service::delete_cart_item(&db, &class_id, query.email.as_deref()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to delete cart item", e),
    }
}
