use actix_web::{web, HttpResponse, Responder};

use super::store_failure;
use crate::database::MongoDB;
use crate::services::{class_service, enrollment_service};

/// Top six classes by enrollment count.
pub async fn popular_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::popular_classes(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => store_failure("Failed to fetch popular classes", e),
    }
}

pub async fn popular_instructors(db: web::Data<MongoDB>) -> impl Responder {
    match enrollment_service::popular_instructors(&db).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => store_failure("Failed to fetch popular instructors", e),
    }
}

pub async fn enrolled_classes(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match enrollment_service::enrolled_classes(&db, &email).await {
        Ok(rows) => {
            log::debug!("📚 GET /enrolled-classes/{} - {} class(es)", email, rows.len());
            HttpResponse::Ok().json(rows)
        }
        Err(e) => store_failure("Failed to fetch enrolled classes", e),
    }
}
