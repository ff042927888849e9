use actix_web::{web, HttpResponse, Responder};

use super::{found, store_failure, UpsertQuery};
use crate::database::MongoDB;
use crate::models::{ChangeStatusRequest, NewClassRequest, UpdateAck, UpdateClassRequest};
use crate::services::class_service;

pub async fn create_class(db: web::Data<MongoDB>, request: web::Json<NewClassRequest>) -> impl Responder {
    log::info!(
        "📝 POST /new-class - {} by {}",
        request.name.as_deref().unwrap_or("N/A"),
        request.instructor_email.as_deref().unwrap_or("N/A")
    );

    match class_service::create_class(&db, request.into_inner()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to create class", e),
    }
}

pub async fn classes_by_instructor(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match class_service::classes_by_instructor(&db, &email).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => store_failure("Failed to fetch classes", e),
    }
}

/// Public catalogue: approved classes only.
pub async fn approved_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::approved_classes(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => store_failure("Failed to fetch classes", e),
    }
}

pub async fn all_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::all_classes(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => store_failure("Failed to fetch classes", e),
    }
}

pub async fn get_class(db: web::Data<MongoDB>, id: web::Path<String>) -> impl Responder {
    match class_service::find_class(&db, &id).await {
        Ok(class) => found(class),
        Err(e) => store_failure("Failed to fetch class", e),
    }
}

#[utoipa::path(
    put,
    path = "/change-status/{id}",
    tag = "Classes",
    params(
        ("id" = String, Path, description = "Class ObjectId (hex)"),
        UpsertQuery
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateAck),
        (status = 401, description = "Missing token or caller is not an admin"),
        (status = 403, description = "Bad token or caller not in the user store")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_status(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    query: web::Query<UpsertQuery>,
    request: web::Json<ChangeStatusRequest>,
) -> impl Responder {
    log::info!("✏️ PUT /change-status/{} - {}", id, request.status);

    match class_service::change_status(&db, &id, request.into_inner(), query.mode()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to change class status", e),
    }
}

/// Edits send the class back to review.
pub async fn update_class(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    query: web::Query<UpsertQuery>,
    request: web::Json<UpdateClassRequest>,
) -> impl Responder {
    log::info!("✏️ PUT /update-class/{}", id);

    match class_service::update_class(&db, &id, request.into_inner(), query.mode()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to update class", e),
    }
}
