use actix_web::{web, HttpResponse, Responder};

use super::{found, store_failure, UpsertQuery};
use crate::database::MongoDB;
use crate::models::{DeleteAck, UpdateUserRequest, User};
use crate::services::user_service;

pub async fn create_user(db: web::Data<MongoDB>, user: web::Json<User>) -> impl Responder {
    log::info!("📝 POST /new-user - email: {}", user.email.as_deref().unwrap_or("N/A"));

    match user_service::create_user(&db, user.into_inner()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to create user", e),
    }
}

pub async fn list_users(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_users(&db).await {
        Ok(users) => {
            log::debug!("📋 GET /users - {} user(s)", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => store_failure("Failed to fetch users", e),
    }
}

pub async fn get_user(db: web::Data<MongoDB>, id: web::Path<String>) -> impl Responder {
    match user_service::find_user_by_id(&db, &id).await {
        Ok(user) => found(user),
        Err(e) => store_failure("Failed to fetch user", e),
    }
}

/// GET /user/{email} (token required)
pub async fn get_user_by_email(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match user_service::find_user_by_email(&db, &email).await {
        Ok(user) => found(user),
        Err(e) => store_failure("Failed to fetch user", e),
    }
}

#[utoipa::path(
    delete,
    path = "/delete-user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "Delete acknowledgement; deletedCount is 0 for an unknown id", body = DeleteAck),
        (status = 401, description = "Missing token or caller is not an admin"),
        (status = 403, description = "Bad token or caller not in the user store")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(db: web::Data<MongoDB>, id: web::Path<String>) -> impl Responder {
    log::info!("🗑️ DELETE /delete-user/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to delete user", e),
    }
}

/// `?upsert=false` turns the update into update-only.
pub async fn update_user(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    query: web::Query<UpsertQuery>,
    request: web::Json<UpdateUserRequest>,
) -> impl Responder {
    log::info!("✏️ PUT /update-user/{}", id);

    match user_service::update_user(&db, &id, request.into_inner(), query.mode()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to update user", e),
    }
}

pub async fn list_instructors(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_instructors(&db).await {
        Ok(instructors) => HttpResponse::Ok().json(instructors),
        Err(e) => store_failure("Failed to fetch instructors", e),
    }
}
