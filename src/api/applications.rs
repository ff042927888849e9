use actix_web::{web, HttpResponse, Responder};

use super::{found, store_failure};
use crate::database::MongoDB;
use crate::models::Application;
use crate::services::application_service;

pub async fn apply(db: web::Data<MongoDB>, application: web::Json<Application>) -> impl Responder {
    log::info!(
        "📝 POST /as-instructor - {}",
        application.email.as_deref().unwrap_or("N/A")
    );

    match application_service::apply_as_instructor(&db, application.into_inner()).await {
        Ok(ack) => HttpResponse::Ok().json(ack),
        Err(e) => store_failure("Failed to submit application", e),
    }
}

pub async fn get_application(db: web::Data<MongoDB>, email: web::Path<String>) -> impl Responder {
    match application_service::find_application(&db, &email).await {
        Ok(application) => found(application),
        Err(e) => store_failure("Failed to fetch application", e),
    }
}
