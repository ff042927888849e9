pub mod admin;
pub mod applications;
pub mod auth;
pub mod cart;
pub mod classes;
pub mod enrollment;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod users;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::middleware::{AuthMiddleware, RoleGuard};
use crate::services::WriteMode;
use crate::utils::AppError;

/// Logs the specific failure and answers with the route's generic message.
pub(crate) fn store_failure(message: &str, err: AppError) -> HttpResponse {
    log::error!("❌ {}: {}", message, err);
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": message }))
}

/// Single-document reads: an absent document is a 200 with an empty body.
pub(crate) fn found<T: Serialize>(item: Option<T>) -> HttpResponse {
    match item {
        Some(item) => HttpResponse::Ok().json(item),
        None => HttpResponse::Ok().finish(),
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpsertQuery {
    /// `false` makes the update never create a document.
    pub upsert: Option<bool>,
}

impl UpsertQuery {
    pub fn mode(&self) -> WriteMode {
        WriteMode::from_flag(self.upsert)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Every route of the service. Gated resources wrap `RoleGuard` first so that
/// `AuthMiddleware` (the outer layer) runs before it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        // ==================== USERS ====================
        .route("/new-user", web::post().to(users::create_user))
        .route("/api/set-token", web::post().to(auth::set_token))
        .route("/users", web::get().to(users::list_users))
        .route("/users/{id}", web::get().to(users::get_user))
        .service(
            web::resource("/user/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(users::get_user_by_email)),
        )
        .service(
            web::resource("/delete-user/{id}")
                .wrap(RoleGuard::admin())
                .wrap(AuthMiddleware)
                .route(web::delete().to(users::delete_user)),
        )
        .service(
            web::resource("/update-user/{id}")
                .wrap(RoleGuard::admin())
                .wrap(AuthMiddleware)
                .route(web::put().to(users::update_user)),
        )

        // ==================== CLASSES ====================
        .service(
            web::resource("/new-class")
                .wrap(RoleGuard::instructor())
                .wrap(AuthMiddleware)
                .route(web::post().to(classes::create_class)),
        )
        .service(
            web::resource("/classes/{email}")
                .wrap(RoleGuard::instructor())
                .wrap(AuthMiddleware)
                .route(web::get().to(classes::classes_by_instructor)),
        )
        .route("/classes", web::get().to(classes::approved_classes))
        .route("/classes-manage", web::get().to(classes::all_classes))
        .route("/class/{id}", web::get().to(classes::get_class))
        .service(
            web::resource("/change-status/{id}")
                .wrap(RoleGuard::admin())
                .wrap(AuthMiddleware)
                .route(web::put().to(classes::change_status)),
        )
        .service(
            web::resource("/update-class/{id}")
                .wrap(RoleGuard::instructor())
                .wrap(AuthMiddleware)
                .route(web::put().to(classes::update_class)),
        )

        // ==================== CART ====================
        .service(
            web::resource("/add-to-cart")
                .wrap(AuthMiddleware)
                .route(web::post().to(cart::add_to_cart)),
        )
        .service(
            web::resource("/cart-item/{id}")
                .wrap(AuthMiddleware)
                .route(web::get().to(cart::get_cart_item)),
        )
        .service(
            web::resource("/cart/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(cart::get_cart)),
        )
        .service(
            web::resource("/delete-cart-item/{id}")
                .wrap(AuthMiddleware)
                .route(web::delete().to(cart::delete_cart_item)),
        )

        // ==================== ENROLLMENT & REPORTING ====================
        .route("/popular_classes", web::get().to(enrollment::popular_classes))
        .route("/popular-instructors", web::get().to(enrollment::popular_instructors))
        .route("/instructors", web::get().to(users::list_instructors))
        .service(
            web::resource("/admin-stats")
                .wrap(RoleGuard::admin())
                .wrap(AuthMiddleware)
                .route(web::get().to(admin::admin_stats)),
        )
        .service(
            web::resource("/enrolled-classes/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(enrollment::enrolled_classes)),
        )

        // ==================== PAYMENTS ====================
        .service(
            web::resource("/payment-info")
                .wrap(AuthMiddleware)
                .route(web::post().to(payments::checkout)),
        )
        .service(
            web::resource("/payment-history/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(payments::payment_history)),
        )
        .service(
            web::resource("/payment-history-length/{email}")
                .wrap(AuthMiddleware)
                .route(web::get().to(payments::payment_count)),
        )

        // ==================== INSTRUCTOR APPLICATIONS ====================
        .route("/as-instructor", web::post().to(applications::apply))
        .route(
            "/applied-instructors/{email}",
            web::get().to(applications::get_application),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::{testing, MongoDB};
    use crate::middleware::roles::testing::StaticDirectory;
    use crate::services::{Identity, TokenService};
    use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test as actix_test, App};
    use std::sync::Arc;

    fn bearer(tokens: &TokenService, email: &str) -> String {
        let identity: Identity = serde_json::from_value(serde_json::json!({ "email": email })).unwrap();
        format!("Bearer {}", tokens.issue(identity).unwrap())
    }

    macro_rules! full_app {
        ($db:expr, $tokens:expr, $directory:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($db))
                    .app_data(web::Data::new($tokens.clone()))
                    .app_data(Arc::clone(&$directory).into_data())
                    .configure(configure),
            )
            .await
        };
    }

    async fn fixtures() -> (MongoDB, TokenService, Arc<StaticDirectory>) {
        let directory = StaticDirectory::default()
            .with("admin@x.com", "admin")
            .with("learn@x.com", "student");
        (testing::offline().await, TokenService::new("secret"), Arc::new(directory))
    }

    #[actix_web::test]
    async fn gated_routes_require_a_token() {
        let (db, tokens, directory) = fixtures().await;
        let app = full_app!(db, tokens, directory);

        let requests = [
            actix_test::TestRequest::delete().uri("/delete-user/64b7f0c2a1b2c3d4e5f60718"),
            actix_test::TestRequest::put().uri("/update-user/64b7f0c2a1b2c3d4e5f60718"),
            actix_test::TestRequest::post().uri("/new-class"),
            actix_test::TestRequest::put().uri("/change-status/64b7f0c2a1b2c3d4e5f60718"),
            actix_test::TestRequest::get().uri("/admin-stats"),
            actix_test::TestRequest::get().uri("/cart/learn@x.com"),
            actix_test::TestRequest::post().uri("/payment-info"),
        ];

        for req in requests {
            let err = actix_test::try_call_service(&app, req.to_request()).await.unwrap_err();
            assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(directory.lookups(), 0);
    }

    #[actix_web::test]
    async fn student_cannot_reach_admin_routes() {
        let (db, tokens, directory) = fixtures().await;
        let app = full_app!(db, tokens, directory);

        let req = actix_test::TestRequest::put()
            .uri("/change-status/64b7f0c2a1b2c3d4e5f60718")
            .insert_header((AUTHORIZATION, bearer(&tokens, "learn@x.com")))
            .set_json(serde_json::json!({ "status": "approved" }))
            .to_request();
        let err = actix_test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn set_token_issues_a_verifiable_token() {
        let (db, tokens, directory) = fixtures().await;
        let app = full_app!(db, tokens, directory);

        let req = actix_test::TestRequest::post()
            .uri("/api/set-token")
            .set_json(serde_json::json!({ "email": "learn@x.com", "name": "Hoa" }))
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        let token = body["token"].as_str().unwrap();
        let claims = tokens.verify(token).unwrap();
        assert_eq!(claims.email, "learn@x.com");
    }

    #[actix_web::test]
    async fn malformed_id_is_a_generic_500() {
        let (db, tokens, directory) = fixtures().await;
        let app = full_app!(db, tokens, directory);

        let req = actix_test::TestRequest::get().uri("/class/not-an-id").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "Failed to fetch class" }));
    }

    #[actix_web::test]
    async fn index_greets() {
        let (db, tokens, directory) = fixtures().await;
        let app = full_app!(db, tokens, directory);

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn absent_document_is_an_empty_200() {
        let resp = found(None::<crate::models::User>);
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn present_document_is_json() {
        let resp = found(Some(serde_json::json!({ "email": "a@x.com" })));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], br#"{"email":"a@x.com"}"#);
    }

    #[test]
    fn upsert_is_the_default_unless_turned_off() {
        let mode = |query: &str| web::Query::<UpsertQuery>::from_query(query).unwrap().mode();
        assert_eq!(mode(""), WriteMode::Upsert);
        assert_eq!(mode("upsert=true"), WriteMode::Upsert);
        assert_eq!(mode("upsert=false"), WriteMode::UpdateOnly);
    }

    #[actix_web::test]
    async fn unreachable_database_answers_500_not_a_crash() {
        let (_, tokens, directory) = fixtures().await;
        let config = AppConfig::from_lookup(|key| match key {
            "DB_USER" => Some("nam".to_string()),
            "DB_PASSWORD" => Some("pw".to_string()),
            "DB_HOST" => Some("cluster0.nonexistent.invalid".to_string()),
            _ => None,
        });
        let db = MongoDB::connect(&config).await;
        let app = full_app!(db, tokens, directory);

        let req = actix_test::TestRequest::get().uri("/classes").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "Failed to fetch classes" }));
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn unknown_class_is_an_empty_200() {
        let (_, tokens, directory) = fixtures().await;
        let app = full_app!(testing::live("absent_class").await, tokens, directory);

        let req = actix_test::TestRequest::get()
            .uri("/class/64b7f0c2a1b2c3d4e5f60718")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(actix_test::read_body(resp).await.is_empty());
    }
}
