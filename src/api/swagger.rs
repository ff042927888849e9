use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Marketplace API",
        version = "1.0.0",
        description = "Backend for an online course marketplace: users, classes, carts, enrollments and payments.\n\n**Authentication:** obtain a token from `POST /api/set-token` and send it as `Authorization: Bearer <token>`. Admin and instructor routes also check the caller's role in the user store."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::delete_user,

        // Classes
        crate::api::classes::change_status,

        // Admin
        crate::api::admin::admin_stats,

        // Payments
        crate::api::payments::payment_count,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::services::token_service::TokenResponse,
            crate::models::InsertAck,
            crate::models::UpdateAck,
            crate::models::DeleteAck,
            crate::models::ClassStatus,
            crate::models::ChangeStatusRequest,
            crate::models::AdminStats,
            crate::models::PaymentCount,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database reachability."),
        (name = "Users", description = "User records. Deletes and updates are admin only."),
        (name = "Classes", description = "Class catalogue and the admin review workflow."),
        (name = "Admin", description = "Dashboard counters."),
        (name = "Payments", description = "Checkout and payment history."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/set-token"))
                        .build()
                ),
            );
        }
    }
}
