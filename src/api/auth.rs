use actix_web::{web, HttpResponse};

use crate::services::token_service::{Identity, TokenResponse, TokenService};

/// Exchanges an identity for a signed 24h token. No credentials are checked
/// here; identity is established by the external provider beforehand.
pub async fn set_token(
    tokens: web::Data<TokenService>,
    identity: web::Json<Identity>,
) -> HttpResponse {
    let identity = identity.into_inner();
    log::info!("🔐 POST /api/set-token - email: {}", identity.email);

    match tokens.issue(identity) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => super::store_failure("Failed to issue token", e),
    }
}
