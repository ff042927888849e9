use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::TokenService;
use crate::utils::{AppError, TokenError};

pub use crate::services::Claims;

/// Requires `Authorization: Bearer <jwt>`. A missing header is a 401; a header
/// without a valid, unexpired token after the scheme is a 403. Verified claims are available as `web::ReqData<Claims>`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                Box::pin(async move { Err(e.into()) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let header = req.headers().get(AUTHORIZATION).ok_or(AppError::Unauthenticated)?;

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Config("TokenService not registered".to_string()))?;

    // Any header present is judged by its token; the scheme word is not checked.
    let token = credentials(header.to_str().unwrap_or_default()).ok_or(TokenError::Invalid)?;
    Ok(tokens.verify(token)?)
}

fn credentials(value: &str) -> Option<&str> {
    value.split_whitespace().nth(1)
}
