use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::models::{Role, User};
use crate::services::Claims;
use crate::utils::AppError;

/// Source of truth for a user's current role. Registered as
/// `web::Data<dyn UserDirectory>`; production uses the `users` collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Role gate that must sit inside [`super::auth::AuthMiddleware`]. The role is
/// read from the user store on every request, never from the token.
///
/// - role not allowed → 401
/// - no user for the token's email → 403
#[derive(Clone, Copy)]
pub struct RoleGuard {
    allowed: &'static [Role],
}

impl RoleGuard {
    pub fn admin() -> Self {
        Self { allowed: &[Role::Admin] }
    }

    pub fn instructor() -> Self {
        Self { allowed: &[Role::Instructor, Role::Admin] }
    }

    fn check(&self, user: Option<&User>) -> Result<(), AppError> {
        let user = user.ok_or(AppError::Forbidden)?;
        match user.role() {
            Some(role) if self.allowed.contains(&role) => Ok(()),
            _ => Err(AppError::Unauthenticated),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardService {
            service: Rc::new(service),
            guard: *self,
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    guard: RoleGuard,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let guard = self.guard;
        let email = req.extensions().get::<Claims>().map(|c| c.email.clone());
        let directory = req.app_data::<web::Data<dyn UserDirectory>>().cloned();

        Box::pin(async move {
            let email = email.ok_or(AppError::Unauthenticated)?;
            let directory = directory
                .ok_or_else(|| AppError::Config("UserDirectory not registered".to_string()))?;

            let user = directory.find_by_email(&email).await?;
            if let Err(e) = guard.check(user.as_ref()) {
                log::warn!("🔒 {} {} denied for {}: {}", req.method(), req.path(), email, e);
                return Err(e.into());
            }

            service.call(req).await
        })
    }
}
