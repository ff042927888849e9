pub mod auth;
pub mod roles;

pub use auth::AuthMiddleware;
pub use roles::{RoleGuard, UserDirectory};
