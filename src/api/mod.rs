//! REST API endpoints

pub mod alerts;
pub mod assessment;
pub mod auth;
pub mod chat;
pub mod directory;
pub mod error;
pub mod health;
pub mod journal;
pub mod openapi;

pub use error::ApiError;

use actix_web::http::header;
use actix_web::HttpRequest;

use crate::model::{Identity, Role};
use crate::service::AuthService;

/// Bearer credential from the Authorization header, if any
pub(crate) fn bearer_header(req: &HttpRequest) -> Option<&str> {
    req.headers().get(header::AUTHORIZATION)?.to_str().ok()
}

/// Resolve the caller identity or reject with 401
pub(crate) async fn require_identity(
    auth: &AuthService,
    req: &HttpRequest,
) -> Result<Identity, ApiError> {
    auth.resolve_identity(bearer_header(req))
        .await
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))
}

/// Resolve the caller identity and require the admin role
pub(crate) async fn require_admin(
    auth: &AuthService,
    req: &HttpRequest,
) -> Result<Identity, ApiError> {
    let identity = require_identity(auth, req).await?;
    if identity.role != Role::Admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }
    Ok(identity)
}
