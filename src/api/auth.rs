//! REST API endpoints for signup and login

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::ApiError;
use crate::model::{Identity, Role};
use crate::service::auth::SignupRequest as ServiceSignupRequest;
use crate::service::AuthService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub location: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub age: i32,
    pub location: String,
}

impl From<Identity> for UserSummary {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.user_id,
            name: identity.name,
            email: identity.email,
            role: identity.role,
            age: identity.age,
            location: identity.location,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
    Role::parse(value).ok_or_else(|| ApiError::BadRequest("Invalid user type".to_string()))
}

/// Create an account and return a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error or duplicate email")
    ),
    tag = "auth"
)]
#[post("/api/auth/signup")]
pub async fn signup(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let role = parse_role(&body.user_type)?;

    let (token, identity) = auth
        .signup(ServiceSignupRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            age: body.age,
            role,
            location: body.location,
        })
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Account created successfully!".to_string(),
        token,
        user: identity.into(),
    }))
}

/// Verify credentials and return a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid credentials or role mismatch")
    ),
    tag = "auth"
)]
#[post("/api/auth/login")]
pub async fn login(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let role = parse_role(&body.user_type)?;

    let (token, identity) = auth.login(&body.email, &body.password, role).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: identity.into(),
    }))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login);
}
