//! Account signup/login and bearer-token identity resolution

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::db::models::UserRow;
use crate::db::repository::UserRepository;
use crate::db::DbError;
use crate::model::{AuthConfig, Identity, Role, TokenClaims};

const BCRYPT_COST: u32 = 10;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists with this email")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is registered as {registered}, not {requested}")]
    RoleMismatch {
        registered: String,
        requested: String,
    },

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Parameters for creating an account
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub role: Role,
    pub location: String,
}

/// Service for account management and identity resolution
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Create an account and issue a token for it
    pub async fn signup(&self, request: SignupRequest) -> Result<(String, Identity), AuthError> {
        validate_signup(&request)?;

        let password_hash = bcrypt::hash(&request.password, BCRYPT_COST)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let row = UserRow {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email.trim().to_lowercase(),
            password_hash,
            age: request.age,
            role: request.role.as_str().to_string(),
            location: request.location,
            created_at: Utc::now(),
        };

        self.users.insert(&row).await.map_err(|e| match e {
            DbError::Duplicate(_) => AuthError::EmailTaken,
            other => AuthError::Db(other),
        })?;

        let identity = row
            .to_identity()
            .map_err(|e| AuthError::Db(DbError::Serialization(e)))?;

        tracing::info!(user_id = %identity.user_id, role = %identity.role.as_str(), "User registered");

        let token = self.issue_token(&identity)?;
        Ok((token, identity))
    }

    /// Verify credentials and the requested role, then issue a token.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response does not reveal which accounts exist.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(String, Identity), AuthError> {
        let row = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = bcrypt::verify(password, &row.password_hash)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let identity = row
            .to_identity()
            .map_err(|e| AuthError::Db(DbError::Serialization(e)))?;

        if identity.role != role {
            return Err(AuthError::RoleMismatch {
                registered: identity.role.as_str().to_string(),
                requested: role.as_str().to_string(),
            });
        }

        tracing::info!(user_id = %identity.user_id, "User logged in");

        let token = self.issue_token(&identity)?;
        Ok((token, identity))
    }

    /// Resolve the submitter identity from an Authorization header.
    ///
    /// Absent, malformed or expired credentials yield `None` rather than
    /// an error: risk detection must not depend on being logged in, so
    /// callers treat an unresolved identity as an anonymous submitter.
    pub async fn resolve_identity(&self, auth_header: Option<&str>) -> Option<Identity> {
        let token = auth_header?.strip_prefix("Bearer ")?;

        let claims = match self.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected, treating as anonymous");
                return None;
            }
        };

        // Fresh snapshot: the account may have changed since the token was issued
        match self.users.find_by_id(claims.sub).await {
            Ok(Some(row)) => match row.to_identity() {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!(user_id = %claims.sub, error = %e, "Stored account is invalid");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(user_id = %claims.sub, "Token subject no longer exists");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Identity lookup failed, treating as anonymous");
                None
            }
        }
    }

    fn issue_token(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: identity.user_id,
            email: identity.email.clone(),
            role: identity.role,
            exp: (now + chrono::Duration::hours(self.config.token_ttl_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.token_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Token(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.token_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::Token(e.to_string()))
    }
}

fn validate_signup(request: &SignupRequest) -> Result<(), AuthError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
        || request.location.trim().is_empty()
    {
        return Err(AuthError::Validation("All fields are required".to_string()));
    }

    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    match request.role {
        Role::Child => {
            if !(5..=17).contains(&request.age) {
                return Err(AuthError::Validation(
                    "Children must be between 5-17 years old".to_string(),
                ));
            }
        }
        Role::Parent | Role::Professional => {
            if request.age < 18 {
                return Err(AuthError::Validation(
                    "Parents and professionals must be 18 years or older".to_string(),
                ));
            }
        }
        Role::Admin => {
            // Review staff accounts are seeded out of band
            return Err(AuthError::Validation("Invalid user type".to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Role, age: i32) -> SignupRequest {
        SignupRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret123".to_string(),
            age,
            role,
            location: "Mumbai".to_string(),
        }
    }

    #[test]
    fn child_age_bounds_are_enforced() {
        assert!(validate_signup(&request(Role::Child, 5)).is_ok());
        assert!(validate_signup(&request(Role::Child, 17)).is_ok());
        assert!(validate_signup(&request(Role::Child, 4)).is_err());
        assert!(validate_signup(&request(Role::Child, 18)).is_err());
    }

    #[test]
    fn adults_must_be_eighteen() {
        assert!(validate_signup(&request(Role::Parent, 18)).is_ok());
        assert!(validate_signup(&request(Role::Professional, 17)).is_err());
    }

    #[test]
    fn admin_signup_is_rejected() {
        assert!(validate_signup(&request(Role::Admin, 30)).is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        let mut req = request(Role::Parent, 30);
        req.password = "abc".to_string();
        assert!(matches!(
            validate_signup(&req),
            Err(AuthError::Validation(_))
        ));
    }
}
