//! Submitter identity and access roles

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role, fixed at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Child,
    Parent,
    Professional,
    /// Review staff; never issued through signup, seeded out of band
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Child => "child",
            Role::Parent => "parent",
            Role::Professional => "professional",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "child" => Some(Role::Child),
            "parent" => Some(Role::Parent),
            "professional" => Some(Role::Professional),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Resolved submitter principal.
///
/// Snapshot of the account at submission time; persisted alongside risky
/// records so review staff can reach the submitter even if the account
/// changes later.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub location: String,
    pub role: Role,
}

/// Claims carried in the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued at, seconds since epoch
    pub iat: i64,
}
