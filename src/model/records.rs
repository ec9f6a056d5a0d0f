//! Persisted record types for risky submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::identity::Role;
use crate::model::risk::RiskLevel;

/// A stored journal entry.
///
/// Only entries above LOW risk from identified submitters are ever
/// persisted; after the write the record changes exactly once, through
/// the admin review / notification flags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_age: i32,
    pub user_location: String,
    pub user_role: Role,
    pub entry: String,
    pub mood: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub triggers: Vec<String>,
    /// Derived: level is HIGH or CRITICAL
    pub flagged: bool,
    pub is_private: bool,
    pub admin_notified: bool,
    pub created_at: DateTime<Utc>,
}

/// A stored structured assessment with the submitter snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_age: i32,
    pub user_location: String,
    pub user_role: Role,
    pub assessment_type: String,
    /// Raw q1..q9 answer map as submitted
    #[schema(value_type = Object)]
    pub answers: serde_json::Value,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub created_at: DateTime<Utc>,
}
