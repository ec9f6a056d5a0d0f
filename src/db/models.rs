//! Database row models and row-to-domain conversion

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::model::{
    Appointment, AppointmentStatus, Identity, JournalEntry, Professional, ProfessionalType,
    RiskLevel, Role, Shelter, ShelterType,
};

/// Helper to convert RiskLevel to string for database storage
pub fn risk_level_to_string(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "LOW",
        RiskLevel::Medium => "MEDIUM",
        RiskLevel::High => "HIGH",
        RiskLevel::Critical => "CRITICAL",
    }
}

fn parse_risk_level(value: &str) -> Result<RiskLevel, String> {
    match value {
        "LOW" => Ok(RiskLevel::Low),
        "MEDIUM" => Ok(RiskLevel::Medium),
        "HIGH" => Ok(RiskLevel::High),
        "CRITICAL" => Ok(RiskLevel::Critical),
        other => Err(format!("Invalid risk level: {}", other)),
    }
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("Invalid role: {}", value))
}

/// JSONB string arrays tolerate malformed content by dropping it
fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

/// Database representation of an account
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub role: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Identity snapshot for gating persistence and notification
    pub fn to_identity(&self) -> Result<Identity, String> {
        Ok(Identity {
            user_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
            location: self.location.clone(),
            role: parse_role(&self.role)?,
        })
    }
}

/// Database representation of a stored journal entry
#[derive(Debug, Clone, FromRow)]
pub struct JournalEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub user_age: i32,
    pub user_location: String,
    pub user_role: String,
    pub entry: String,
    pub mood: String,
    pub risk_score: i32,
    pub risk_level: String,
    pub triggers: serde_json::Value,
    pub flagged: bool,
    pub is_private: bool,
    pub admin_notified: bool,
    pub created_at: DateTime<Utc>,
}

impl JournalEntryRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<JournalEntry, String> {
        Ok(JournalEntry {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            user_age: self.user_age,
            user_location: self.user_location,
            user_role: parse_role(&self.user_role)?,
            entry: self.entry,
            mood: self.mood,
            risk_score: self.risk_score.max(0) as u32,
            risk_level: parse_risk_level(&self.risk_level)?,
            triggers: string_list(self.triggers),
            flagged: self.flagged,
            is_private: self.is_private,
            admin_notified: self.admin_notified,
            created_at: self.created_at,
        })
    }
}

/// Database representation of a directory professional
#[derive(Debug, Clone, FromRow)]
pub struct ProfessionalRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub specialization: String,
    pub location: String,
    pub rating: f64,
    pub experience: String,
    pub cost: String,
    pub available: bool,
    pub email: String,
    pub phone: String,
    pub qualifications: serde_json::Value,
    pub languages: serde_json::Value,
    pub description: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl ProfessionalRow {
    pub fn into_domain(self) -> Result<Professional, String> {
        let kind = ProfessionalType::parse(&self.kind)
            .ok_or_else(|| format!("Invalid professional type: {}", self.kind))?;

        Ok(Professional {
            id: self.id,
            name: self.name,
            kind,
            specialization: self.specialization,
            location: self.location,
            rating: self.rating,
            experience: self.experience,
            cost: self.cost,
            available: self.available,
            email: self.email,
            phone: self.phone,
            qualifications: string_list(self.qualifications),
            languages: string_list(self.languages),
            description: self.description,
            verified: self.verified,
            created_at: self.created_at,
        })
    }
}

/// Database representation of a shelter
#[derive(Debug, Clone, FromRow)]
pub struct ShelterRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub location: String,
    pub address: String,
    pub contact: String,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub description: Option<String>,
    pub services: serde_json::Value,
    pub verified: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl ShelterRow {
    pub fn into_domain(self) -> Result<Shelter, String> {
        let kind = ShelterType::parse(&self.kind)
            .ok_or_else(|| format!("Invalid shelter type: {}", self.kind))?;

        Ok(Shelter {
            id: self.id,
            name: self.name,
            kind,
            location: self.location,
            address: self.address,
            contact: self.contact,
            capacity: self.capacity,
            current_occupancy: self.current_occupancy,
            description: self.description,
            services: string_list(self.services),
            verified: self.verified,
            available: self.available,
            created_at: self.created_at,
        })
    }
}

/// Database representation of an appointment
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl AppointmentRow {
    pub fn into_domain(self) -> Result<Appointment, String> {
        let status = AppointmentStatus::parse(&self.status)
            .ok_or_else(|| format!("Invalid appointment status: {}", self.status))?;

        Ok(Appointment {
            id: self.id,
            professional_id: self.professional_id,
            user_id: self.user_id,
            date: self.date,
            time: self.time,
            notes: self.notes,
            status,
            created_at: self.created_at,
        })
    }
}

/// Database representation of a FAQ entry
#[derive(Debug, Clone, FromRow)]
pub struct FaqRow {
    #[allow(dead_code)]
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    #[allow(dead_code)]
    pub tags: serde_json::Value,
}

/// Query parameters for the professional directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalFilter {
    pub kind: Option<String>,
    pub location: Option<String>,
    pub specialization: Option<String>,
    pub search: Option<String>,
}

/// Query parameters for the shelter directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelterFilter {
    pub kind: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}
