//! Professional and shelter directory types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalType {
    Doctor,
    Counselor,
    Lawyer,
    SocialWorker,
}

impl ProfessionalType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfessionalType::Doctor => "doctor",
            ProfessionalType::Counselor => "counselor",
            ProfessionalType::Lawyer => "lawyer",
            ProfessionalType::SocialWorker => "social_worker",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "doctor" => Some(ProfessionalType::Doctor),
            "counselor" => Some(ProfessionalType::Counselor),
            "lawyer" => Some(ProfessionalType::Lawyer),
            "social_worker" => Some(ProfessionalType::SocialWorker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShelterType {
    Emergency,
    LongTerm,
    Family,
}

impl ShelterType {
    pub fn as_str(self) -> &'static str {
        match self {
            ShelterType::Emergency => "emergency",
            ShelterType::LongTerm => "long_term",
            ShelterType::Family => "family",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "emergency" => Some(ShelterType::Emergency),
            "long_term" => Some(ShelterType::LongTerm),
            "family" => Some(ShelterType::Family),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            "completed" => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }
}

/// A verified professional listed in the directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProfessionalType,
    pub specialization: String,
    pub location: String,
    pub rating: f64,
    pub experience: String,
    pub cost: String,
    pub available: bool,
    pub email: String,
    pub phone: String,
    pub qualifications: Vec<String>,
    pub languages: Vec<String>,
    pub description: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A shelter listed in the directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ShelterType,
    pub location: String,
    pub address: String,
    pub contact: String,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub description: Option<String>,
    pub services: Vec<String>,
    pub verified: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// A booked appointment with a professional
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub notes: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}
