pub mod config;
pub mod directory;
pub mod identity;
pub mod records;
pub mod risk;

pub use config::{AlertConfig, AuthConfig, Config};
pub use directory::{
    Appointment, AppointmentStatus, Professional, ProfessionalType, Shelter, ShelterType,
};
pub use identity::{Identity, Role, TokenClaims};
pub use records::{AssessmentRecord, JournalEntry};
pub use risk::{Decision, JournalAssessmentResult, RiskLevel, StructuredAssessmentResult};
