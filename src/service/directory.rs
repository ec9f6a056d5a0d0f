//! Professional and shelter directory search, appointment booking

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::db::models::{ProfessionalFilter, ShelterFilter};
use crate::db::repository::DirectoryRepository;
use crate::db::DbError;
use crate::model::{Appointment, AppointmentStatus, Professional, Shelter};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Professional not found: {0}")]
    ProfessionalNotFound(Uuid),

    #[error("Shelter not found: {0}")]
    ShelterNotFound(Uuid),

    #[error("Professional is currently unavailable")]
    ProfessionalUnavailable,

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Parameters for booking an appointment
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub professional_id: Uuid,
    pub user_id: Uuid,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

/// Service over the professional and shelter directories
pub struct DirectoryService {
    directory: DirectoryRepository,
}

impl DirectoryService {
    pub fn new(directory: DirectoryRepository) -> Self {
        Self { directory }
    }

    pub async fn professionals(
        &self,
        filter: &ProfessionalFilter,
    ) -> Result<Vec<Professional>, DirectoryServiceError> {
        self.directory
            .list_professionals(filter)
            .await
            .map_err(DirectoryServiceError::from)
    }

    pub async fn professional(&self, id: Uuid) -> Result<Professional, DirectoryServiceError> {
        self.directory.get_professional(id).await.map_err(|e| match e {
            DbError::NotFound(_) => DirectoryServiceError::ProfessionalNotFound(id),
            other => DirectoryServiceError::Db(other),
        })
    }

    pub async fn shelters(
        &self,
        filter: &ShelterFilter,
    ) -> Result<Vec<Shelter>, DirectoryServiceError> {
        self.directory
            .list_shelters(filter)
            .await
            .map_err(DirectoryServiceError::from)
    }

    pub async fn shelter(&self, id: Uuid) -> Result<Shelter, DirectoryServiceError> {
        self.directory.get_shelter(id).await.map_err(|e| match e {
            DbError::NotFound(_) => DirectoryServiceError::ShelterNotFound(id),
            other => DirectoryServiceError::Db(other),
        })
    }

    /// Book a pending appointment with an available professional.
    /// Returns the stored appointment and the professional it targets.
    pub async fn book_appointment(
        &self,
        request: BookingRequest,
    ) -> Result<(Appointment, Professional), DirectoryServiceError> {
        if request.time.trim().is_empty() {
            return Err(DirectoryServiceError::Validation(
                "Appointment time is required".to_string(),
            ));
        }

        let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d").map_err(|_| {
            DirectoryServiceError::Validation(format!(
                "Invalid appointment date: {}",
                request.date
            ))
        })?;

        let professional = self.professional(request.professional_id).await?;
        if !professional.available {
            return Err(DirectoryServiceError::ProfessionalUnavailable);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            professional_id: professional.id,
            user_id: request.user_id,
            date,
            time: request.time,
            notes: request.notes.unwrap_or_default(),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        self.directory.insert_appointment(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            professional_id = %professional.id,
            "Appointment booked"
        );

        Ok((appointment, professional))
    }
}
