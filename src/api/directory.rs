//! REST API endpoints for the professional and shelter directories

use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::ApiError;
use crate::db::models::{ProfessionalFilter, ShelterFilter};
use crate::model::{AppointmentStatus, Professional, Shelter};
use crate::service::directory::BookingRequest;
use crate::service::DirectoryService;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProfessionalsParams {
    /// Filter by professional type (doctor, counselor, lawyer, social_worker)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by location, case-insensitive substring
    pub location: Option<String>,
    /// Filter by specialization, case-insensitive substring
    pub specialization: Option<String>,
    /// Free-text search across name, specialization, location, description
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSheltersParams {
    /// Filter by shelter type (emergency, long_term, family)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by location, case-insensitive substring
    pub location: Option<String>,
    /// Free-text search across name, location, description
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessionalListResponse {
    pub success: bool,
    pub data: Vec<Professional>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShelterListResponse {
    pub success: bool,
    pub data: Vec<Shelter>,
    pub count: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AppointmentRequest {
    #[serde(rename = "professionalId")]
    pub professional_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentSummary {
    pub id: Uuid,
    #[serde(rename = "professionalName")]
    pub professional_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
}

/// List verified professionals with optional filters
#[utoipa::path(
    get,
    path = "/api/professionals",
    params(ListProfessionalsParams),
    responses(
        (status = 200, description = "Professionals retrieved", body = ProfessionalListResponse)
    ),
    tag = "directory"
)]
#[get("/api/professionals")]
pub async fn list_professionals(
    service: web::Data<Arc<DirectoryService>>,
    query: web::Query<ListProfessionalsParams>,
) -> Result<HttpResponse, ApiError> {
    let filter = ProfessionalFilter {
        kind: query.kind.clone(),
        location: query.location.clone(),
        specialization: query.specialization.clone(),
        search: query.search.clone(),
    };

    let professionals = service.professionals(&filter).await?;

    Ok(HttpResponse::Ok().json(ProfessionalListResponse {
        success: true,
        count: professionals.len(),
        data: professionals,
    }))
}

/// Get a professional by ID
#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Professional ID")
    ),
    responses(
        (status = 200, description = "Professional retrieved", body = Professional),
        (status = 404, description = "Professional not found")
    ),
    tag = "directory"
)]
#[get("/api/professionals/{id}")]
pub async fn get_professional(
    service: web::Data<Arc<DirectoryService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let professional = service.professional(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": professional
    })))
}

/// Book an appointment with an available professional
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = AppointmentSummary),
        (status = 400, description = "Invalid booking or unavailable professional"),
        (status = 404, description = "Professional not found")
    ),
    tag = "directory"
)]
#[post("/api/appointments")]
pub async fn book_appointment(
    service: web::Data<Arc<DirectoryService>>,
    body: web::Json<AppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let (appointment, professional) = service
        .book_appointment(BookingRequest {
            professional_id: body.professional_id,
            user_id: body.user_id,
            date: body.date,
            time: body.time,
            notes: body.notes,
        })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Appointment booked successfully! You will be contacted soon for confirmation.",
        "data": AppointmentSummary {
            id: appointment.id,
            professional_name: professional.name,
            date: appointment.date.to_string(),
            time: appointment.time,
            status: appointment.status,
        }
    })))
}

/// List verified shelters with optional filters
#[utoipa::path(
    get,
    path = "/api/shelters",
    params(ListSheltersParams),
    responses(
        (status = 200, description = "Shelters retrieved", body = ShelterListResponse)
    ),
    tag = "directory"
)]
#[get("/api/shelters")]
pub async fn list_shelters(
    service: web::Data<Arc<DirectoryService>>,
    query: web::Query<ListSheltersParams>,
) -> Result<HttpResponse, ApiError> {
    let filter = ShelterFilter {
        kind: query.kind.clone(),
        location: query.location.clone(),
        search: query.search.clone(),
    };

    let shelters = service.shelters(&filter).await?;

    Ok(HttpResponse::Ok().json(ShelterListResponse {
        success: true,
        count: shelters.len(),
        data: shelters,
    }))
}

/// Get a shelter by ID
#[utoipa::path(
    get,
    path = "/api/shelters/{id}",
    params(
        ("id" = Uuid, Path, description = "Shelter ID")
    ),
    responses(
        (status = 200, description = "Shelter retrieved", body = Shelter),
        (status = 404, description = "Shelter not found")
    ),
    tag = "directory"
)]
#[get("/api/shelters/{id}")]
pub async fn get_shelter(
    service: web::Data<Arc<DirectoryService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let shelter = service.shelter(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": shelter
    })))
}

/// Configure directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_professionals)
        .service(get_professional)
        .service(book_appointment)
        .service(list_shelters)
        .service(get_shelter);
}
