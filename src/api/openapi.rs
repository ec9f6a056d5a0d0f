//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::api::{alerts, assessment, auth, chat, directory, health, journal};
use crate::model::{
    Appointment, AppointmentStatus, Identity, JournalEntry, Professional, ProfessionalType,
    RiskLevel, Role, Shelter, ShelterType,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::login,
        journal::submit_entry,
        journal::list_entries,
        journal::list_flagged,
        journal::mark_reviewed,
        assessment::submit_assessment,
        chat::chat_response,
        directory::list_professionals,
        directory::get_professional,
        directory::book_appointment,
        directory::list_shelters,
        directory::get_shelter,
        alerts::alert_stream,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        RiskLevel,
        Role,
        Identity,
        JournalEntry,
        Professional,
        ProfessionalType,
        Shelter,
        ShelterType,
        Appointment,
        AppointmentStatus,
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "journal", description = "Private journal with risk assessment"),
        (name = "assessment", description = "Structured safety assessment"),
        (name = "chat", description = "FAQ chatbot"),
        (name = "directory", description = "Professional and shelter directories"),
        (name = "admin", description = "Live alerts for review staff"),
        (name = "health", description = "Service health probes"),
    ),
    info(
        title = "ChildGuard API",
        description = "Child safety web service with a rule-based risk assessment engine"
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
