//! REST API endpoints for the private journal

use std::sync::Arc;

use actix_web::{get, patch, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::{bearer_header, require_admin, require_identity, ApiError};
use crate::model::{JournalEntry, RiskLevel};
use crate::service::journal::{JournalServiceError, JournalSubmissionRequest};
use crate::service::{AuthService, JournalService};

#[derive(Debug, Deserialize, ToSchema)]
pub struct JournalEntryRequest {
    pub entry: String,
    pub mood: Option<String>,
    #[serde(rename = "isPrivate")]
    pub is_private: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JournalEntryResponse {
    pub message: String,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    #[serde(rename = "riskScore")]
    pub risk_score: u32,
    pub triggers: Vec<String>,
    /// Per-level guidance returned to the submitter
    pub analysis: String,
    #[serde(rename = "storedInDB")]
    pub stored_in_db: bool,
    #[serde(rename = "userIdentified")]
    pub user_identified: bool,
}

/// Submit a journal entry for risk assessment
#[utoipa::path(
    post,
    path = "/api/journal/entry",
    request_body = JournalEntryRequest,
    responses(
        (status = 200, description = "Entry assessed", body = JournalEntryResponse),
        (status = 400, description = "Empty entry"),
        (status = 500, description = "Storage failed; assessment still included", body = JournalEntryResponse)
    ),
    tag = "journal"
)]
#[post("/api/journal/entry")]
pub async fn submit_entry(
    service: web::Data<Arc<JournalService>>,
    body: web::Json<JournalEntryRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let submission = service
        .submit(
            JournalSubmissionRequest {
                entry: body.entry,
                mood: body.mood,
                is_private: body.is_private,
            },
            bearer_header(&req),
        )
        .await;

    match submission {
        Ok(outcome) => Ok(HttpResponse::Ok().json(JournalEntryResponse {
            message: "Assessment completed".to_string(),
            risk_level: outcome.result.level,
            risk_score: outcome.result.score,
            triggers: outcome.result.triggers,
            analysis: outcome.guidance.to_string(),
            stored_in_db: outcome.stored,
            user_identified: outcome.user_identified,
        })),
        // Best-effort degrade: storage failed, but the submitter still
        // gets the computed risk level and guidance
        Err(JournalServiceError::Persistence {
            source,
            result,
            guidance,
        }) => {
            tracing::error!(error = %source, "Returning assessment despite storage failure");
            Ok(
                HttpResponse::InternalServerError().json(JournalEntryResponse {
                    message: "Assessment completed but the entry could not be stored".to_string(),
                    risk_level: result.level,
                    risk_score: result.score,
                    triggers: result.triggers,
                    analysis: guidance.to_string(),
                    stored_in_db: false,
                    user_identified: true,
                }),
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// List the caller's stored journal entries
#[utoipa::path(
    get,
    path = "/api/journal/entries",
    responses(
        (status = 200, description = "Entries retrieved", body = [JournalEntry]),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "journal"
)]
#[get("/api/journal/entries")]
pub async fn list_entries(
    service: web::Data<Arc<JournalService>>,
    auth: web::Data<Arc<AuthService>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let identity = require_identity(auth.get_ref(), &req).await?;
    let entries = service.entries_for(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// List the admin review queue of risky entries
#[utoipa::path(
    get,
    path = "/api/journal/admin/flagged",
    responses(
        (status = 200, description = "Flagged entries retrieved", body = [JournalEntry]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "journal"
)]
#[get("/api/journal/admin/flagged")]
pub async fn list_flagged(
    service: web::Data<Arc<JournalService>>,
    auth: web::Data<Arc<AuthService>>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(auth.get_ref(), &req).await?;
    let entries = service.flagged_entries().await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Mark a flagged entry as reviewed
#[utoipa::path(
    patch,
    path = "/api/journal/admin/review/{entry_id}",
    params(
        ("entry_id" = Uuid, Path, description = "Journal entry ID")
    ),
    responses(
        (status = 200, description = "Entry marked as reviewed"),
        (status = 404, description = "Entry not found")
    ),
    tag = "journal"
)]
#[patch("/api/journal/admin/review/{entry_id}")]
pub async fn mark_reviewed(
    service: web::Data<Arc<JournalService>>,
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(auth.get_ref(), &req).await?;

    let entry_id = path.into_inner();
    if service.mark_reviewed(entry_id).await? {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Entry marked as reviewed"
        })))
    } else {
        Err(ApiError::NotFound(format!("Journal entry {}", entry_id)))
    }
}

/// Configure journal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_entry)
        .service(list_entries)
        .service(list_flagged)
        .service(mark_reviewed);
}
