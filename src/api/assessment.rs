//! REST API endpoint for the structured safety assessment

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::{bearer_header, ApiError};
use crate::model::RiskLevel;
use crate::service::assessment::AssessmentServiceError;
use crate::service::AssessmentService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssessmentRequest {
    /// Answers keyed q1..q9
    pub answers: HashMap<String, String>,
    #[serde(rename = "assessmentType")]
    pub assessment_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub message: String,
    #[serde(rename = "riskScore")]
    pub risk_score: u32,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    #[serde(rename = "riskFactors")]
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(rename = "storedInDB")]
    pub stored_in_db: bool,
}

/// Submit a nine-question safety assessment
#[utoipa::path(
    post,
    path = "/api/assessment/submit",
    request_body = AssessmentRequest,
    responses(
        (status = 200, description = "Assessment scored", body = AssessmentResponse),
        (status = 400, description = "Missing answers"),
        (status = 500, description = "Storage failed; assessment still included", body = AssessmentResponse)
    ),
    tag = "assessment"
)]
#[post("/api/assessment/submit")]
pub async fn submit_assessment(
    service: web::Data<Arc<AssessmentService>>,
    body: web::Json<AssessmentRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let submission = service
        .submit(body.answers, body.assessment_type, bearer_header(&req))
        .await;

    match submission {
        Ok(outcome) => Ok(HttpResponse::Ok().json(AssessmentResponse {
            message: "Assessment completed successfully".to_string(),
            risk_score: outcome.result.score,
            risk_level: outcome.result.level,
            risk_factors: outcome.result.risk_factors,
            recommendations: outcome
                .recommendations
                .iter()
                .map(|r| r.to_string())
                .collect(),
            stored_in_db: outcome.stored,
        })),
        // Same degrade rule as the journal: the score is already known,
        // so the submitter gets it even when the write failed
        Err(AssessmentServiceError::Persistence { source, result }) => {
            tracing::error!(error = %source, "Returning assessment despite storage failure");
            let recommendations = crate::service::risk::recommendations_for(result.level);
            Ok(HttpResponse::InternalServerError().json(AssessmentResponse {
                message: "Assessment completed but the record could not be stored".to_string(),
                risk_score: result.score,
                risk_level: result.level,
                risk_factors: result.risk_factors,
                recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
                stored_in_db: false,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// Configure assessment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_assessment);
}
