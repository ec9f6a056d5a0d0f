//! Structured assessment flow: score, decide, persist, alert

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::repository::AssessmentRepository;
use crate::db::DbError;
use crate::model::{AssessmentRecord, RiskLevel, StructuredAssessmentResult};
use crate::service::alert::AlertDispatcher;
use crate::service::auth::AuthService;
use crate::service::risk;

const DEFAULT_ASSESSMENT_TYPE: &str = "child_safety";

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("Assessment data is required")]
    MissingAnswers,

    /// Write failure after a risky classification; the classification is
    /// carried along so the caller can still be told their risk level.
    #[error("Failed to store assessment: {source}")]
    Persistence {
        source: DbError,
        result: StructuredAssessmentResult,
    },

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Outcome returned to the submitter
#[derive(Debug, Clone)]
pub struct AssessmentSubmission {
    pub result: StructuredAssessmentResult,
    pub recommendations: &'static [&'static str],
    pub stored: bool,
    pub user_identified: bool,
}

/// Service for structured safety assessments
pub struct AssessmentService {
    assessments: AssessmentRepository,
    auth: Arc<AuthService>,
    dispatcher: Arc<AlertDispatcher>,
}

impl AssessmentService {
    pub fn new(
        assessments: AssessmentRepository,
        auth: Arc<AuthService>,
        dispatcher: Arc<AlertDispatcher>,
    ) -> Self {
        Self {
            assessments,
            auth,
            dispatcher,
        }
    }

    /// Process one assessment submission.
    ///
    /// Mirrors the journal flow: classification first, identity second,
    /// persistence gated on the shared decision policy. Assessments and
    /// journal entries are separate records under the same threshold rule.
    pub async fn submit(
        &self,
        answers: HashMap<String, String>,
        assessment_type: Option<String>,
        auth_header: Option<&str>,
    ) -> Result<AssessmentSubmission, AssessmentServiceError> {
        if answers.is_empty() {
            return Err(AssessmentServiceError::MissingAnswers);
        }

        let result = risk::classify_assessment(&answers);

        tracing::info!(
            level = ?result.level,
            score = result.score,
            factors = result.risk_factors.len(),
            "Assessment classified"
        );

        let identity = self.auth.resolve_identity(auth_header).await;
        let decision = risk::decide(result.level, identity.is_some());

        let mut stored = false;
        if let (true, Some(identity)) = (decision.persist, identity.as_ref()) {
            let answers_json = serde_json::to_value(&answers)
                .map_err(|e| AssessmentServiceError::Db(DbError::Serialization(e.to_string())))?;

            let record = AssessmentRecord {
                id: Uuid::new_v4(),
                user_id: identity.user_id,
                user_name: identity.name.clone(),
                user_email: identity.email.clone(),
                user_age: identity.age,
                user_location: identity.location.clone(),
                user_role: identity.role,
                assessment_type: assessment_type
                    .unwrap_or_else(|| DEFAULT_ASSESSMENT_TYPE.to_string()),
                answers: answers_json,
                risk_score: result.score,
                risk_level: result.level,
                risk_factors: result.risk_factors.clone(),
                created_at: Utc::now(),
            };

            if let Err(e) = self.assessments.insert(&record).await {
                tracing::error!(error = %e, level = ?result.level, "Failed to persist assessment");
                return Err(AssessmentServiceError::Persistence { source: e, result });
            }
            stored = true;

            if decision.flag_for_review {
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move {
                    dispatcher.notify_assessment(&record).await;
                });
            }
        } else if result.level != RiskLevel::Low && identity.is_none() {
            tracing::warn!(
                level = ?result.level,
                score = result.score,
                "Risk detected in anonymous assessment, record not stored"
            );
        }

        Ok(AssessmentSubmission {
            recommendations: risk::recommendations_for(result.level),
            stored,
            user_identified: identity.is_some(),
            result,
        })
    }
}
