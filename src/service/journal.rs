//! Journal submission flow: classify, decide, persist, alert

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::repository::JournalRepository;
use crate::db::DbError;
use crate::model::{JournalAssessmentResult, JournalEntry, RiskLevel};
use crate::service::alert::AlertDispatcher;
use crate::service::auth::AuthService;
use crate::service::risk;

const DEFAULT_MOOD: &str = "neutral";

#[derive(Debug, thiserror::Error)]
pub enum JournalServiceError {
    #[error("Journal entry is required")]
    EmptyEntry,

    /// Write failure after a risky classification. The classification is
    /// carried along so the caller can still be told their risk level.
    #[error("Failed to store journal entry: {source}")]
    Persistence {
        source: DbError,
        result: JournalAssessmentResult,
        guidance: &'static str,
    },

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Caller-supplied fields of a journal submission
#[derive(Debug, Clone)]
pub struct JournalSubmissionRequest {
    pub entry: String,
    pub mood: Option<String>,
    pub is_private: Option<bool>,
}

/// Outcome returned to the submitter
#[derive(Debug, Clone)]
pub struct JournalSubmission {
    pub result: JournalAssessmentResult,
    pub guidance: &'static str,
    pub stored: bool,
    pub user_identified: bool,
}

/// Service for journal submissions and the admin review queue
pub struct JournalService {
    journal: JournalRepository,
    auth: Arc<AuthService>,
    dispatcher: Arc<AlertDispatcher>,
}

impl JournalService {
    pub fn new(
        journal: JournalRepository,
        auth: Arc<AuthService>,
        dispatcher: Arc<AlertDispatcher>,
    ) -> Self {
        Self {
            journal,
            auth,
            dispatcher,
        }
    }

    /// Process one journal submission.
    ///
    /// Classification runs before identity resolution so risk detection
    /// never depends on login state. Persistence and alerting are gated
    /// on the decision policy; alert dispatch is fire-and-forget and can
    /// never fail the response.
    pub async fn submit(
        &self,
        request: JournalSubmissionRequest,
        auth_header: Option<&str>,
    ) -> Result<JournalSubmission, JournalServiceError> {
        if request.entry.trim().is_empty() {
            return Err(JournalServiceError::EmptyEntry);
        }

        let result = risk::classify_journal_entry(&request.entry);

        tracing::info!(
            level = ?result.level,
            score = result.score,
            triggers = result.triggers.len(),
            "Journal entry classified"
        );

        let identity = self.auth.resolve_identity(auth_header).await;
        let decision = risk::decide(result.level, identity.is_some());

        let mut stored = false;
        if let (true, Some(identity)) = (decision.persist, identity.as_ref()) {
            let entry = JournalEntry {
                id: Uuid::new_v4(),
                user_id: identity.user_id,
                user_name: identity.name.clone(),
                user_email: identity.email.clone(),
                user_age: identity.age,
                user_location: identity.location.clone(),
                user_role: identity.role,
                entry: request.entry.clone(),
                mood: request
                    .mood
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MOOD.to_string()),
                risk_score: result.score,
                risk_level: result.level,
                triggers: result.triggers.clone(),
                flagged: decision.flag_for_review,
                is_private: request.is_private.unwrap_or(true),
                admin_notified: false,
                created_at: Utc::now(),
            };

            if let Err(e) = self.journal.insert(&entry).await {
                tracing::error!(error = %e, level = ?result.level, "Failed to persist journal entry");
                return Err(JournalServiceError::Persistence {
                    source: e,
                    result,
                    guidance: decision.guidance,
                });
            }
            stored = true;

            if decision.flag_for_review {
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move {
                    dispatcher.notify_journal(&entry).await;
                });
            }
        } else if result.level != RiskLevel::Low && identity.is_none() {
            // Observability hook: risky content dropped for lack of identity
            tracing::warn!(
                level = ?result.level,
                score = result.score,
                "Risk detected in anonymous submission, entry not stored"
            );
        }

        Ok(JournalSubmission {
            guidance: decision.guidance,
            stored,
            user_identified: identity.is_some(),
            result,
        })
    }

    /// Stored entries for one submitter, newest first
    pub async fn entries_for(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, JournalServiceError> {
        self.journal
            .list_for_user(user_id)
            .await
            .map_err(JournalServiceError::from)
    }

    /// The admin review queue
    pub async fn flagged_entries(&self) -> Result<Vec<JournalEntry>, JournalServiceError> {
        self.journal
            .list_risky()
            .await
            .map_err(JournalServiceError::from)
    }

    /// Mark an entry reviewed; false when it does not exist
    pub async fn mark_reviewed(&self, id: Uuid) -> Result<bool, JournalServiceError> {
        self.journal
            .mark_reviewed(id)
            .await
            .map_err(JournalServiceError::from)
    }
}
