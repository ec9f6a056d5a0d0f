//! Core risk domain types shared by the journal and assessment classifiers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Risk level derived from a numeric score, never set directly by callers.
///
/// Totally ordered: LOW < MEDIUM < HIGH < CRITICAL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Whether a record at this level is eligible for admin review
    pub fn is_flagged(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

/// Result of classifying a free-text journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JournalAssessmentResult {
    pub score: u32,
    pub level: RiskLevel,
    /// Matched trigger phrases, in tier-evaluation order (Critical first)
    pub triggers: Vec<String>,
}

/// Result of classifying a structured nine-question assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StructuredAssessmentResult {
    pub score: u32,
    pub level: RiskLevel,
    /// Human-readable labels for noteworthy (question, answer) pairs
    pub risk_factors: Vec<String>,
}

/// Outcome of the risk decision policy for a single classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Store the record (level above LOW and the submitter is identified)
    pub persist: bool,
    /// Eligible for admin review (HIGH or CRITICAL)
    pub flag_for_review: bool,
    /// Per-level guidance message returned to the submitter
    pub guidance: &'static str,
}
