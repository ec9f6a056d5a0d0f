//! Risk decision policy: persistence, review flagging and guidance

use crate::model::{Decision, RiskLevel};

const GUIDANCE_LOW: &str = "Your entry appears to be normal. Thank you for sharing your thoughts.";
const GUIDANCE_MEDIUM: &str =
    "We noticed some concerning content. Remember, help is available if you need it.";
const GUIDANCE_HIGH: &str =
    "We detected serious concerns. Our team will review this entry and reach out if needed.";
const GUIDANCE_CRITICAL: &str = "IMMEDIATE ATTENTION NEEDED! Emergency contacts: Childline 1098, \
     Police 100. Our team has been alerted.";

const RECOMMENDATIONS_LOW: &[&str] = &[
    "Continue maintaining open communication with trusted adults",
    "Practice regular self-care and emotional awareness",
    "Keep using ChildGuard for daily check-ins",
];

const RECOMMENDATIONS_MEDIUM: &[&str] = &[
    "Consider speaking with a school counselor or trusted adult",
    "Use ChildGuard's journal feature to express feelings",
    "Practice stress-management techniques regularly",
];

const RECOMMENDATIONS_HIGH: &[&str] = &[
    "Immediately reach out to a trusted adult or professional",
    "Contact Childline (1098) for confidential support",
    "Use emergency resources available in the Professionals section",
];

const RECOMMENDATIONS_CRITICAL: &[&str] = &[
    "IMMEDIATE ACTION REQUIRED - Contact emergency services",
    "Call Childline 1098 or Police 100 immediately",
    "Reach out to a trusted adult or teacher right away",
    "Our team has been alerted to provide support",
];

/// Per-level guidance message returned with every classification
pub fn guidance_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => GUIDANCE_LOW,
        RiskLevel::Medium => GUIDANCE_MEDIUM,
        RiskLevel::High => GUIDANCE_HIGH,
        RiskLevel::Critical => GUIDANCE_CRITICAL,
    }
}

/// Per-level recommendation list for assessment responses
pub fn recommendations_for(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Low => RECOMMENDATIONS_LOW,
        RiskLevel::Medium => RECOMMENDATIONS_MEDIUM,
        RiskLevel::High => RECOMMENDATIONS_HIGH,
        RiskLevel::Critical => RECOMMENDATIONS_CRITICAL,
    }
}

/// Decide the consequences of a classification.
///
/// Risky results are persisted only when the submitter is identified;
/// anonymous classification still runs and still returns guidance.
/// Identity never influences the flagging threshold.
pub fn decide(level: RiskLevel, identified: bool) -> Decision {
    Decision {
        persist: level != RiskLevel::Low && identified,
        flag_for_review: level.is_flagged(),
        guidance: guidance_for(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_with_identity_persists_without_review_flag() {
        let decision = decide(RiskLevel::Medium, true);
        assert!(decision.persist);
        assert!(!decision.flag_for_review);
    }

    #[test]
    fn medium_without_identity_is_not_persisted() {
        let decision = decide(RiskLevel::Medium, false);
        assert!(!decision.persist);
        assert!(!decision.flag_for_review);
    }

    #[test]
    fn high_and_critical_are_flagged_regardless_of_identity() {
        assert!(decide(RiskLevel::High, true).flag_for_review);
        assert!(decide(RiskLevel::High, false).flag_for_review);
        assert!(decide(RiskLevel::Critical, false).flag_for_review);
    }

    #[test]
    fn low_is_never_persisted() {
        assert!(!decide(RiskLevel::Low, true).persist);
        assert!(!decide(RiskLevel::Low, false).persist);
    }

    #[test]
    fn escalated_guidance_carries_emergency_contacts() {
        assert!(guidance_for(RiskLevel::Critical).contains("Childline 1098"));
        assert!(guidance_for(RiskLevel::High).contains("review"));
        assert!(recommendations_for(RiskLevel::Critical)
            .iter()
            .any(|r| r.contains("Childline 1098")));
        assert_eq!(recommendations_for(RiskLevel::Low).len(), 3);
    }
}
