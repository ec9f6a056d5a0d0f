//! Trigger-tier classifier for free-text journal entries

use crate::model::{JournalAssessmentResult, RiskLevel};

/// One priority tier of trigger phrases with its fixed score and level
struct TriggerTier {
    level: RiskLevel,
    score: u32,
    phrases: &'static [&'static str],
}

/// Suicidal ideation and self-harm phrases
const CRITICAL_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "end it all",
    "no reason to live",
    "better off dead",
    "end myself",
    "take my life",
    "don't want to live",
    "hate my life",
    "life is not worth",
    "can't go on",
    "give up on life",
];

/// Physical/sexual abuse and violence phrases
const HIGH_PHRASES: &[&str] = &[
    "abuse",
    "molest",
    "rape",
    "sexual abuse",
    "beating me",
    "hurting me",
    "hit me",
    "beat me",
    "physical abuse",
    "touching me",
    "harassment",
    "molested",
    "raped",
    "abused",
    "violence",
    "hurt me",
    "assault",
    "forced me",
    "threaten me",
];

/// Fear, distress and family-conflict phrases
const MEDIUM_PHRASES: &[&str] = &[
    "scared",
    "afraid",
    "frightened",
    "terrified",
    "unsafe",
    "parents fight",
    "fighting",
    "yelling",
    "screaming",
    "bully",
    "bullied",
    "threat",
    "worried",
    "anxious",
    "nervous",
    "depressed",
    "sad all the time",
    "can't sleep",
    "bad dreams",
];

/// Tiers in evaluation order; the first tier with any match decides the result
const TIERS: &[TriggerTier] = &[
    TriggerTier {
        level: RiskLevel::Critical,
        score: 80,
        phrases: CRITICAL_PHRASES,
    },
    TriggerTier {
        level: RiskLevel::High,
        score: 70,
        phrases: HIGH_PHRASES,
    },
    TriggerTier {
        level: RiskLevel::Medium,
        score: 40,
        phrases: MEDIUM_PHRASES,
    },
];

/// Classify a journal entry against the ordered trigger tiers.
///
/// Matching is case-insensitive substring containment over the trimmed
/// text, not whole-word; recall is deliberately favored over precision
/// for safety triggers. Tiers are checked Critical, High, Medium and the
/// first tier containing any phrase wins, recording only the first
/// matching phrase of that tier. The caller validates that `text` is
/// non-empty before classification.
pub fn classify_journal_entry(text: &str) -> JournalAssessmentResult {
    let normalized = text.trim().to_lowercase();

    for tier in TIERS {
        if let Some(phrase) = tier.phrases.iter().find(|p| normalized.contains(**p)) {
            tracing::debug!(
                level = ?tier.level,
                score = tier.score,
                trigger = %phrase,
                "Journal trigger matched"
            );
            return JournalAssessmentResult {
                score: tier.score,
                level: tier.level,
                triggers: vec![(*phrase).to_string()],
            };
        }
    }

    JournalAssessmentResult {
        score: 0,
        level: RiskLevel::Low,
        triggers: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_phrase_wins_over_lower_tiers() {
        let result = classify_journal_entry("I am scared and I want to die");
        assert_eq!(result.level, RiskLevel::Critical);
        assert_eq!(result.score, 80);
        assert_eq!(result.triggers, vec!["want to die".to_string()]);
    }

    #[test]
    fn high_tier_wins_over_medium() {
        let result = classify_journal_entry("I feel scared and abused");
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.score, 70);
        // "abuse" precedes "abused" in the tier list and matches as a substring
        assert_eq!(result.triggers, vec!["abuse".to_string()]);
    }

    #[test]
    fn only_first_match_in_tier_is_recorded() {
        let result = classify_journal_entry("they hit me and beat me and hurt me");
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.triggers.len(), 1);
        assert_eq!(result.triggers, vec!["hit me".to_string()]);
    }

    #[test]
    fn no_trigger_is_low() {
        let result = classify_journal_entry("today was a normal day");
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(result.score, 0);
        assert!(result.triggers.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let result = classify_journal_entry("  I CAN'T SLEEP at night  ");
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.score, 40);
        assert_eq!(result.triggers, vec!["can't sleep".to_string()]);
    }

    #[test]
    fn substring_matching_accepts_false_positives() {
        // "threat" inside "threatened" still counts; flagging bias is intended
        let result = classify_journal_entry("he threatened the dog");
        assert_eq!(result.level, RiskLevel::Medium);
        assert_eq!(result.triggers, vec!["threat".to_string()]);
    }

    #[test]
    fn classification_is_idempotent() {
        let first = classify_journal_entry("my parents fight every night");
        let second = classify_journal_entry("my parents fight every night");
        assert_eq!(first, second);
    }
}
