//! Cumulative scorer for the structured nine-question safety assessment

use std::collections::HashMap;

use crate::model::{RiskLevel, StructuredAssessmentResult};

/// Physical safety answer weights (q1, q2, q3, q9)
const PHYSICAL_POINTS: &[(&str, u32)] = &[
    ("never", 0),
    ("no", 0),
    ("rarely", 20),
    ("sometimes", 40),
    ("often", 60),
    ("yes", 80),
];

/// Emotional safety answer weights (q4, q5, q6)
const EMOTIONAL_POINTS: &[(&str, u32)] = &[
    ("never", 0),
    ("rarely", 15),
    ("sometimes", 30),
    ("often", 50),
];

/// Critical safety answer weights (q7, q8)
const CRITICAL_POINTS: &[(&str, u32)] = &[
    ("no", 0),
    ("never", 0),
    ("yes", 80),
    ("unsure", 40),
    ("maybe", 30),
    ("one", 10),
];

/// Which answers count toward the total for a question
enum Gate {
    /// Scored unless the answer is the "never" baseline
    NotNever,
    /// Scored unless the answer is the "no" baseline
    NotNo,
    /// Scored only for these exact answers
    OnlyFor(&'static [&'static str]),
}

struct QuestionRule {
    key: &'static str,
    points: &'static [(&'static str, u32)],
    gate: Gate,
    /// Noteworthy (answer, factor label) pairs for this question
    factors: &'static [(&'static str, &'static str)],
}

/// The nine fixed questions, evaluated in key order
const QUESTIONS: &[QuestionRule] = &[
    QuestionRule {
        key: "q1",
        points: PHYSICAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Frequent physical harm")],
    },
    QuestionRule {
        key: "q2",
        points: PHYSICAL_POINTS,
        gate: Gate::NotNo,
        factors: &[("yes", "Unexplained injuries")],
    },
    QuestionRule {
        key: "q3",
        points: PHYSICAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Fear of adults/environment")],
    },
    QuestionRule {
        key: "q4",
        points: EMOTIONAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Emotional abuse indicators")],
    },
    QuestionRule {
        key: "q5",
        points: EMOTIONAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Sleep/eating disturbances")],
    },
    QuestionRule {
        key: "q6",
        points: EMOTIONAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Persistent sadness/anxiety")],
    },
    QuestionRule {
        key: "q7",
        points: CRITICAL_POINTS,
        gate: Gate::NotNo,
        factors: &[
            ("yes", "Potential sexual abuse"),
            ("unsure", "Uncertain about boundaries"),
        ],
    },
    QuestionRule {
        key: "q8",
        points: CRITICAL_POINTS,
        gate: Gate::OnlyFor(&["maybe", "no"]),
        factors: &[("no", "No trusted adult support")],
    },
    QuestionRule {
        key: "q9",
        points: PHYSICAL_POINTS,
        gate: Gate::NotNever,
        factors: &[("often", "Restricted access to care")],
    },
];

fn points_for(points: &[(&str, u32)], answer: &str) -> u32 {
    points
        .iter()
        .find(|(value, _)| *value == answer)
        .map(|(_, pts)| *pts)
        .unwrap_or(0)
}

fn level_for_score(total: u32) -> RiskLevel {
    if total >= 70 {
        RiskLevel::Critical
    } else if total >= 50 {
        RiskLevel::High
    } else if total >= 25 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score a structured assessment from its answer map.
///
/// Each answered question whose value differs from its safe baseline adds
/// that question's table points to a running total (unknown values add 0);
/// the level comes from fixed thresholds on the cumulative total. Missing
/// answers contribute nothing; completeness is enforced by the caller.
pub fn classify_assessment(answers: &HashMap<String, String>) -> StructuredAssessmentResult {
    let mut total: u32 = 0;
    let mut risk_factors = Vec::new();

    for rule in QUESTIONS {
        let answer = match answers.get(rule.key) {
            Some(value) => value.trim().to_lowercase(),
            None => continue,
        };

        let scored = match rule.gate {
            Gate::NotNever => answer != "never",
            Gate::NotNo => answer != "no",
            Gate::OnlyFor(values) => values.contains(&answer.as_str()),
        };
        if !scored {
            continue;
        }

        total += points_for(rule.points, &answer);

        for (value, label) in rule.factors {
            if answer == *value {
                risk_factors.push((*label).to_string());
            }
        }
    }

    let level = level_for_score(total);

    tracing::debug!(
        score = total,
        level = ?level,
        factors = risk_factors.len(),
        "Assessment scored"
    );

    StructuredAssessmentResult {
        score: total,
        level,
        risk_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn baseline() -> HashMap<String, String> {
        answers(&[
            ("q1", "never"),
            ("q2", "no"),
            ("q3", "never"),
            ("q4", "never"),
            ("q5", "never"),
            ("q6", "never"),
            ("q7", "no"),
            ("q8", "yes"),
            ("q9", "never"),
        ])
    }

    #[test]
    fn all_baseline_answers_are_low() {
        let result = classify_assessment(&baseline());
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn frequent_harm_plus_sexual_abuse_is_critical() {
        let mut input = baseline();
        input.insert("q1".to_string(), "often".to_string());
        input.insert("q7".to_string(), "yes".to_string());

        let result = classify_assessment(&input);
        assert_eq!(result.score, 140);
        assert_eq!(result.level, RiskLevel::Critical);
        assert!(result
            .risk_factors
            .contains(&"Frequent physical harm".to_string()));
        assert!(result
            .risk_factors
            .contains(&"Potential sexual abuse".to_string()));
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(level_for_score(24), RiskLevel::Low);
        assert_eq!(level_for_score(25), RiskLevel::Medium);
        assert_eq!(level_for_score(49), RiskLevel::Medium);
        assert_eq!(level_for_score(50), RiskLevel::High);
        assert_eq!(level_for_score(69), RiskLevel::High);
        assert_eq!(level_for_score(70), RiskLevel::Critical);
    }

    #[test]
    fn q8_scores_only_maybe_and_no() {
        let mut input = baseline();
        input.insert("q8".to_string(), "maybe".to_string());
        assert_eq!(classify_assessment(&input).score, 30);

        input.insert("q8".to_string(), "no".to_string());
        let result = classify_assessment(&input);
        assert_eq!(result.score, 0);
        assert_eq!(
            result.risk_factors,
            vec!["No trusted adult support".to_string()]
        );

        // "yes" would be worth 80 in the critical table but q8 ignores it
        input.insert("q8".to_string(), "yes".to_string());
        assert_eq!(classify_assessment(&input).score, 0);
    }

    #[test]
    fn missing_answers_contribute_nothing() {
        let result = classify_assessment(&answers(&[("q4", "often")]));
        assert_eq!(result.score, 50);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(
            result.risk_factors,
            vec!["Emotional abuse indicators".to_string()]
        );
    }

    #[test]
    fn unknown_answer_values_score_zero() {
        let mut input = baseline();
        input.insert("q1".to_string(), "constantly".to_string());
        let result = classify_assessment(&input);
        assert_eq!(result.score, 0);
        assert_eq!(result.level, RiskLevel::Low);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut input = baseline();
        input.insert("q3".to_string(), "sometimes".to_string());
        assert_eq!(classify_assessment(&input), classify_assessment(&input));
    }
}
