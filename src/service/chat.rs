//! Rule-based FAQ chatbot: ordered response strategies over a fixed store

use regex::Regex;
use std::sync::OnceLock;

use crate::db::repository::FaqRepository;
use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("Message is required")]
    EmptyMessage,

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Whole-message greetings; partial matches are deliberately excluded so
/// "hi, I need help with..." falls through to the real strategies
const EXACT_GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "hi there",
    "hello there",
];

const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency",
    "help",
    "urgent",
    "danger",
    "save me",
    "immediate",
    "911",
];

const EMERGENCY_CONTEXT: &[&str] = &[
    "hurt", "abuse", "scared", "afraid", "unsafe", "threat", "suicide", "kill",
];

const STOP_WORDS: &[&str] = &[
    "what", "is", "the", "a", "an", "how", "to", "do", "does", "can", "could", "would", "should",
    "when", "where", "why", "who", "which", "about", "procedure",
];

const GREETING_RESPONSE: &str = "Hello! I'm your ChildGuard assistant. I can help you with:\n\
     - Child safety information\n\
     - POCSO laws\n\
     - Emergency contacts\n\
     - Professional resources\n\
     - Abuse reporting\n\n\
     How can I assist you today?";

const EMERGENCY_RESPONSE: &str = "EMERGENCY HELP\n\n\
     Immediate Assistance:\n\
     - Police: 100\n\
     - Childline: 1098\n\
     - Women Helpline: 181\n\
     - Emergency Services: 108\n\n\
     If you're in immediate danger:\n\
     1. Call emergency services\n\
     2. Go to a safe place\n\
     3. Contact a trusted adult";

/// Topic keyword to canned response, checked in order after the FAQ store
const TOPIC_RESPONSES: &[(&str, &str)] = &[
    (
        "complain",
        "HOW TO FILE A COMPLAINT\n\n\
         To file a complaint about child-related issues:\n\n\
         Immediate Actions:\n\
         - Call Childline: 1098 (24/7 free service)\n\
         - Contact local police: 100\n\
         - Visit nearest child welfare committee\n\n\
         Required Information:\n\
         - Details of the incident\n\
         - Date and time\n\
         - Persons involved\n\
         - Any evidence available",
    ),
    (
        "violence",
        "REPORTING CHILD VIOLENCE\n\n\
         If you witness or suspect child violence:\n\n\
         Urgent Steps:\n\
         1. Ensure child's immediate safety\n\
         2. Call 1098 or 100 immediately\n\
         3. Do not confront the alleged perpetrator\n\
         4. Preserve any evidence\n\n\
         Legal Protection:\n\
         - POCSO Act provides strong legal framework\n\
         - Confidentiality maintained\n\
         - Special courts for speedy justice",
    ),
    (
        "abuse",
        "REPORTING CHILD ABUSE\n\n\
         Child abuse reporting channels:\n\n\
         Immediate Help:\n\
         - Childline: 1098\n\
         - Police: 100\n\
         - Women Helpline: 181\n\n\
         Additional Support:\n\
         - School authorities\n\
         - Child Welfare Committee\n\
         - NGOs specializing in child protection\n\n\
         Remember: Early reporting saves lives.",
    ),
    (
        "1098",
        "CHILDLINE 1098\n\n\
         Childline 1098 is a 24/7 emergency helpline for children in need of care and protection.\n\n\
         Services provided:\n\
         - Emergency intervention\n\
         - Counseling support\n\
         - Rehabilitation services\n\
         - Legal assistance\n\
         - Medical help\n\n\
         Call 1098 anytime - it's free and confidential!",
    ),
    (
        "pocso",
        "POCSO ACT INFORMATION\n\n\
         The Protection of Children from Sexual Offences (POCSO) Act, 2012:\n\n\
         Key Features:\n\
         - Protects children under 18 years\n\
         - Child-friendly legal procedures\n\
         - Special courts for speedy trials\n\
         - Confidentiality of child's identity\n\
         - Mandatory reporting requirements\n\n\
         The Act covers various forms of sexual abuse including penetrative, \
         non-penetrative assault, and sexual harassment.",
    ),
];

fn non_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\w]").expect("static regex"))
}

/// The whole message must be a greeting, not merely contain one
fn is_exact_greeting(message: &str) -> bool {
    EXACT_GREETINGS.contains(&message)
}

fn is_emergency(message: &str) -> bool {
    let has_emergency_word = EMERGENCY_KEYWORDS.iter().any(|k| message.contains(k));
    let has_emergency_context = EMERGENCY_CONTEXT.iter().any(|c| message.contains(c));
    has_emergency_word || has_emergency_context
}

/// Search terms worth matching: length over two, not a stop word,
/// stripped of punctuation
fn extract_keywords(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .map(|word| non_word_pattern().replace_all(word, "").to_string())
        .filter(|word| !word.is_empty())
        .collect()
}

fn topic_response(message: &str) -> Option<&'static str> {
    TOPIC_RESPONSES
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, response)| *response)
}

fn fallback_response(message: &str) -> String {
    format!(
        "I understand you're asking about: \"{}\". I specialize in child protection topics. \
         You can ask me about:\n\n\
         - How to file complaints\n\
         - Child abuse reporting\n\
         - Emergency contacts\n\
         - POCSO Act information\n\
         - Child safety guidelines\n\n\
         Could you try rephrasing your question?",
        message
    )
}

/// Service answering chat messages from the FAQ store and fixed tables
pub struct ChatService {
    faqs: FaqRepository,
}

impl ChatService {
    pub fn new(faqs: FaqRepository) -> Self {
        Self { faqs }
    }

    /// Produce a response for one chat message.
    ///
    /// Strategies run in a fixed order and the first hit wins: exact
    /// greeting, emergency scan, FAQ store (exact question, partial
    /// question, keyword in question, keyword in tags, keyword in
    /// answer), topic table, generic fallback.
    pub async fn respond(&self, message: &str) -> Result<String, ChatServiceError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ChatServiceError::EmptyMessage);
        }

        let normalized = trimmed.to_lowercase();

        if is_exact_greeting(&normalized) {
            tracing::debug!("Chat message handled as greeting");
            return Ok(GREETING_RESPONSE.to_string());
        }

        if is_emergency(&normalized) {
            tracing::debug!("Chat message handled as emergency");
            return Ok(EMERGENCY_RESPONSE.to_string());
        }

        if let Some(faq) = self.search_store(trimmed, &normalized).await? {
            return Ok(faq);
        }

        if let Some(response) = topic_response(&normalized) {
            tracing::debug!("Chat message handled by topic table");
            return Ok(response.to_string());
        }

        tracing::debug!("Chat message fell through to generic response");
        Ok(fallback_response(trimmed))
    }

    async fn search_store(
        &self,
        message: &str,
        normalized: &str,
    ) -> Result<Option<String>, ChatServiceError> {
        if let Some(faq) = self.faqs.find_exact_question(message).await? {
            tracing::debug!(question = %faq.question, "FAQ matched on exact question");
            return Ok(Some(faq.answer));
        }

        if let Some(faq) = self.faqs.find_question_contains(message).await? {
            tracing::debug!(question = %faq.question, "FAQ matched on partial question");
            return Ok(Some(faq.answer));
        }

        let keywords = extract_keywords(normalized);
        if keywords.is_empty() {
            return Ok(None);
        }

        for keyword in &keywords {
            if let Some(faq) = self.faqs.find_question_contains(keyword).await? {
                tracing::debug!(keyword = %keyword, "FAQ matched on question keyword");
                return Ok(Some(faq.answer));
            }
        }

        for keyword in &keywords {
            if let Some(faq) = self.faqs.find_tag_match(keyword).await? {
                tracing::debug!(keyword = %keyword, "FAQ matched on tag");
                return Ok(Some(faq.answer));
            }
        }

        for keyword in &keywords {
            if let Some(faq) = self.faqs.find_answer_contains(keyword).await? {
                tracing::debug!(keyword = %keyword, "FAQ matched on answer text");
                return Ok(Some(faq.answer));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_must_match_whole_message() {
        assert!(is_exact_greeting("hi"));
        assert!(is_exact_greeting("hello there"));
        assert!(!is_exact_greeting("hi, i need help with pocso"));
    }

    #[test]
    fn emergency_detection_uses_keywords_and_context() {
        assert!(is_emergency("this is an emergency"));
        assert!(is_emergency("i feel unsafe at home"));
        assert!(!is_emergency("what is the pocso act"));
    }

    #[test]
    fn keyword_extraction_filters_noise() {
        let keywords = extract_keywords("what is the procedure to report abuse?");
        assert_eq!(keywords, vec!["report".to_string(), "abuse".to_string()]);
    }

    #[test]
    fn keyword_extraction_keeps_helpline_numbers() {
        let keywords = extract_keywords("tell me about 1098");
        assert!(keywords.contains(&"1098".to_string()));
    }

    #[test]
    fn topic_table_matches_substring() {
        assert!(topic_response("how do i complain about my school").is_some());
        assert!(topic_response("tell me about pocso").is_some());
        assert!(topic_response("what's the weather").is_none());
    }

    #[test]
    fn fallback_echoes_the_question() {
        let response = fallback_response("how do kites fly");
        assert!(response.contains("how do kites fly"));
    }
}
