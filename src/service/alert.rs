//! Admin alert registry and best-effort dispatch for flagged records

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::db::repository::JournalRepository;
use crate::model::{AssessmentRecord, JournalEntry, RiskLevel};

/// Notification payload broadcast to admin listeners
#[derive(Debug, Clone, Serialize)]
pub struct AdminAlert {
    pub entry_id: Uuid,
    pub user_name: String,
    /// Bounded excerpt of the flagged content
    pub preview: String,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    /// Journal alerts only
    pub mood: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Registry of currently-connected admin listeners.
///
/// Owned by the dispatch component and injected into request handlers;
/// created at process start and torn down with the process. Delivery is
/// at-most-effort: no retry, no backpressure, and a listener whose
/// channel has closed is dropped from the set at the next broadcast.
#[derive(Default)]
pub struct AlertRegistry {
    listeners: Mutex<HashMap<Uuid, mpsc::UnboundedSender<AdminAlert>>>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned id is used to unsubscribe
    pub fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<AdminAlert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.listeners
            .lock()
            .expect("alert registry lock poisoned")
            .insert(id, tx);

        tracing::debug!(listener_id = %id, "Admin listener connected");
        (id, rx)
    }

    pub fn unsubscribe(&self, id: Uuid) {
        let removed = self
            .listeners
            .lock()
            .expect("alert registry lock poisoned")
            .remove(&id)
            .is_some();

        if removed {
            tracing::debug!(listener_id = %id, "Admin listener disconnected");
        }
    }

    /// Send to every registered listener, dropping closed ones.
    /// Returns the number of listeners that accepted the alert.
    pub fn broadcast(&self, alert: &AdminAlert) -> usize {
        let mut listeners = self
            .listeners
            .lock()
            .expect("alert registry lock poisoned");

        let mut closed = Vec::new();
        let mut delivered = 0;

        for (id, tx) in listeners.iter() {
            if tx.send(alert.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*id);
            }
        }

        for id in closed {
            listeners.remove(&id);
            tracing::debug!(listener_id = %id, "Dropped closed admin listener");
        }

        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .expect("alert registry lock poisoned")
            .len()
    }
}

/// Dispatches alerts for flagged records and marks journal records
/// as notified exactly once. Dispatch failures are logged, never
/// propagated to the submitter's response.
pub struct AlertDispatcher {
    registry: AlertRegistry,
    journal: JournalRepository,
    preview_length: usize,
}

impl AlertDispatcher {
    pub fn new(registry: AlertRegistry, journal: JournalRepository, preview_length: usize) -> Self {
        Self {
            registry,
            journal,
            preview_length,
        }
    }

    pub fn registry(&self) -> &AlertRegistry {
        &self.registry
    }

    /// Notify admins about a flagged journal entry
    pub async fn notify_journal(&self, entry: &JournalEntry) {
        let alert = AdminAlert {
            entry_id: entry.id,
            user_name: entry.user_name.clone(),
            preview: truncate_preview(&entry.entry, self.preview_length),
            risk_level: entry.risk_level,
            risk_score: entry.risk_score,
            mood: Some(entry.mood.clone()),
            timestamp: Utc::now(),
            message: format!(
                "{} RISK ALERT: {} submitted a concerning journal entry.",
                crate::db::models::risk_level_to_string(entry.risk_level),
                entry.user_name
            ),
        };

        let delivered = self.registry.broadcast(&alert);

        match self.journal.mark_admin_notified(entry.id).await {
            Ok(true) => {
                tracing::info!(
                    entry_id = %entry.id,
                    listeners = delivered,
                    level = ?entry.risk_level,
                    "Admins notified about flagged journal entry"
                );
            }
            Ok(false) => {
                tracing::debug!(entry_id = %entry.id, "Journal entry was already marked notified");
            }
            Err(e) => {
                tracing::error!(entry_id = %entry.id, error = %e, "Failed to mark entry notified");
            }
        }
    }

    /// Notify admins about a flagged assessment
    pub async fn notify_assessment(&self, record: &AssessmentRecord) {
        let alert = AdminAlert {
            entry_id: record.id,
            user_name: record.user_name.clone(),
            preview: truncate_preview(&record.risk_factors.join(", "), self.preview_length),
            risk_level: record.risk_level,
            risk_score: record.risk_score,
            mood: None,
            timestamp: Utc::now(),
            message: format!(
                "{} RISK ALERT: {} submitted a concerning safety assessment.",
                crate::db::models::risk_level_to_string(record.risk_level),
                record.user_name
            ),
        };

        let delivered = self.registry.broadcast(&alert);

        tracing::info!(
            assessment_id = %record.id,
            listeners = delivered,
            level = ?record.risk_level,
            "Admins notified about flagged assessment"
        );
    }
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> AdminAlert {
        AdminAlert {
            entry_id: Uuid::new_v4(),
            user_name: "Asha".to_string(),
            preview: "preview".to_string(),
            risk_level: RiskLevel::High,
            risk_score: 70,
            mood: None,
            timestamp: Utc::now(),
            message: "HIGH RISK ALERT".to_string(),
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_all_subscribers() {
        let registry = AlertRegistry::new();
        let (_id_a, mut rx_a) = registry.subscribe();
        let (_id_b, mut rx_b) = registry.subscribe();

        assert_eq!(registry.broadcast(&alert()), 2);
        assert!(rx_a.recv().await.is_some());
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn closed_listeners_are_dropped_on_broadcast() {
        let registry = AlertRegistry::new();
        let (_id_a, rx_a) = registry.subscribe();
        let (_id_b, mut rx_b) = registry.subscribe();
        drop(rx_a);

        assert_eq!(registry.broadcast(&alert()), 1);
        assert_eq!(registry.listener_count(), 1);
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn unsubscribe_removes_listener() {
        let registry = AlertRegistry::new();
        let (id, _rx) = registry.subscribe();
        assert_eq!(registry.listener_count(), 1);

        registry.unsubscribe(id);
        assert_eq!(registry.listener_count(), 0);
        assert_eq!(registry.broadcast(&alert()), 0);
    }

    #[test]
    fn preview_is_bounded() {
        let text = "a".repeat(200);
        let preview = truncate_preview(&text, 150);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));

        assert_eq!(truncate_preview("short", 150), "short");
    }
}
