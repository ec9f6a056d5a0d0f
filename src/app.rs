//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repository::{
    AssessmentRepository, DirectoryRepository, FaqRepository, JournalRepository, UserRepository,
};
use crate::model::Config;
use crate::service::{
    AlertDispatcher, AlertRegistry, AssessmentService, AuthService, ChatService, DirectoryService,
    JournalService,
};

/// Application state containing all services and shared resources
///
/// This struct centralizes service initialization and makes it easy to inject
/// dependencies into Actix-web handlers.
pub struct AppState {
    /// Database connection pool
    pub db_pool: Arc<PgPool>,
    /// Signup/login and identity resolution
    pub auth_service: Arc<AuthService>,
    /// Journal submissions and the admin review queue
    pub journal_service: Arc<JournalService>,
    /// Structured safety assessments
    pub assessment_service: Arc<AssessmentService>,
    /// FAQ chatbot
    pub chat_service: Arc<ChatService>,
    /// Professional and shelter directories
    pub directory_service: Arc<DirectoryService>,
    /// Admin alert registry and dispatch
    pub alert_dispatcher: Arc<AlertDispatcher>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Database connection and schema initialization
    /// 2. Alert registry construction (owned here, injected everywhere else)
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let journal_repository = JournalRepository::new(db_pool.clone());

        // The listener registry lives inside the dispatcher; request
        // handlers and services only ever see the injected Arc
        let alert_dispatcher = Arc::new(AlertDispatcher::new(
            AlertRegistry::new(),
            journal_repository.clone(),
            config.alerts.preview_length,
        ));

        let auth_service = Arc::new(AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.auth.clone(),
        ));

        let journal_service = Arc::new(JournalService::new(
            journal_repository,
            Arc::clone(&auth_service),
            Arc::clone(&alert_dispatcher),
        ));

        let assessment_service = Arc::new(AssessmentService::new(
            AssessmentRepository::new(db_pool.clone()),
            Arc::clone(&auth_service),
            Arc::clone(&alert_dispatcher),
        ));

        let chat_service = Arc::new(ChatService::new(FaqRepository::new(db_pool.clone())));

        let directory_service = Arc::new(DirectoryService::new(DirectoryRepository::new(
            db_pool.clone(),
        )));

        Ok(Self {
            db_pool: Arc::new(db_pool),
            auth_service,
            journal_service,
            assessment_service,
            chat_service,
            directory_service,
            alert_dispatcher,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),
}
