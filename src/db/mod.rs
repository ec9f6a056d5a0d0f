//! Database module for PostgreSQL persistence

pub mod models;
pub mod repository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "CHILDGUARD_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "CHILDGUARD_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "CHILDGUARD_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "CHILDGUARD_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "CHILDGUARD_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "childguard";
const DEFAULT_POSTGRES_PASSWORD: &str = "childguard";
const DEFAULT_POSTGRES_DB: &str = "childguard";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    Duplicate(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            age INT NOT NULL,
            role VARCHAR(20) NOT NULL,
            location TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            user_name TEXT NOT NULL,
            user_email TEXT NOT NULL,
            user_age INT NOT NULL,
            user_location TEXT NOT NULL,
            user_role VARCHAR(20) NOT NULL,
            entry TEXT NOT NULL,
            mood VARCHAR(20) NOT NULL DEFAULT 'neutral',
            risk_score INT NOT NULL,
            risk_level VARCHAR(10) NOT NULL,
            triggers JSONB NOT NULL DEFAULT '[]',
            flagged BOOLEAN NOT NULL DEFAULT FALSE,
            is_private BOOLEAN NOT NULL DEFAULT TRUE,
            admin_notified BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assessments (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            user_name TEXT NOT NULL,
            user_email TEXT NOT NULL,
            user_age INT NOT NULL,
            user_location TEXT NOT NULL,
            user_role VARCHAR(20) NOT NULL,
            assessment_type VARCHAR(50) NOT NULL,
            answers JSONB NOT NULL,
            risk_score INT NOT NULL,
            risk_level VARCHAR(10) NOT NULL,
            risk_factors JSONB NOT NULL DEFAULT '[]',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS professionals (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            type VARCHAR(30) NOT NULL,
            specialization TEXT NOT NULL,
            location TEXT NOT NULL,
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            experience TEXT NOT NULL,
            cost TEXT NOT NULL,
            available BOOLEAN NOT NULL DEFAULT TRUE,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            qualifications JSONB NOT NULL DEFAULT '[]',
            languages JSONB NOT NULL DEFAULT '[]',
            description TEXT,
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shelters (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            type VARCHAR(30) NOT NULL,
            location TEXT NOT NULL,
            address TEXT NOT NULL,
            contact TEXT NOT NULL,
            capacity INT NOT NULL,
            current_occupancy INT NOT NULL,
            description TEXT,
            services JSONB NOT NULL DEFAULT '[]',
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            available BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY,
            professional_id UUID NOT NULL,
            user_id UUID NOT NULL,
            date DATE NOT NULL,
            time VARCHAR(20) NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS faqs (
            id UUID PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            tags JSONB NOT NULL DEFAULT '[]'
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes separately
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_entries_user_id ON journal_entries(user_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_entries_risk_level ON journal_entries(risk_level)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_entries_created_at ON journal_entries(created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_assessments_user_id ON assessments(user_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_professionals_type ON professionals(type)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shelters_type ON shelters(type)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
