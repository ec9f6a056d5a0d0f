//! Repositories for account, risk-record, directory and FAQ persistence

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    risk_level_to_string, AppointmentRow, FaqRow, JournalEntryRow, ProfessionalFilter,
    ProfessionalRow, ShelterFilter, ShelterRow, UserRow,
};
use super::DbError;
use crate::model::{Appointment, AssessmentRecord, JournalEntry, Professional, Shelter};

const PG_UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION)
    )
}

/// Repository for account rows
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account; duplicate email maps to `DbError::Duplicate`
    pub async fn insert(&self, user: &UserRow) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, age, role, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.age)
        .bind(&user.role)
        .bind(&user.location)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::Duplicate(user.email.clone())
            } else {
                DbError::Connection(e)
            }
        })?;

        tracing::debug!(id = %user.id, "Inserted user");
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Repository for stored journal entries
#[derive(Clone)]
pub struct JournalRepository {
    pool: PgPool,
}

impl JournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a risky journal entry
    pub async fn insert(&self, entry: &JournalEntry) -> Result<(), DbError> {
        let triggers = serde_json::to_value(&entry.triggers)
            .map_err(|e| DbError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO journal_entries (
                id, user_id, user_name, user_email, user_age, user_location, user_role,
                entry, mood, risk_score, risk_level, triggers,
                flagged, is_private, admin_notified, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(&entry.user_name)
        .bind(&entry.user_email)
        .bind(entry.user_age)
        .bind(&entry.user_location)
        .bind(entry.user_role.as_str())
        .bind(&entry.entry)
        .bind(&entry.mood)
        .bind(entry.risk_score as i32)
        .bind(risk_level_to_string(entry.risk_level))
        .bind(&triggers)
        .bind(entry.flagged)
        .bind(entry.is_private)
        .bind(entry.admin_notified)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %entry.id, level = ?entry.risk_level, "Inserted journal entry");
        Ok(())
    }

    /// All stored entries for one submitter, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, DbError> {
        let rows: Vec<JournalEntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM journal_entries WHERE user_id = $1 ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    /// The admin review queue: every stored risky entry, newest first
    pub async fn list_risky(&self) -> Result<Vec<JournalEntry>, DbError> {
        let rows: Vec<JournalEntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM journal_entries
            WHERE risk_level IN ('MEDIUM', 'HIGH', 'CRITICAL')
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    /// Mark an entry reviewed. Returns false when the entry does not exist.
    pub async fn mark_reviewed(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET admin_notified = TRUE WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the admin-notified flag exactly once.
    /// Returns false when the record was already marked (or does not exist).
    pub async fn mark_admin_notified(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET admin_notified = TRUE
            WHERE id = $1 AND admin_notified = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        let marked = result.rows_affected() > 0;
        if marked {
            tracing::debug!(id = %id, "Marked journal entry admin-notified");
        }

        Ok(marked)
    }
}

/// Repository for stored assessments
#[derive(Clone)]
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a risky assessment with the submitter snapshot
    pub async fn insert(&self, record: &AssessmentRecord) -> Result<(), DbError> {
        let risk_factors = serde_json::to_value(&record.risk_factors)
            .map_err(|e| DbError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO assessments (
                id, user_id, user_name, user_email, user_age, user_location, user_role,
                assessment_type, answers, risk_score, risk_level, risk_factors, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.user_name)
        .bind(&record.user_email)
        .bind(record.user_age)
        .bind(&record.user_location)
        .bind(record.user_role.as_str())
        .bind(&record.assessment_type)
        .bind(&record.answers)
        .bind(record.risk_score as i32)
        .bind(risk_level_to_string(record.risk_level))
        .bind(&risk_factors)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, level = ?record.risk_level, "Inserted assessment");
        Ok(())
    }

}

/// Repository for the professional and shelter directories
#[derive(Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List verified professionals with optional filters, best-rated first
    pub async fn list_professionals(
        &self,
        filter: &ProfessionalFilter,
    ) -> Result<Vec<Professional>, DbError> {
        // Build dynamic query
        let mut conditions = vec!["verified = TRUE".to_string()];
        let mut params: Vec<String> = Vec::new();

        if let Some(ref kind) = filter.kind {
            params.push(kind.clone());
            conditions.push(format!("type = ${}", params.len()));
        }

        if let Some(ref location) = filter.location {
            params.push(location.clone());
            conditions.push(format!("location ILIKE '%' || ${} || '%'", params.len()));
        }

        if let Some(ref specialization) = filter.specialization {
            params.push(specialization.clone());
            conditions.push(format!(
                "specialization ILIKE '%' || ${} || '%'",
                params.len()
            ));
        }

        if let Some(ref search) = filter.search {
            params.push(search.clone());
            let n = params.len();
            conditions.push(format!(
                "(name ILIKE '%' || ${n} || '%' OR specialization ILIKE '%' || ${n} || '%' \
                 OR location ILIKE '%' || ${n} || '%' OR description ILIKE '%' || ${n} || '%')"
            ));
        }

        let select_query = format!(
            "SELECT * FROM professionals WHERE {} ORDER BY rating DESC",
            conditions.join(" AND ")
        );

        let rows: Vec<ProfessionalRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    pub async fn get_professional(&self, id: Uuid) -> Result<Professional, DbError> {
        let row: ProfessionalRow = sqlx::query_as(
            r#"
            SELECT * FROM professionals WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// List verified shelters with optional filters, emptiest first
    pub async fn list_shelters(&self, filter: &ShelterFilter) -> Result<Vec<Shelter>, DbError> {
        let mut conditions = vec!["verified = TRUE".to_string()];
        let mut params: Vec<String> = Vec::new();

        if let Some(ref kind) = filter.kind {
            params.push(kind.clone());
            conditions.push(format!("type = ${}", params.len()));
        }

        if let Some(ref location) = filter.location {
            params.push(location.clone());
            conditions.push(format!("location ILIKE '%' || ${} || '%'", params.len()));
        }

        if let Some(ref search) = filter.search {
            params.push(search.clone());
            let n = params.len();
            conditions.push(format!(
                "(name ILIKE '%' || ${n} || '%' OR location ILIKE '%' || ${n} || '%' \
                 OR description ILIKE '%' || ${n} || '%')"
            ));
        }

        let select_query = format!(
            "SELECT * FROM shelters WHERE {} ORDER BY current_occupancy ASC",
            conditions.join(" AND ")
        );

        let rows: Vec<ShelterRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect())
    }

    pub async fn get_shelter(&self, id: Uuid) -> Result<Shelter, DbError> {
        let row: ShelterRow = sqlx::query_as(
            r#"
            SELECT * FROM shelters WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    pub async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, professional_id, user_id, date, time, notes, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(appointment.id)
        .bind(appointment.professional_id)
        .bind(appointment.user_id)
        .bind(appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.notes)
        .bind(appointment.status.as_str())
        .bind(appointment.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %appointment.id, "Inserted appointment");
        Ok(())
    }

    #[allow(dead_code)]
    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, DbError> {
        let row: AppointmentRow = sqlx::query_as(
            r#"
            SELECT * FROM appointments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }
}

/// Repository for the FAQ store backing the chatbot
#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Exact question match, case-insensitive
    pub async fn find_exact_question(&self, question: &str) -> Result<Option<FaqRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM faqs WHERE LOWER(question) = LOWER($1) LIMIT 1
            "#,
        )
        .bind(question)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// First FAQ whose question contains the term
    pub async fn find_question_contains(&self, term: &str) -> Result<Option<FaqRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM faqs WHERE question ILIKE '%' || $1 || '%' LIMIT 1
            "#,
        )
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// First FAQ with a tag containing the term
    pub async fn find_tag_match(&self, term: &str) -> Result<Option<FaqRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM faqs
            WHERE EXISTS (
                SELECT 1 FROM jsonb_array_elements_text(tags) AS tag
                WHERE tag ILIKE '%' || $1 || '%'
            )
            LIMIT 1
            "#,
        )
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// First FAQ whose answer contains the term
    pub async fn find_answer_contains(&self, term: &str) -> Result<Option<FaqRow>, DbError> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM faqs WHERE answer ILIKE '%' || $1 || '%' LIMIT 1
            "#,
        )
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
