use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch, ResumeRow};
use crate::storage::ResumeStore;

const COLUMNS: &str = "id, user_id, title, template, content, created_at, updated_at";

/// Postgres-backed store. Content lives in a JSONB column.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, user_id: Uuid, new: NewResume) -> Result<Resume, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            INSERT INTO resumes (id, user_id, title, template, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&new.title)
        .bind(new.template.as_str())
        .bind(Json(&new.content))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        sqlx::query_as::<_, ResumeRow>(&format!("SELECT {COLUMNS} FROM resumes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Resume::try_from)
            .transpose()
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError> {
        sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM resumes
            WHERE user_id = $1
            ORDER BY updated_at DESC, created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Resume::try_from)
        .collect()
    }

    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<Resume>, AppError> {
        sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            UPDATE resumes SET
                title = COALESCE($2, title),
                template = COALESCE($3, template),
                content = COALESCE($4, content),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.template.map(|t| t.as_str()))
        .bind(patch.content.map(Json))
        .fetch_optional(&self.pool)
        .await?
        .map(Resume::try_from)
        .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
