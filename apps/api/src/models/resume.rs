use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::content::ResumeContent;
use crate::errors::AppError;
use crate::render::TemplateVariant;

pub const DEFAULT_TITLE: &str = "Untitled Resume";

/// Persisted envelope around one validated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template: TemplateVariant,
    pub content: ResumeContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new resume. Content has already passed validation.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub title: String,
    pub template: TemplateVariant,
    pub content: ResumeContent,
}

/// Shallow patch: `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub template: Option<TemplateVariant>,
    pub content: Option<ResumeContent>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template: String,
    pub content: Json<ResumeContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ResumeRow> for Resume {
    type Error = AppError;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        let template = row
            .template
            .parse::<TemplateVariant>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("resume {}: {e}", row.id)))?;
        Ok(Resume {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            template,
            content: row.content.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
