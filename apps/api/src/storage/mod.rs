//! Persistence Gateway — owner-scoped storage of resume envelopes.
//!
//! Stores hold no document-shape logic and do no authorization: callers
//! validate content before `create`/`update` and check ownership before
//! reading, updating or deleting by id.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch};

mod memory;
mod postgres;

pub use memory::InMemoryResumeStore;
pub use postgres::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Assigns identity and timestamps.
    async fn create(&self, user_id: Uuid, new: NewResume) -> Result<Resume, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    /// The owner's resumes, most recently updated first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError>;

    /// Applies the patch and bumps `updated_at`. `None` when the id is unknown.
    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<Resume>, AppError>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
