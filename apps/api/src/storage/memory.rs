use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch};
use crate::storage::ResumeStore;

/// Process-local store for tests and database-less runs. Last write wins.
#[derive(Default)]
pub struct InMemoryResumeStore {
    resumes: RwLock<HashMap<Uuid, Resume>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn create(&self, user_id: Uuid, new: NewResume) -> Result<Resume, AppError> {
        let now = Utc::now();
        let resume = Resume {
            id: Uuid::new_v4(),
            user_id,
            title: new.title,
            template: new.template,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        self.resumes
            .write()
            .await
            .insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.resumes.read().await.get(&id).cloned())
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError> {
        let mut owned: Vec<Resume> = self
            .resumes
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(owned)
    }

    async fn update(&self, id: Uuid, patch: ResumePatch) -> Result<Option<Resume>, AppError> {
        let mut resumes = self.resumes.write().await;
        let Some(resume) = resumes.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            resume.title = title;
        }
        if let Some(template) = patch.template {
            resume.template = template;
        }
        if let Some(content) = patch.content {
            resume.content = content;
        }
        // Strictly after the previous stamp, even within one clock tick.
        let now = Utc::now();
        resume.updated_at = if now > resume.updated_at {
            now
        } else {
            resume.updated_at + chrono::Duration::microseconds(1)
        };
        Ok(Some(resume.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.resumes.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ResumeContent;
    use crate::render::TemplateVariant;

    fn new_resume(title: &str) -> NewResume {
        NewResume {
            title: title.to_string(),
            template: TemplateVariant::Classic,
            content: ResumeContent::default(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_timestamps() {
        let store = InMemoryResumeStore::new();
        let user = Uuid::new_v4();
        let created = store.create(user, new_resume("A")).await.unwrap();
        assert_eq!(created.user_id, user);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_most_recent_first() {
        let store = InMemoryResumeStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let first = store.create(user, new_resume("first")).await.unwrap();
        store.create(user, new_resume("second")).await.unwrap();
        store.create(other, new_resume("theirs")).await.unwrap();

        // Touching `first` moves it to the front.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.update(first.id, ResumePatch::default()).await.unwrap();

        let titles: Vec<String> = store
            .list(user)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_update_is_shallow_and_bumps_timestamp() {
        let store = InMemoryResumeStore::new();
        let created = store.create(Uuid::new_v4(), new_resume("Draft")).await.unwrap();

        let updated = store
            .update(
                created.id,
                ResumePatch {
                    template: Some(TemplateVariant::Sidebar),
                    ..ResumePatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Draft");
        assert_eq!(updated.template, TemplateVariant::Sidebar);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = InMemoryResumeStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.get(id).await.unwrap(), None);
        assert_eq!(store.update(id, ResumePatch::default()).await.unwrap(), None);
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes() {
        let store = InMemoryResumeStore::new();
        let created = store.create(Uuid::new_v4(), new_resume("A")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
    }
}
