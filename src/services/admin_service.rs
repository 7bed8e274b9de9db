// src/services/admin_service.rs
//
// Admin mutations against the content store.
//
// CRITICAL RULES:
// - The store is the source of truth; local state changes only through
//   the events emitted after the store confirmed a mutation
// - A failed mutation emits nothing
// - Deletion requires an explicit confirmation

use std::sync::Arc;

use crate::domain::{validate_content, validate_new_content, Content, NewContent};
use crate::error::AppResult;
use crate::events::{ContentCreated, ContentDeleted, ContentUpdated, EventBus};
use crate::repositories::ContentRepository;

pub struct AdminService {
    content_repo: Arc<dyn ContentRepository>,
    event_bus: Arc<EventBus>,
}

impl AdminService {
    pub fn new(content_repo: Arc<dyn ContentRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            content_repo,
            event_bus,
        }
    }

    /// Insert a new item; the store assigns id and created_at
    pub fn create(&self, new_content: NewContent) -> AppResult<Content> {
        validate_new_content(&new_content)?;

        let created = self.content_repo.insert(&new_content).map_err(|e| {
            log::error!("Failed to add content \"{}\": {}", new_content.title, e);
            e
        })?;

        log::info!("Content {} created: {}", created.id, created.title);
        self.event_bus.emit(ContentCreated::new(created.clone()));

        Ok(created)
    }

    /// Full replacement of an existing item
    pub fn update(&self, content: Content) -> AppResult<Content> {
        validate_content(&content)?;

        let updated = self.content_repo.update(&content).map_err(|e| {
            log::error!("Failed to update content {}: {}", content.id, e);
            e
        })?;

        log::info!("Content {} updated", updated.id);
        self.event_bus.emit(ContentUpdated::new(updated.clone()));

        Ok(updated)
    }

    /// Returns false, touching nothing, when the operator did not confirm
    pub fn delete(&self, id: i64, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            log::debug!("Delete of content {} not confirmed", id);
            return Ok(false);
        }

        self.content_repo.delete(id).map_err(|e| {
            log::error!("Failed to delete content {}: {}", id, e);
            e
        })?;

        log::info!("Content {} deleted", id);
        self.event_bus.emit(ContentDeleted::new(id));

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentType, Quality};
    use crate::error::AppError;
    use crate::repositories::{InMemoryContentRepository, MockContentRepository};

    fn new_movie(title: &str) -> NewContent {
        NewContent {
            content_type: ContentType::Movie,
            title: title.to_string(),
            description: "desc".to_string(),
            poster_url: "https://img/p.jpg".to_string(),
            release_date: "March 1, 2024".to_string(),
            quality: Quality::WebDl,
            genres: vec!["Drama".to_string()],
            download_sections: None,
        }
    }

    fn service() -> (AdminService, Arc<InMemoryContentRepository>, Arc<EventBus>) {
        let repo = Arc::new(InMemoryContentRepository::new());
        let bus = Arc::new(EventBus::new());
        let service = AdminService::new(repo.clone(), Arc::clone(&bus));
        (service, repo, bus)
    }

    #[test]
    fn test_create_assigns_id_and_emits() {
        let (service, repo, bus) = service();

        let created = service.create(new_movie("Dune")).unwrap();
        assert!(created.id > 0);
        assert!(created.created_at.is_some());
        assert_eq!(repo.fetch_all().unwrap().len(), 1);

        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "ContentCreated");
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let (service, repo, bus) = service();

        let err = service.create(new_movie("   ")).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
        assert!(repo.fetch_all().unwrap().is_empty());
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_update_replaces_and_emits() {
        let (service, _repo, bus) = service();
        let created = service.create(new_movie("Dune")).unwrap();

        let mut edited = created.clone();
        edited.title = "Dune: Part One".to_string();
        let updated = service.update(edited).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Dune: Part One");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(bus.get_event_log()[1].event_type, "ContentUpdated");
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (service, repo, bus) = service();
        let created = service.create(new_movie("Dune")).unwrap();
        bus.clear_event_log();

        assert!(!service.delete(created.id, false).unwrap());
        assert_eq!(repo.fetch_all().unwrap().len(), 1);
        assert!(bus.get_event_log().is_empty());

        assert!(service.delete(created.id, true).unwrap());
        assert!(repo.fetch_all().unwrap().is_empty());
        assert_eq!(bus.get_event_log()[0].event_type, "ContentDeleted");
    }

    #[test]
    fn test_store_failure_emits_nothing() {
        let mut mock = MockContentRepository::new();
        mock.expect_insert()
            .returning(|_| Err(AppError::Store("connection reset".to_string())));
        mock.expect_delete()
            .returning(|_| Err(AppError::Store("connection reset".to_string())));

        let bus = Arc::new(EventBus::new());
        let service = AdminService::new(Arc::new(mock), Arc::clone(&bus));

        assert!(service.create(new_movie("Dune")).unwrap_err().is_store_error());
        assert!(service.delete(4, true).unwrap_err().is_store_error());
        assert!(bus.get_event_log().is_empty());
    }
}
