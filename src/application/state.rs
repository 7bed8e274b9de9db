// src/application/state.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::form::ContentForm;
use crate::application::navigation::Navigator;
use crate::config::{ApiCredential, AppConfig};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::MetadataApi;
use crate::repositories::{ContentRepository, SettingsRepository};
use crate::services::{AdminService, CatalogService, ImportConfig, ImportService};

/// Application state shared by every command.
/// Services are Arc-wrapped; screen state sits behind mutexes.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub credential: Arc<ApiCredential>,
    pub catalog_service: Arc<CatalogService>,
    pub admin_service: Arc<AdminService>,
    pub import_service: Arc<ImportService>,
    navigator: Mutex<Navigator>,
    form: Mutex<Option<ContentForm>>,
}

impl AppState {
    /// Wire services and event handlers over the given adapters.
    /// Does not load the catalog.
    pub fn build(
        config: AppConfig,
        content_repo: Arc<dyn ContentRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        metadata_api: Arc<dyn MetadataApi>,
    ) -> AppResult<Self> {
        let event_bus = create_event_bus();

        let credential = Arc::new(ApiCredential::load(settings_repo, Arc::clone(&event_bus))?);

        let catalog_service = Arc::new(CatalogService::new(
            Arc::clone(&content_repo),
            Arc::clone(&event_bus),
        ));
        let admin_service = Arc::new(AdminService::new(content_repo, Arc::clone(&event_bus)));
        let import_service = Arc::new(ImportService::new(
            metadata_api,
            Arc::clone(&credential),
            Arc::clone(&admin_service),
            Arc::clone(&event_bus),
            ImportConfig {
                debounce: config.debounce,
                image_base_url: config.tmdb_image_base_url.clone(),
            },
        ));

        catalog_service.register_event_handlers();
        import_service.register_event_handlers();

        Ok(Self {
            config,
            event_bus,
            credential,
            catalog_service,
            admin_service,
            import_service,
            navigator: Mutex::new(Navigator::new()),
            form: Mutex::new(None),
        })
    }

    pub fn navigator(&self) -> MutexGuard<'_, Navigator> {
        self.navigator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form(&self) -> MutexGuard<'_, Option<ContentForm>> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
