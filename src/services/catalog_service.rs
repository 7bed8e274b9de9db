// src/services/catalog_service.rs
//
// Store-backed catalog: owns the single in-memory content list that the
// browsing grid and the admin lists read.
//
// CRITICAL RULES:
// - Reads go through CatalogView; nothing here filters or paginates itself
// - Admin mutations reach this list only through confirmed-store events
// - A failed load leaves an empty, interactive catalog

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    CatalogPage, CatalogQuery, CatalogView, Content, ContentDetail, ContentType, FilterOptions,
    FilterSelection,
};
use crate::error::AppResult;
use crate::events::{CatalogLoaded, ContentCreated, ContentDeleted, ContentUpdated, EventBus};
use crate::repositories::ContentRepository;

pub struct CatalogService {
    content_repo: Arc<dyn ContentRepository>,
    event_bus: Arc<EventBus>,
    view: Arc<RwLock<CatalogView>>,
}

impl CatalogService {
    pub fn new(content_repo: Arc<dyn ContentRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            content_repo,
            event_bus,
            view: Arc::new(RwLock::new(CatalogView::new())),
        }
    }

    /// Fetch everything from the store, newest first
    pub fn load(&self) -> AppResult<CatalogPage> {
        match self.content_repo.fetch_all() {
            Ok(items) => {
                let count = items.len();
                self.write().load(items);
                log::info!("Catalog loaded with {} items", count);
                self.event_bus.emit(CatalogLoaded::new(count));
                Ok(self.page())
            }
            Err(e) => {
                log::error!("Error fetching content: {}", e);
                self.write().fail_load();
                Err(e)
            }
        }
    }

    pub fn page(&self) -> CatalogPage {
        self.read().page()
    }

    pub fn set_search(&self, search: &str) -> CatalogPage {
        let mut view = self.write();
        view.set_search(search);
        view.page()
    }

    pub fn set_filter(&self, selection: FilterSelection) -> CatalogPage {
        let mut view = self.write();
        view.set_filter(selection);
        view.page()
    }

    pub fn clear_filters(&self) -> CatalogPage {
        let mut view = self.write();
        view.clear_filters();
        view.page()
    }

    pub fn next_page(&self) -> CatalogPage {
        let mut view = self.write();
        view.next_page();
        view.page()
    }

    pub fn previous_page(&self) -> CatalogPage {
        let mut view = self.write();
        view.previous_page();
        view.page()
    }

    pub fn query(&self) -> CatalogQuery {
        self.read().query().clone()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.read().filter_options()
    }

    pub fn select(&self, id: i64) -> Option<ContentDetail> {
        self.write().select(id)
    }

    pub fn close_detail(&self) {
        self.write().close_detail();
    }

    pub fn toggle_description(&self) -> Option<ContentDetail> {
        self.write().toggle_description()
    }

    pub fn detail(&self) -> Option<ContentDetail> {
        self.read().detail()
    }

    pub fn find(&self, id: i64) -> Option<Content> {
        self.read().find(id).cloned()
    }

    pub fn by_type(&self, content_type: ContentType) -> Vec<Content> {
        self.read().by_type(content_type)
    }

    pub fn count_by_type(&self, content_type: ContentType) -> usize {
        self.read().count_by_type(content_type)
    }

    pub fn total_count(&self) -> usize {
        self.read().content().len()
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    /// Keep the in-memory list in step with confirmed store mutations
    pub fn register_event_handlers(&self) {
        let view = Arc::clone(&self.view);
        self.event_bus.subscribe::<ContentCreated, _>(move |event| {
            write_view(&view).prepend(event.content.clone());
        });

        let view = Arc::clone(&self.view);
        self.event_bus.subscribe::<ContentUpdated, _>(move |event| {
            if !write_view(&view).replace(event.content.clone()) {
                log::warn!("Updated content {} is not in the catalog", event.content.id);
            }
        });

        let view = Arc::clone(&self.view);
        self.event_bus.subscribe::<ContentDeleted, _>(move |event| {
            if !write_view(&view).remove(event.content_id) {
                log::warn!("Deleted content {} is not in the catalog", event.content_id);
            }
        });
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogView> {
        self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogView> {
        write_view(&self.view)
    }
}

fn write_view(view: &RwLock<CatalogView>) -> RwLockWriteGuard<'_, CatalogView> {
    view.write().unwrap_or_else(PoisonError::into_inner)
}
