// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};
pub use types::DomainEvent;

pub use types::{
    ApiCredentialSaved,
    // Catalog
    CatalogLoaded,
    ContentCreated,
    ContentDeleted,
    // Import / settings
    ContentImported,
    ContentUpdated,
};

/// Shared bus for the whole application
pub fn create_event_bus() -> std::sync::Arc<EventBus> {
    std::sync::Arc::new(EventBus::new())
}
