// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod admin_service;
pub mod catalog_service;
pub mod debounce;
pub mod import_service;

// Re-export all services and their types
pub use admin_service::AdminService;

pub use catalog_service::CatalogService;

pub use debounce::{DebounceTicket, Debouncer};

pub use import_service::{
    import_failure_message,
    map_details,
    ImportConfig,
    ImportOutcome,
    ImportService,
    ImportState,
    MISSING_KEY_MESSAGE,
};
