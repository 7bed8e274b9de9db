// src/lib.rs
// MovieFlix - catalog browsing and administration for downloadable media
//
// Architecture:
// - Domain-centric: filtering, pagination and form rules live in the domain
// - Event-driven: confirmed store mutations reach the catalog through events
// - Explicit: the catalog loads once at startup; nothing refreshes behind your back
// - Application Layer: console boundary (commands, DTOs, shell)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_content,
    validate_new_content,
    // Catalog
    CatalogPage,
    CatalogQuery,
    CatalogView,
    // Content
    Content,
    ContentDetail,
    ContentType,
    DownloadLink,
    DownloadSection,
    FilterOptions,
    FilterSelection,
    FilterState,
    LinkType,
    NewContent,
    Paginator,
    Quality,
    PAGE_SIZE,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, ApiCredentialSaved, CatalogLoaded, ContentCreated, ContentDeleted,
    ContentImported, ContentUpdated, DomainEvent, EventBus, EventLogEntry,
};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use repositories::{
    ContentRepository, InMemoryContentRepository, InMemorySettingsRepository,
    SettingsRepository, SqliteContentRepository, SqliteSettingsRepository,
};

// ============================================================================
// PUBLIC API - Services & Configuration
// ============================================================================

pub use config::{ApiCredential, AppConfig};

pub use services::{AdminService, CatalogService, Debouncer, ImportService, ImportState};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, Shell};

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{MediaKind, MetadataApi, TmdbClient};
