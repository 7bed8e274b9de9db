// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod content;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Content Domain
pub use content::{
    validate_content, validate_new_content, Content, ContentType, DownloadLink, DownloadSection,
    LinkType, NewContent, Quality, TitleSegment,
};

// Catalog Domain (derived views)
pub use catalog::{
    CatalogPage, CatalogQuery, CatalogView, ContentDetail, FilterOptions, FilterSelection,
    FilterState, GridStatus, PaginationControl, Paginator, PAGE_SIZE,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
