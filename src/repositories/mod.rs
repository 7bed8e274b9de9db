// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod content_repository;
pub mod settings_repository;

pub use content_repository::{
    ContentRepository, InMemoryContentRepository, SqliteContentRepository,
};
pub use settings_repository::{
    InMemorySettingsRepository, SettingsRepository, SqliteSettingsRepository,
};

#[cfg(test)]
pub use content_repository::MockContentRepository;
