// src/config/mod.rs
//
// Runtime configuration and the persisted API credential

pub mod app_config;
pub mod credential;

pub use app_config::AppConfig;
pub use credential::{ApiCredential, TMDB_API_KEY_SLOT};
