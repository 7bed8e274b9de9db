// src/config/credential.rs
//
// The TMDB API key. Lives in one settings slot and survives restarts;
// nothing else the operator does is persisted locally.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::AppResult;
use crate::events::{ApiCredentialSaved, EventBus};
use crate::repositories::SettingsRepository;

pub const TMDB_API_KEY_SLOT: &str = "tmdbApiKey";

pub struct ApiCredential {
    settings: Arc<dyn SettingsRepository>,
    event_bus: Arc<EventBus>,
    key: RwLock<Option<String>>,
}

impl ApiCredential {
    /// Read the stored key once at startup
    pub fn load(settings: Arc<dyn SettingsRepository>, event_bus: Arc<EventBus>) -> AppResult<Self> {
        let key = settings
            .get(TMDB_API_KEY_SLOT)?
            .filter(|k| !k.trim().is_empty());

        log::info!(
            "TMDB API key {}",
            if key.is_some() { "loaded" } else { "not set" }
        );

        Ok(Self {
            settings,
            event_bus,
            key: RwLock::new(key),
        })
    }

    pub fn get(&self) -> Option<String> {
        self.key.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_set(&self) -> bool {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist a new key. A blank value clears the slot.
    pub fn save(&self, value: &str) -> AppResult<()> {
        let value = value.trim();

        if value.is_empty() {
            self.settings.remove(TMDB_API_KEY_SLOT)?;
        } else {
            self.settings.set(TMDB_API_KEY_SLOT, value)?;
        }

        let is_set = !value.is_empty();
        *self.key.write().unwrap_or_else(PoisonError::into_inner) =
            is_set.then(|| value.to_string());

        log::info!("TMDB API key {}", if is_set { "saved" } else { "cleared" });
        self.event_bus.emit(ApiCredentialSaved::new(is_set));

        Ok(())
    }
}
