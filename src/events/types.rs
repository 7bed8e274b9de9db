// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are emitted only after the store confirmed the change
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Content;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($ty:ident) => {
        impl DomainEvent for $ty {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($ty)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted after the initial fetch from the content store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_count: usize,
}

impl CatalogLoaded {
    pub fn new(item_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_count,
        }
    }
}

impl_domain_event!(CatalogLoaded);

/// Emitted when the store confirmed an insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content: Content,
}

impl ContentCreated {
    pub fn new(content: Content) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content,
        }
    }
}

impl_domain_event!(ContentCreated);

/// Emitted when the store confirmed a full replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content: Content,
}

impl ContentUpdated {
    pub fn new(content: Content) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content,
        }
    }
}

impl_domain_event!(ContentUpdated);

/// Emitted when the store confirmed a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: i64,
}

impl ContentDeleted {
    pub fn new(content_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
        }
    }
}

impl_domain_event!(ContentDeleted);

// ============================================================================
// IMPORT / SETTINGS EVENTS
// ============================================================================

/// Emitted after an external-metadata import was stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentImported {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_id: i64,
    pub external_id: i64,
    pub source_title: String,
}

impl ContentImported {
    pub fn new(content_id: i64, external_id: i64, source_title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_id,
            external_id,
            source_title,
        }
    }
}

impl_domain_event!(ContentImported);

/// Emitted when the external API credential was saved or cleared.
/// Never carries the credential itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCredentialSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub is_set: bool,
}

impl ApiCredentialSaved {
    pub fn new(is_set: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            is_set,
        }
    }
}

impl_domain_event!(ApiCredentialSaved);
