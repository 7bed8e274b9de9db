pub mod client;

pub use client::{MediaDetails, MediaKind, MetadataApi, SearchResult, TmdbClient};

#[cfg(test)]
pub use client::MockMetadataApi;
