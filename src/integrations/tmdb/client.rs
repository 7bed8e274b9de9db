// src/integrations/tmdb/client.rs
//
// TMDB REST client
//
// ARCHITECTURE:
// - Thin HTTP wrapper around the v3 search and detail endpoints
// - Maps external payloads to small DTOs (NO domain mutation)
// - Used by ImportService through the MetadataApi trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - The API key is passed per call and never stored or logged here

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::ContentType;
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

pub const INVALID_KEY_MESSAGE: &str = "Invalid TMDB API Key. Please check your key in Settings.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch from TMDB.";
pub const DETAILS_FAILED_MESSAGE: &str = "Failed to fetch details from TMDB.";

const THUMBNAIL_BASE_URL: &str = "https://image.tmdb.org/t/p/w92";
const THUMBNAIL_PLACEHOLDER: &str = "https://via.placeholder.com/92x138";

/// Search kind, also the path segment of the TMDB endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            MediaKind::Movie => ContentType::Movie,
            MediaKind::Tv => ContentType::WebSeries,
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" | "web series" | "webseries" => Ok(MediaKind::Tv),
            other => Err(AppError::Other(format!("Unknown search kind: {}", other))),
        }
    }
}

/// One row of a search response. Movies carry `title`/`release_date`,
/// series carry `name`/`first_air_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, alias = "poster_path")]
    pub poster_path: Option<String>,
    #[serde(default, alias = "release_date", alias = "first_air_date")]
    pub release_date: Option<String>,
}

impl SearchResult {
    pub fn thumbnail_url(&self) -> String {
        match self.poster_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => format!("{}{}", THUMBNAIL_BASE_URL, path),
            None => THUMBNAIL_PLACEHOLDER.to_string(),
        }
    }

    /// Four-digit year of the release date, or "N/A"
    pub fn display_year(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or("N/A")
            .to_string()
    }
}

/// Detail payload reduced to what an import needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsData {
    id: i64,
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default, alias = "first_air_date")]
    release_date: Option<String>,
    #[serde(default)]
    genres: Vec<GenreData>,
}

#[derive(Debug, Deserialize)]
struct GenreData {
    name: String,
}

impl From<DetailsData> for MediaDetails {
    fn from(data: DetailsData) -> Self {
        Self {
            id: data.id,
            title: data.title.unwrap_or_default(),
            overview: data.overview.unwrap_or_default(),
            poster_path: data.poster_path.filter(|p| !p.is_empty()),
            release_date: data.release_date.filter(|d| !d.is_empty()),
            genres: data.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

/// External movie metadata source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn search(
        &self,
        api_key: &str,
        kind: MediaKind,
        query: &str,
    ) -> AppResult<Vec<SearchResult>>;

    async fn fetch_details(&self, api_key: &str, kind: MediaKind, id: i64)
        -> AppResult<MediaDetails>;
}

/// TMDB v3 client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn search_url(&self, kind: MediaKind) -> String {
        format!("{}/search/{}", self.base_url, kind.as_path())
    }

    fn details_url(&self, kind: MediaKind, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, kind.as_path(), id)
    }

    async fn get_json<T>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        failure_message: &str,
    ) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                log::warn!("TMDB request failed: {}", e);
                AppError::Network(failure_message.to_string())
            })?;

        check_status(response.status(), failure_message)?;

        response.json::<T>().await.map_err(|e| {
            log::warn!("Failed to parse TMDB response: {}", e);
            AppError::Network(failure_message.to_string())
        })
    }
}

/// 401 means the key was rejected; any other non-success is a network failure
fn check_status(status: StatusCode, failure_message: &str) -> AppResult<()> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Auth(INVALID_KEY_MESSAGE.to_string()));
    }
    if !status.is_success() {
        log::warn!("TMDB answered with status {}", status);
        return Err(AppError::Network(failure_message.to_string()));
    }
    Ok(())
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn search(
        &self,
        api_key: &str,
        kind: MediaKind,
        query: &str,
    ) -> AppResult<Vec<SearchResult>> {
        log::debug!("TMDB search ({}): {}", kind.as_path(), query);

        let response: SearchResponse = self
            .get_json(
                &self.search_url(kind),
                &[("api_key", api_key), ("query", query)],
                FETCH_FAILED_MESSAGE,
            )
            .await?;

        Ok(response.results)
    }

    async fn fetch_details(
        &self,
        api_key: &str,
        kind: MediaKind,
        id: i64,
    ) -> AppResult<MediaDetails> {
        log::debug!("TMDB details ({}): {}", kind.as_path(), id);

        let data: DetailsData = self
            .get_json(
                &self.details_url(kind, id),
                &[("api_key", api_key), ("append_to_response", "genres")],
                DETAILS_FAILED_MESSAGE,
            )
            .await?;

        Ok(data.into())
    }
}
