// src/services/import_service.rs
//
// TMDB import workflow: debounced search-as-you-type and one-click import.
//
// CRITICAL RULES:
// - Every query or kind change supersedes the previous lookup
// - A superseded lookup never writes results or errors
// - A rejected key (401) stops automatic searches until the key is saved again
// - Imports go through AdminService so the catalog sees them like any create

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::config::app_config::{DEFAULT_DEBOUNCE_MS, DEFAULT_IMAGE_BASE_URL};
use crate::config::ApiCredential;
use crate::domain::content::extract_year;
use crate::domain::{Content, NewContent, Quality};
use crate::error::{AppError, AppResult};
use crate::events::{ApiCredentialSaved, ContentImported, EventBus};
use crate::integrations::tmdb::client::INVALID_KEY_MESSAGE;
use crate::integrations::tmdb::{MediaDetails, MediaKind, MetadataApi, SearchResult};
use crate::services::admin_service::AdminService;
use crate::services::debounce::Debouncer;

pub const MISSING_KEY_MESSAGE: &str =
    "TMDB API Key is not set. Please add it in the Settings page.";
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750";

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub debounce: Duration,
    pub image_base_url: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

/// What the import screen shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportState {
    pub query: String,
    pub kind: MediaKind,
    pub results: Vec<SearchResult>,
    pub is_searching: bool,
    pub error: Option<String>,
    #[serde(skip)]
    auth_blocked: bool,
}

/// A stored import and the external title it came from
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub content: Content,
    pub source_title: String,
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        format!("Successfully imported \"{}\"!", self.source_title)
    }
}

pub fn import_failure_message(err: &AppError) -> String {
    format!("Import failed: {}", err)
}

pub struct ImportService {
    api: Arc<dyn MetadataApi>,
    credential: Arc<ApiCredential>,
    admin: Arc<AdminService>,
    event_bus: Arc<EventBus>,
    config: ImportConfig,
    state: Arc<Mutex<ImportState>>,
    debouncer: Debouncer,
}

impl ImportService {
    pub fn new(
        api: Arc<dyn MetadataApi>,
        credential: Arc<ApiCredential>,
        admin: Arc<AdminService>,
        event_bus: Arc<EventBus>,
        config: ImportConfig,
    ) -> Self {
        let debouncer = Debouncer::new(config.debounce);
        Self {
            api,
            credential,
            admin,
            event_bus,
            config,
            state: Arc::new(Mutex::new(ImportState::default())),
            debouncer,
        }
    }

    pub fn state(&self) -> ImportState {
        self.lock().clone()
    }

    /// Operator typed in the search box
    pub fn set_query(&self, query: &str) -> ImportState {
        let mut state = self.lock();
        state.query = query.to_string();
        self.trigger_search(&mut state);
        state.clone()
    }

    /// Movie / TV switch; re-runs the current query
    pub fn set_kind(&self, kind: MediaKind) -> ImportState {
        let mut state = self.lock();
        state.kind = kind;
        self.trigger_search(&mut state);
        state.clone()
    }

    /// Re-run the current query, e.g. after the key changed
    pub fn refresh(&self) -> ImportState {
        let mut state = self.lock();
        self.trigger_search(&mut state);
        state.clone()
    }

    /// A saved key lifts the 401 suppression
    pub fn register_event_handlers(&self) {
        let state = Arc::clone(&self.state);
        self.event_bus.subscribe::<ApiCredentialSaved, _>(move |_| {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.auth_blocked = false;
        });
    }

    /// Must run inside a tokio runtime: schedules the debounced lookup.
    /// The caller holds the state lock, so the lookup task cannot observe
    /// a half-updated state.
    fn trigger_search(&self, state: &mut ImportState) {
        self.debouncer.cancel();

        if state.query.trim().is_empty() {
            state.results.clear();
            state.error = None;
            state.is_searching = false;
            return;
        }

        let api_key = match self.credential.get() {
            Some(key) => key,
            None => {
                state.results.clear();
                state.error = Some(MISSING_KEY_MESSAGE.to_string());
                state.is_searching = false;
                return;
            }
        };

        if state.auth_blocked {
            state.results.clear();
            state.error = Some(INVALID_KEY_MESSAGE.to_string());
            state.is_searching = false;
            return;
        }

        state.is_searching = true;

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.state);
        let query = state.query.clone();
        let kind = state.kind;

        self.debouncer.schedule(move |ticket| async move {
            {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                if !ticket.is_current() {
                    return;
                }
                state.error = None;
            }

            let result = api.search(&api_key, kind, &query).await;

            let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if !ticket.is_current() {
                log::debug!("Discarding superseded TMDB search for \"{}\"", query);
                return;
            }

            match result {
                Ok(results) => {
                    log::debug!("TMDB search \"{}\" returned {} results", query, results.len());
                    state.results = results;
                }
                Err(e) => {
                    log::warn!("TMDB search \"{}\" failed: {}", query, e);
                    if e.is_auth_error() {
                        state.auth_blocked = true;
                    }
                    state.error = Some(e.to_string());
                    state.results.clear();
                }
            }
            state.is_searching = false;
        });
    }

    /// Fetch details for a search result and store them as a new item
    pub async fn import(&self, external_id: i64) -> AppResult<ImportOutcome> {
        let api_key = self
            .credential
            .get()
            .ok_or_else(|| AppError::Auth(MISSING_KEY_MESSAGE.to_string()))?;
        let kind = self.lock().kind;

        let details = match self.api.fetch_details(&api_key, kind, external_id).await {
            Ok(details) => details,
            Err(e) => {
                if e.is_auth_error() {
                    self.lock().auth_blocked = true;
                }
                return Err(e);
            }
        };
        let new_content = map_details(
            kind,
            &details,
            &self.config.image_base_url,
            Utc::now().date_naive(),
        );

        let content = self.admin.create(new_content)?;

        log::info!(
            "Imported TMDB {} {} as content {}",
            kind.as_path(),
            external_id,
            content.id
        );
        self.event_bus.emit(ContentImported::new(
            content.id,
            external_id,
            details.title.clone(),
        ));

        {
            let mut state = self.lock();
            self.debouncer.cancel();
            state.query.clear();
            state.results.clear();
            state.error = None;
            state.is_searching = false;
        }

        Ok(ImportOutcome {
            content,
            source_title: details.title,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ImportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the insert payload for an import.
/// `today` supplies the year when the release date is missing.
pub fn map_details(
    kind: MediaKind,
    details: &MediaDetails,
    image_base_url: &str,
    today: NaiveDate,
) -> NewContent {
    let raw_date = details.release_date.as_deref().unwrap_or("");
    let parsed = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").ok();

    let release_date = parsed
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default();
    let year = parsed
        .map(|d| d.year())
        .or_else(|| extract_year(raw_date))
        .unwrap_or_else(|| today.year());

    let poster_url = match details.poster_path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/w500{}", image_base_url.trim_end_matches('/'), path),
        None => POSTER_PLACEHOLDER.to_string(),
    };

    NewContent {
        content_type: kind.content_type(),
        title: format!("Download {} ({})", details.title, year),
        description: details.overview.clone(),
        poster_url,
        release_date,
        quality: Quality::WebDl,
        genres: details.genres.clone(),
        download_sections: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentType;
    use crate::integrations::tmdb::MockMetadataApi;
    use crate::repositories::{
        ContentRepository, InMemoryContentRepository, InMemorySettingsRepository,
    };
    use async_trait::async_trait;

    /// Records every search and answers after an optional delay
    struct RecordingApi {
        calls: Mutex<Vec<(MediaKind, String)>>,
        delay: Duration,
    }

    impl RecordingApi {
        fn new(delay: Duration) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                delay,
            }
        }

        fn calls(&self) -> Vec<(MediaKind, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataApi for RecordingApi {
        async fn search(
            &self,
            _api_key: &str,
            kind: MediaKind,
            query: &str,
        ) -> AppResult<Vec<SearchResult>> {
            self.calls.lock().unwrap().push((kind, query.to_string()));
            tokio::time::sleep(self.delay).await;
            Ok(vec![SearchResult {
                id: query.len() as i64,
                title: query.to_string(),
                poster_path: None,
                release_date: None,
            }])
        }

        async fn fetch_details(
            &self,
            _api_key: &str,
            _kind: MediaKind,
            id: i64,
        ) -> AppResult<MediaDetails> {
            Ok(MediaDetails {
                id,
                title: "Dune".to_string(),
                overview: "Spice.".to_string(),
                poster_path: Some("/d5N.jpg".to_string()),
                release_date: Some("2021-09-15".to_string()),
                genres: vec!["Science Fiction".to_string()],
            })
        }
    }

    struct Fixture {
        service: ImportService,
        credential: Arc<ApiCredential>,
        repo: Arc<InMemoryContentRepository>,
        bus: Arc<EventBus>,
    }

    fn fixture(api: Arc<dyn MetadataApi>, key: Option<&str>) -> Fixture {
        let bus = Arc::new(EventBus::new());
        let settings = Arc::new(InMemorySettingsRepository::new());
        let credential =
            Arc::new(ApiCredential::load(settings, Arc::clone(&bus)).unwrap());
        if let Some(key) = key {
            credential.save(key).unwrap();
        }
        let repo = Arc::new(InMemoryContentRepository::new());
        let admin = Arc::new(AdminService::new(repo.clone(), Arc::clone(&bus)));
        let service = ImportService::new(
            api,
            Arc::clone(&credential),
            admin,
            Arc::clone(&bus),
            ImportConfig::default(),
        );
        service.register_event_handlers();
        Fixture {
            service,
            credential,
            repo,
            bus,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_issues_one_search() {
        let api = Arc::new(RecordingApi::new(Duration::ZERO));
        let fx = fixture(api.clone(), Some("key"));

        fx.service.set_query("dun");
        tokio::time::sleep(Duration::from_millis(200)).await;
        let state = fx.service.set_query("dune");
        assert!(state.is_searching);

        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(api.calls(), vec![(MediaKind::Movie, "dune".to_string())]);
        let state = fx.service.state();
        assert!(!state.is_searching);
        assert_eq!(state.results[0].title, "dune");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_search_never_applies() {
        let api = Arc::new(RecordingApi::new(Duration::from_millis(1000)));
        let fx = fixture(api.clone(), Some("key"));

        fx.service.set_query("alien");
        // window elapses, request is in flight
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(api.calls().len(), 1);

        fx.service.set_query("aliens");
        tokio::time::sleep(Duration::from_millis(3000)).await;

        let state = fx.service.state();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "aliens");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_calling() {
        let api = Arc::new(RecordingApi::new(Duration::ZERO));
        let fx = fixture(api.clone(), Some("key"));

        fx.service.set_query("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;
        let state = fx.service.set_query("   ");

        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert!(!state.is_searching);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_key_blocks_search() {
        let api = Arc::new(RecordingApi::new(Duration::ZERO));
        let fx = fixture(api.clone(), None);

        let state = fx.service.set_query("dune");
        assert_eq!(state.error.as_deref(), Some(MISSING_KEY_MESSAGE));
        assert!(!state.is_searching);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(api.calls().is_empty());

        let err = fx.service.import(438631).await.unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(
            import_failure_message(&err),
            format!("Import failed: {}", MISSING_KEY_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_kind_change_retriggers() {
        let api = Arc::new(RecordingApi::new(Duration::ZERO));
        let fx = fixture(api.clone(), Some("key"));

        fx.service.set_query("dark");
        tokio::time::sleep(Duration::from_millis(600)).await;
        fx.service.set_kind(MediaKind::Tv);
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(
            api.calls(),
            vec![
                (MediaKind::Movie, "dark".to_string()),
                (MediaKind::Tv, "dark".to_string())
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_key_suppresses_until_saved() {
        let mut mock = MockMetadataApi::new();
        mock.expect_search().times(2).returning(|_, _, _| {
            Err(AppError::Auth(
                crate::integrations::tmdb::client::INVALID_KEY_MESSAGE.to_string(),
            ))
        });
        let fx = fixture(Arc::new(mock), Some("bad"));

        fx.service.set_query("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;
        let state = fx.service.state();
        assert!(state.error.as_deref().unwrap().starts_with("Invalid TMDB API Key"));

        // suppressed: no second call
        let state = fx.service.set_query("dune 2");
        assert!(!state.is_searching);
        tokio::time::sleep(Duration::from_millis(600)).await;

        fx.credential.save("new").unwrap();
        fx.service.refresh();
        tokio::time::sleep(Duration::from_millis(600)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_import_blocks_search() {
        let mut mock = MockMetadataApi::new();
        mock.expect_fetch_details()
            .returning(|_, _, _| Err(AppError::Auth(INVALID_KEY_MESSAGE.to_string())));
        mock.expect_search().times(0);
        let fx = fixture(Arc::new(mock), Some("bad"));

        assert!(fx.service.import(1).await.unwrap_err().is_auth_error());

        let state = fx.service.set_query("dune");
        assert!(!state.is_searching);
        assert_eq!(state.error.as_deref(), Some(INVALID_KEY_MESSAGE));
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!fx.service.state().is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_search_shows_key_error() {
        let mut mock = MockMetadataApi::new();
        mock.expect_search()
            .times(1)
            .returning(|_, _, _| Err(AppError::Auth(INVALID_KEY_MESSAGE.to_string())));
        let fx = fixture(Arc::new(mock), Some("bad"));

        fx.service.set_query("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;

        let cleared = fx.service.set_query("");
        assert_eq!(cleared.error, None);

        let state = fx.service.set_query("alien");
        assert_eq!(state.error.as_deref(), Some(INVALID_KEY_MESSAGE));
        assert!(state.results.is_empty());
        assert!(!state.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_message() {
        let mut mock = MockMetadataApi::new();
        mock.expect_search()
            .returning(|_, _, _| Err(AppError::Network("Failed to fetch from TMDB.".to_string())));
        let fx = fixture(Arc::new(mock), Some("key"));

        fx.service.set_query("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;

        let state = fx.service.state();
        assert_eq!(state.error.as_deref(), Some("Failed to fetch from TMDB."));
        assert!(state.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_import_stores_and_resets() {
        let api = Arc::new(RecordingApi::new(Duration::ZERO));
        let fx = fixture(api, Some("key"));

        fx.service.set_query("dune");
        tokio::time::sleep(Duration::from_millis(600)).await;

        let outcome = fx.service.import(438631).await.unwrap();
        assert_eq!(outcome.message(), "Successfully imported \"Dune\"!");
        assert_eq!(outcome.content.title, "Download Dune (2021)");
        assert_eq!(outcome.content.release_date, "September 15, 2021");
        assert_eq!(fx.repo.fetch_all().unwrap().len(), 1);

        let state = fx.service.state();
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());

        let types: Vec<String> = fx
            .bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert!(types.contains(&"ContentCreated".to_string()));
        assert!(types.contains(&"ContentImported".to_string()));
    }

    #[tokio::test]
    async fn test_failed_details_store_nothing() {
        let mut mock = MockMetadataApi::new();
        mock.expect_fetch_details().returning(|_, _, _| {
            Err(AppError::Network("Failed to fetch details from TMDB.".to_string()))
        });
        let fx = fixture(Arc::new(mock), Some("key"));

        let err = fx.service.import(1).await.unwrap_err();
        assert_eq!(
            import_failure_message(&err),
            "Import failed: Failed to fetch details from TMDB."
        );
        assert!(fx.repo.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_map_movie_details() {
        let details = MediaDetails {
            id: 438631,
            title: "Dune".to_string(),
            overview: "Paul Atreides...".to_string(),
            poster_path: Some("/d5N.jpg".to_string()),
            release_date: Some("2021-09-05".to_string()),
            genres: vec!["Science Fiction".to_string(), "Adventure".to_string()],
        };

        let mapped = map_details(
            MediaKind::Movie,
            &details,
            DEFAULT_IMAGE_BASE_URL,
            day(2026, 1, 1),
        );

        assert_eq!(mapped.content_type, ContentType::Movie);
        assert_eq!(mapped.title, "Download Dune (2021)");
        assert_eq!(mapped.release_date, "September 5, 2021");
        assert_eq!(mapped.poster_url, "https://image.tmdb.org/t/p/w500/d5N.jpg");
        assert_eq!(mapped.quality, Quality::WebDl);
        assert_eq!(mapped.genres, vec!["Science Fiction", "Adventure"]);
        assert!(mapped.download_sections.is_none());
    }

    #[test]
    fn test_map_sparse_series_details() {
        let details = MediaDetails {
            id: 9,
            title: "Untitled Pilot".to_string(),
            ..Default::default()
        };

        let mapped = map_details(MediaKind::Tv, &details, DEFAULT_IMAGE_BASE_URL, day(2026, 3, 4));

        assert_eq!(mapped.content_type, ContentType::WebSeries);
        assert_eq!(mapped.title, "Download Untitled Pilot (2026)");
        assert_eq!(mapped.release_date, "");
        assert_eq!(mapped.poster_url, POSTER_PLACEHOLDER);
        assert_eq!(mapped.description, "");
    }
}
