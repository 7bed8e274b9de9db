// src/repositories/content_repository.rs
//
// Content store adapter - the remote catalog boundary.
//
// The store assigns `id` and `created_at`; updates replace the whole entity
// (sections and links included). Nothing here validates or emits events.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::content::{Content, ContentType, DownloadSection, NewContent, Quality};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ContentRepository: Send + Sync {
    /// Every stored item, in store order
    fn fetch_all(&self) -> AppResult<Vec<Content>>;

    fn get_by_id(&self, id: i64) -> AppResult<Option<Content>>;

    /// Persist a new item and return it with its assigned id and timestamp
    fn insert(&self, content: &NewContent) -> AppResult<Content>;

    /// Full replacement; `created_at` is kept from the stored row
    fn update(&self, content: &Content) -> AppResult<Content>;

    fn delete(&self, id: i64) -> AppResult<()>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------

pub struct SqliteContentRepository {
    pool: Arc<ConnectionPool>,
}

const SELECT_COLUMNS: &str = "SELECT id, created_at, content_type, title, description, poster_url,
        release_date, quality, genres, download_sections
 FROM content";

impl SqliteContentRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Content - returns rusqlite::Error for query_map compatibility
    fn row_to_content(row: &Row) -> Result<Content, rusqlite::Error> {
        let created_at_str: Option<String> = row.get("created_at")?;
        let created_at = created_at_str
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let content_type_str: String = row.get("content_type")?;
        let content_type: ContentType = content_type_str
            .parse()
            .map_err(|_| rusqlite::Error::InvalidQuery)?;

        let quality_str: String = row.get("quality")?;
        let quality: Quality = quality_str
            .parse()
            .map_err(|_| rusqlite::Error::InvalidQuery)?;

        let genres_json: String = row.get("genres")?;
        let genres: Vec<String> = serde_json::from_str(&genres_json)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let sections_json: Option<String> = row.get("download_sections")?;
        let download_sections: Option<Vec<DownloadSection>> = sections_json
            .map(|s| {
                serde_json::from_str(&s)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        Ok(Content {
            id: row.get("id")?,
            created_at,
            content_type,
            title: row.get("title")?,
            description: row.get("description")?,
            poster_url: row.get("poster_url")?,
            release_date: row.get("release_date")?,
            quality,
            genres,
            download_sections,
        })
    }

    fn sections_json(sections: &Option<Vec<DownloadSection>>) -> AppResult<Option<String>> {
        sections
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(AppError::from)
    }
}

impl ContentRepository for SqliteContentRepository {
    fn fetch_all(&self) -> AppResult<Vec<Content>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let items = stmt
            .query_map([], Self::row_to_content)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Content>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;
        match stmt.query_row(params![id], Self::row_to_content) {
            Ok(content) => Ok(Some(content)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, content: &NewContent) -> AppResult<Content> {
        let conn = self.pool.get()?;

        let created_at = Utc::now();
        let genres_json = serde_json::to_string(&content.genres)?;
        let sections_json = Self::sections_json(&content.download_sections)?;

        conn.execute(
            "INSERT INTO content (
                created_at, content_type, title, description, poster_url,
                release_date, quality, genres, download_sections
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                created_at.to_rfc3339(),
                content.content_type.as_str(),
                content.title,
                content.description,
                content.poster_url,
                content.release_date,
                content.quality.as_str(),
                genres_json,
                sections_json,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Ok(Content::from_new(id, Some(created_at), content.clone()))
    }

    fn update(&self, content: &Content) -> AppResult<Content> {
        let genres_json = serde_json::to_string(&content.genres)?;
        let sections_json = Self::sections_json(&content.download_sections)?;

        let rows_affected = {
            let conn = self.pool.get()?;
            conn.execute(
                "UPDATE content SET
                    content_type = ?2, title = ?3, description = ?4, poster_url = ?5,
                    release_date = ?6, quality = ?7, genres = ?8, download_sections = ?9
                 WHERE id = ?1",
                params![
                    content.id,
                    content.content_type.as_str(),
                    content.title,
                    content.description,
                    content.poster_url,
                    content.release_date,
                    content.quality.as_str(),
                    genres_json,
                    sections_json,
                ],
            )?
        };

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        self.get_by_id(content.id)?.ok_or(AppError::NotFound)
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM content WHERE id = ?1", params![id])?;
        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------
// In-memory Implementation
// ---------------------------------------------------------------------

/// Process-local store; ids come from a sequence starting at 1
#[derive(Default)]
pub struct InMemoryContentRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    items: Vec<Content>,
    last_id: i64,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing items; the id sequence continues after the largest id
    pub fn with_content(items: Vec<Content>) -> Self {
        let last_id = items.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            state: RwLock::new(MemoryState { items, last_id }),
        }
    }
}

impl ContentRepository for InMemoryContentRepository {
    fn fetch_all(&self) -> AppResult<Vec<Content>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.items.clone())
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Content>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.items.iter().find(|c| c.id == id).cloned())
    }

    fn insert(&self, content: &NewContent) -> AppResult<Content> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.last_id += 1;
        let stored = Content::from_new(state.last_id, Some(Utc::now()), content.clone());
        state.items.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, content: &Content) -> AppResult<Content> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let slot = state
            .items
            .iter_mut()
            .find(|c| c.id == content.id)
            .ok_or(AppError::NotFound)?;

        let created_at = slot.created_at;
        *slot = Content {
            created_at,
            ..content.clone()
        };
        Ok(slot.clone())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let before = state.items.len();
        state.items.retain(|c| c.id != id);
        if state.items.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::content::{DownloadLink, LinkType};

    fn sqlite_repo() -> SqliteContentRepository {
        let pool = Arc::new(create_memory_pool().unwrap());
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        SqliteContentRepository::new(pool)
    }

    fn draft(title: &str) -> NewContent {
        NewContent {
            content_type: ContentType::WebSeries,
            title: title.to_string(),
            description: "Geralt of Rivia".to_string(),
            poster_url: "https://picsum.photos/seed/witcher/500/750".to_string(),
            release_date: "October 30, 2025".to_string(),
            quality: Quality::WebDl,
            genres: vec!["Action".to_string(), "Fantasy".to_string()],
            download_sections: None,
        }
    }

    fn with_sections(mut d: NewContent) -> NewContent {
        let mut vcloud = DownloadLink::with_defaults();
        vcloud.provider = "V-Cloud".to_string();
        vcloud.link_type = LinkType::VCloudResumable;
        vcloud.size = "230MB/E".to_string();
        d.download_sections = Some(vec![DownloadSection {
            title: "Season 04 {Hindi-English} 480p".to_string(),
            links: vec![DownloadLink::with_defaults(), vcloud],
        }]);
        d
    }

    fn exercise_contract(repo: &dyn ContentRepository) {
        let first = repo.insert(&draft("The Witcher")).unwrap();
        let second = repo.insert(&with_sections(draft("Naruto"))).unwrap();
        assert_ne!(first.id, second.id);
        assert!(first.created_at.is_some());

        let all = repo.fetch_all().unwrap();
        assert_eq!(all.len(), 2);

        let fetched = repo.get_by_id(second.id).unwrap().unwrap();
        assert_eq!(fetched.sections().len(), 1);
        assert_eq!(fetched.sections()[0].links[1].link_type, LinkType::VCloudResumable);

        let mut edited = fetched.clone();
        edited.title = "Naruto: Shippuden".to_string();
        edited.download_sections = None;
        edited.created_at = None;
        let updated = repo.update(&edited).unwrap();
        assert_eq!(updated.title, "Naruto: Shippuden");
        assert!(updated.download_sections.is_none());
        assert_eq!(updated.created_at, fetched.created_at);

        repo.delete(first.id).unwrap();
        assert!(repo.get_by_id(first.id).unwrap().is_none());
        assert!(matches!(repo.delete(first.id), Err(AppError::NotFound)));

        let mut ghost = updated;
        ghost.id = 9999;
        assert!(matches!(repo.update(&ghost), Err(AppError::NotFound)));
    }

    #[test]
    fn test_sqlite_contract() {
        exercise_contract(&sqlite_repo());
    }

    #[test]
    fn test_in_memory_contract() {
        exercise_contract(&InMemoryContentRepository::new());
    }

    #[test]
    fn test_empty_sections_survive_round_trip() {
        let repo = sqlite_repo();
        let mut d = draft("Hedda");
        d.download_sections = Some(vec![]);
        let stored = repo.insert(&d).unwrap();
        let fetched = repo.get_by_id(stored.id).unwrap().unwrap();
        assert_eq!(fetched.download_sections, Some(vec![]));
    }

    #[test]
    fn test_in_memory_seed_continues_sequence() {
        let seeded = Content::from_new(41, None, draft("Dune"));
        let repo = InMemoryContentRepository::with_content(vec![seeded]);
        let next = repo.insert(&draft("Interstellar")).unwrap();
        assert_eq!(next.id, 42);
    }

    #[test]
    fn test_sqlite_file_persists_across_pools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        let pool = Arc::new(crate::db::create_connection_pool(&path).unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        let id = SqliteContentRepository::new(pool).insert(&draft("Dune")).unwrap().id;

        let pool = Arc::new(crate::db::create_connection_pool(&path).unwrap());
        let repo = SqliteContentRepository::new(pool);
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().title, "Dune");
    }
}
