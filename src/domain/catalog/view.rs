// src/domain/catalog/view.rs
//
// Catalog view state: content list -> filtered view -> current page.
//
// INVARIANTS:
// - `filtered` is always `filter_content(content, query)`
// - any change to content, search text or filters resets to page 1
// - page navigation never touches `filtered`

use serde::{Deserialize, Serialize};

use super::filter::{filter_content, CatalogQuery, FilterSelection};
use super::options::FilterOptions;
use super::pagination::{PaginationControl, Paginator};
use crate::domain::content::{Content, ContentType, LinkType, Quality, TitleSegment};

pub const EMPTY_GRID_MESSAGE: &str = "No content found. Try a different search.";
pub const LOADING_MESSAGE: &str = "Loading content...";

#[derive(Debug, Clone)]
pub struct CatalogView {
    content: Vec<Content>,
    query: CatalogQuery,
    filtered: Vec<Content>,
    paginator: Paginator,
    loading: bool,
    selected: Option<i64>,
    description_expanded: bool,
}

// ============================================================================
// RENDER MODELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStatus {
    Loading,
    Empty,
    Ready,
}

/// One grid tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCard {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub quality: Quality,
}

/// What the grid area shows for the current state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub status: GridStatus,
    pub message: Option<String>,
    pub items: Vec<ContentCard>,
    pub total_results: usize,
    pub pagination: Option<PaginationControl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkButton {
    pub provider: String,
    pub url: String,
    pub link_type: LinkType,
    pub label: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub title: String,
    pub segments: Vec<TitleSegment>,
    pub links: Vec<LinkButton>,
}

/// Detail modal contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    pub id: i64,
    pub title: String,
    pub display_title: String,
    pub poster_url: String,
    pub release_date: String,
    pub quality: Quality,
    pub genres: Vec<String>,
    pub description: String,
    pub description_expandable: bool,
    pub description_expanded: bool,
    /// `None` when the item never had download sections
    pub sections: Option<Vec<SectionView>>,
}

impl ContentDetail {
    pub fn from_content(content: &Content, expanded: bool) -> Self {
        Self {
            id: content.id,
            title: content.title.clone(),
            display_title: content.display_title(),
            poster_url: content.poster_url.clone(),
            release_date: content.release_date.clone(),
            quality: content.quality,
            genres: content.genres.clone(),
            description: content.description_preview(expanded),
            description_expandable: content.has_long_description(),
            description_expanded: expanded,
            sections: content.download_sections.as_ref().map(|sections| {
                sections
                    .iter()
                    .map(|section| SectionView {
                        title: section.title.clone(),
                        segments: section.title_segments(),
                        links: section
                            .links
                            .iter()
                            .map(|link| LinkButton {
                                provider: link.provider.clone(),
                                url: link.url.clone(),
                                link_type: link.link_type,
                                label: link.link_type.button_label().to_string(),
                                size: link.size.clone(),
                            })
                            .collect(),
                    })
                    .collect()
            }),
        }
    }
}

// ============================================================================
// STATE TRANSITIONS
// ============================================================================

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    /// Empty catalog, waiting for its first load
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            query: CatalogQuery::default(),
            filtered: Vec::new(),
            paginator: Paginator::new(0),
            loading: true,
            selected: None,
            description_expanded: false,
        }
    }

    /// Replace the list with a fresh load, newest first by creation time.
    /// Items without a timestamp sort last; ties keep store order.
    pub fn load(&mut self, mut items: Vec<Content>) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.content = items;
        self.loading = false;
        self.refresh();
    }

    /// Initial load failed: leave the catalog empty but interactive
    pub fn fail_load(&mut self) {
        self.content.clear();
        self.loading = false;
        self.refresh();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.query.search != search {
            self.query.search = search;
            self.refresh();
        }
    }

    pub fn set_filter(&mut self, selection: FilterSelection) {
        let before = self.query.filters.clone();
        self.query.filters.apply(selection);
        if self.query.filters != before {
            self.refresh();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.query.filters.is_empty() {
            self.query.filters = Default::default();
            self.refresh();
        }
    }

    /// Newly created item goes to the front; no re-sort
    pub fn prepend(&mut self, item: Content) {
        self.content.insert(0, item);
        self.refresh();
    }

    /// Full replacement by id. Returns false if the id is unknown.
    pub fn replace(&mut self, item: Content) -> bool {
        match self.content.iter_mut().find(|c| c.id == item.id) {
            Some(slot) => {
                *slot = item;
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// Returns false if the id is unknown
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.content.len();
        self.content.retain(|c| c.id != id);
        if self.content.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.close_detail();
        }
        self.refresh();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    /// Open the detail view; the description starts collapsed
    pub fn select(&mut self, id: i64) -> Option<ContentDetail> {
        let found = self.content.iter().any(|c| c.id == id);
        if found {
            self.selected = Some(id);
            self.description_expanded = false;
        }
        self.detail()
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
        self.description_expanded = false;
    }

    pub fn toggle_description(&mut self) -> Option<ContentDetail> {
        if self.selected.is_some() {
            self.description_expanded = !self.description_expanded;
        }
        self.detail()
    }

    fn refresh(&mut self) {
        self.filtered = filter_content(&self.content, &self.query);
        self.paginator.reset(self.filtered.len());
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    pub fn filtered(&self) -> &[Content] {
        &self.filtered
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    pub fn find(&self, id: i64) -> Option<&Content> {
        self.content.iter().find(|c| c.id == id)
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_content(&self.content)
    }

    pub fn by_type(&self, content_type: ContentType) -> Vec<Content> {
        self.content
            .iter()
            .filter(|c| c.content_type == content_type)
            .cloned()
            .collect()
    }

    pub fn count_by_type(&self, content_type: ContentType) -> usize {
        self.content
            .iter()
            .filter(|c| c.content_type == content_type)
            .count()
    }

    pub fn detail(&self) -> Option<ContentDetail> {
        let id = self.selected?;
        self.find(id)
            .map(|c| ContentDetail::from_content(c, self.description_expanded))
    }

    pub fn page(&self) -> CatalogPage {
        if self.loading {
            return CatalogPage {
                status: GridStatus::Loading,
                message: Some(LOADING_MESSAGE.to_string()),
                items: Vec::new(),
                total_results: 0,
                pagination: None,
            };
        }

        let items: Vec<ContentCard> = self
            .paginator
            .slice(&self.filtered)
            .iter()
            .map(|c| ContentCard {
                id: c.id,
                title: c.title.clone(),
                poster_url: c.poster_url.clone(),
                quality: c.quality,
            })
            .collect();

        let (status, message) = if items.is_empty() {
            (GridStatus::Empty, Some(EMPTY_GRID_MESSAGE.to_string()))
        } else {
            (GridStatus::Ready, None)
        };

        CatalogPage {
            status,
            message,
            items,
            total_results: self.filtered.len(),
            pagination: self.paginator.control(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{DownloadLink, DownloadSection, NewContent};
    use chrono::{Duration, TimeZone, Utc};

    fn item(id: i64, title: &str, minutes: i64) -> Content {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Content::from_new(
            id,
            Some(base + Duration::minutes(minutes)),
            NewContent {
                content_type: if id % 2 == 0 { ContentType::WebSeries } else { ContentType::Movie },
                title: title.to_string(),
                description: "desc".to_string(),
                poster_url: format!("https://img/{}", id),
                release_date: "October 29, 2024".to_string(),
                quality: Quality::WebDl,
                genres: vec!["Drama".to_string()],
                download_sections: None,
            },
        )
    }

    fn loaded(n: i64) -> CatalogView {
        let mut view = CatalogView::new();
        view.load((1..=n).map(|i| item(i, &format!("Title {}", i), i)).collect());
        view
    }

    #[test]
    fn test_starts_loading() {
        let view = CatalogView::new();
        assert_eq!(view.page().status, GridStatus::Loading);
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let view = loaded(3);
        let ids: Vec<i64> = view.content().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_missing_timestamps_sort_last() {
        let mut undated = item(9, "Undated", 0);
        undated.created_at = None;
        let mut view = CatalogView::new();
        view.load(vec![undated, item(1, "a", 1), item(2, "b", 2)]);
        let ids: Vec<i64> = view.content().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 9]);
    }

    #[test]
    fn test_thirteen_items_paginate() {
        let mut view = loaded(13);
        let page = view.page();
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.pagination.as_ref().unwrap().total_pages, 2);

        assert!(view.next_page());
        let page = view.page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);

        assert!(!view.next_page());
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let view = loaded(0);
        let page = view.page();
        assert_eq!(page.status, GridStatus::Empty);
        assert_eq!(page.message.as_deref(), Some(EMPTY_GRID_MESSAGE));
        assert!(page.pagination.is_none());
    }

    #[test]
    fn test_search_resets_page() {
        let mut view = loaded(30);
        view.next_page();
        view.next_page();
        assert_eq!(view.current_page(), 3);

        view.set_search("title 1");
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = loaded(30);
        view.next_page();
        view.set_filter(FilterSelection::Quality(Some(Quality::WebDl)));
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_content_change_resets_page() {
        let mut view = loaded(30);
        view.next_page();
        view.prepend(item(99, "Fresh", 100));
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.content()[0].id, 99);
    }

    #[test]
    fn test_paging_does_not_change_filtered() {
        let mut view = loaded(30);
        view.set_search("1");
        let before: Vec<i64> = view.filtered().iter().map(|c| c.id).collect();
        view.next_page();
        view.previous_page();
        let after: Vec<i64> = view.filtered().iter().map(|c| c.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut view = loaded(3);
        let mut updated = view.find(2).cloned().unwrap();
        updated.title = "Renamed".to_string();
        assert!(view.replace(updated));
        assert_eq!(view.find(2).unwrap().title, "Renamed");

        assert!(view.remove(2));
        assert!(view.find(2).is_none());
        assert!(!view.remove(2));
    }

    #[test]
    fn test_prepend_keeps_insertion_order() {
        let mut view = loaded(2);
        let mut older = item(10, "Clock skew", 0);
        older.created_at = None;
        view.prepend(older);
        view.prepend(item(11, "Second add", 500));
        let ids: Vec<i64> = view.content().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 10, 2, 1]);
    }

    #[test]
    fn test_detail_view() {
        let mut view = CatalogView::new();
        let mut c = item(1, "Download Dune: Part Two (2024) Blu-Ray", 0);
        c.description = "x".repeat(300);
        c.download_sections = Some(vec![DownloadSection {
            title: "1080p {Hindi-English}".to_string(),
            links: vec![DownloadLink::with_defaults()],
        }]);
        view.load(vec![c]);

        let detail = view.select(1).unwrap();
        assert_eq!(detail.display_title, "Dune: Part Two");
        assert!(detail.description_expandable);
        assert!(detail.description.ends_with("..."));
        let sections = detail.sections.unwrap();
        assert_eq!(sections[0].links[0].label, "G-Direct");
        assert_eq!(sections[0].segments.len(), 2);

        let detail = view.toggle_description().unwrap();
        assert_eq!(detail.description.len(), 300);

        view.close_detail();
        assert!(view.detail().is_none());
    }

    #[test]
    fn test_select_unknown_id() {
        let mut view = loaded(2);
        assert!(view.select(42).is_none());
    }

    #[test]
    fn test_type_partition() {
        let view = loaded(5);
        assert_eq!(view.count_by_type(ContentType::Movie), 3);
        assert_eq!(view.count_by_type(ContentType::WebSeries), 2);
        assert_eq!(view.by_type(ContentType::WebSeries).len(), 2);
    }
}
