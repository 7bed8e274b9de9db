// src/domain/catalog/filter.rs
//
// Search and filter predicates over the content list.
//
// Pure functions: same list + same query -> same result, no errors.
// Active dimensions combine with AND; an unset dimension matches everything.

use serde::{Deserialize, Serialize};

use crate::domain::content::{Content, Quality};

/// Active filter set; each dimension is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub genre: Option<String>,
    /// Matched as a substring of the raw release date text
    pub year: Option<String>,
    pub quality: Option<Quality>,
}

/// One dimension being set or cleared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum FilterSelection {
    Genre(Option<String>),
    Year(Option<String>),
    Quality(Option<Quality>),
}

impl FilterState {
    /// Replace one dimension, leaving the others untouched
    pub fn apply(&mut self, selection: FilterSelection) {
        match selection {
            FilterSelection::Genre(genre) => self.genre = genre,
            FilterSelection::Year(year) => self.year = year,
            FilterSelection::Quality(quality) => self.quality = quality,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.year.is_none() && self.quality.is_none()
    }
}

/// Search text plus filters: everything the filtered view depends on
/// besides the content list itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub filters: FilterState,
}

impl CatalogQuery {
    pub fn matches(&self, item: &Content) -> bool {
        matches_search(item, &self.search)
            && self
                .filters
                .genre
                .as_deref()
                .map_or(true, |genre| matches_genre(item, genre))
            && self
                .filters
                .year
                .as_deref()
                .map_or(true, |year| matches_year(item, year))
            && self
                .filters
                .quality
                .map_or(true, |quality| item.quality == quality)
    }
}

/// Ordered subsequence of `items` satisfying every active predicate
pub fn filter_content(items: &[Content], query: &CatalogQuery) -> Vec<Content> {
    items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect()
}

/// Case-insensitive substring of the title; empty query matches all
fn matches_search(item: &Content, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(&search.to_lowercase())
}

fn matches_genre(item: &Content, genre: &str) -> bool {
    item.genres.iter().any(|g| g == genre)
}

fn matches_year(item: &Content, year: &str) -> bool {
    item.release_date.contains(year)
}
