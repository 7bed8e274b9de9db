// src/domain/catalog/options.rs
//
// Filter options offered in the header dropdowns, derived from the catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::content::{Content, Quality};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Deduplicated, ascending
    pub genres: Vec<String>,
    /// Deduplicated, numerically descending
    pub years: Vec<String>,
    pub qualities: Vec<Quality>,
}

impl FilterOptions {
    pub fn from_content(items: &[Content]) -> Self {
        Self {
            genres: all_genres(items),
            years: all_years(items),
            qualities: Quality::ALL.to_vec(),
        }
    }
}

pub fn all_genres(items: &[Content]) -> Vec<String> {
    items
        .iter()
        .flat_map(|c| c.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Items whose release date carries no recognisable year contribute nothing
pub fn all_years(items: &[Content]) -> Vec<String> {
    items
        .iter()
        .filter_map(Content::release_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(|y| y.to_string())
        .collect()
}
