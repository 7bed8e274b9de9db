// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::Serialize;

use crate::application::error_handling::Notice;
use crate::application::form::ContentForm;
use crate::application::navigation::View;
use crate::domain::{CatalogPage, CatalogQuery, Content, ContentType, FilterOptions};

// ============================================================================
// CATALOG DTOs
// ============================================================================

/// The public grid plus everything the header needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
    pub page: CatalogPage,
    pub query: CatalogQuery,
    pub filter_options: FilterOptions,
}

// ============================================================================
// ADMIN DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub movie_count: usize,
    pub web_series_count: usize,
    pub total_count: usize,
}

/// One row of an admin list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRowDto {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    pub release_date: String,
    pub content_type: ContentType,
}

impl From<&Content> for ContentRowDto {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id,
            title: content.title.clone(),
            poster_url: content.poster_url.clone(),
            release_date: content.release_date.clone(),
            content_type: content.content_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListDto {
    pub heading: String,
    pub add_label: String,
    pub items: Vec<ContentRowDto>,
}

impl ContentListDto {
    pub fn new(content_type: ContentType, items: &[Content]) -> Self {
        let heading = match content_type {
            ContentType::Movie => "Movies",
            ContentType::WebSeries => "Web Series",
        };
        Self {
            heading: heading.to_string(),
            add_label: format!("Add New {}", content_type),
            items: items.iter().map(ContentRowDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub heading: String,
    pub form: ContentForm,
}

impl From<&ContentForm> for FormDto {
    fn from(form: &ContentForm) -> Self {
        Self {
            heading: form.heading(),
            form: form.clone(),
        }
    }
}

/// Outcome of a save, delete or import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationDto {
    pub notice: Notice,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub api_key: String,
    pub is_set: bool,
}
