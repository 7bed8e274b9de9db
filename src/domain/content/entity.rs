// src/domain/content/entity.rs
//
// Catalog entity: a movie or web-series listing with its download links.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Longest description shown before the "Read More" toggle
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Store-assigned identifier, immutable once set
    pub id: i64,

    /// Set once by the store at insert time
    #[serde(rename = "created_at", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub poster_url: String,

    /// Free text, e.g. "March 1, 2024". Not guaranteed to parse.
    pub release_date: String,

    pub quality: Quality,
    pub genres: Vec<String>,

    /// `None` means no downloads were ever added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_sections: Option<Vec<DownloadSection>>,
}

/// Insert payload: a Content before the store has assigned id/created_at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub release_date: String,
    pub quality: Quality,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_sections: Option<Vec<DownloadSection>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "Web Series")]
    WebSeries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "WEB-DL")]
    WebDl,
    #[serde(rename = "Blu-Ray")]
    BluRay,
}

/// A named group of download links, e.g. one resolution tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadSection {
    /// May embed `{...}` highlight segments
    pub title: String,
    pub links: Vec<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub provider: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub size: String,
}

/// Fixed set of download link kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    #[serde(rename = "G-Direct [Instant]")]
    GDirectInstant,
    #[serde(rename = "V-Cloud [Resumable]")]
    VCloudResumable,
    #[serde(rename = "Batch/Zip")]
    BatchZip,
    #[serde(rename = "GDTot [G-Drive]")]
    GdtotGDrive,
}

/// Part of a section title, split on `{...}` groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum TitleSegment {
    Plain(String),
    Highlight(String),
}

// ============================================================================
// CONTENT
// ============================================================================

impl Content {
    /// Build a stored entity from an insert payload
    pub fn from_new(id: i64, created_at: Option<DateTime<Utc>>, new: NewContent) -> Self {
        Self {
            id,
            created_at,
            content_type: new.content_type,
            title: new.title,
            description: new.description,
            poster_url: new.poster_url,
            release_date: new.release_date,
            quality: new.quality,
            genres: new.genres,
            download_sections: new.download_sections,
        }
    }

    /// Best-effort year extracted from the free-text release date
    pub fn release_year(&self) -> Option<i32> {
        extract_year(&self.release_date)
    }

    /// Title as shown in the detail view: text before the first `(`,
    /// with every "Download" removed
    pub fn display_title(&self) -> String {
        let head = self.title.split('(').next().unwrap_or_default();
        head.replace("Download", "").trim().to_string()
    }

    /// Description shortened to the preview limit unless `expanded`
    pub fn description_preview(&self, expanded: bool) -> String {
        if expanded || !self.has_long_description() {
            return self.description.clone();
        }
        let head: String = self
            .description
            .chars()
            .take(DESCRIPTION_PREVIEW_CHARS)
            .collect();
        format!("{}...", head)
    }

    pub fn has_long_description(&self) -> bool {
        self.description.chars().count() > DESCRIPTION_PREVIEW_CHARS
    }

    pub fn sections(&self) -> &[DownloadSection] {
        self.download_sections.as_deref().unwrap_or(&[])
    }
}

/// First four-digit year in `text`, if any
pub fn extract_year(text: &str) -> Option<i32> {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let re = YEAR.get_or_init(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"));
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// ============================================================================
// SECTIONS & LINKS
// ============================================================================

impl DownloadSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            links: Vec::new(),
        }
    }

    /// Split the title into plain and `{...}` highlight parts
    pub fn title_segments(&self) -> Vec<TitleSegment> {
        static BRACED: OnceLock<Regex> = OnceLock::new();
        let re = BRACED.get_or_init(|| Regex::new(r"\{[^}]+\}").expect("brace pattern is valid"));

        let mut segments = Vec::new();
        let mut last = 0;
        for m in re.find_iter(&self.title) {
            if m.start() > last {
                segments.push(TitleSegment::Plain(self.title[last..m.start()].to_string()));
            }
            segments.push(TitleSegment::Highlight(m.as_str().to_string()));
            last = m.end();
        }
        if last < self.title.len() {
            segments.push(TitleSegment::Plain(self.title[last..].to_string()));
        }
        segments
    }
}

impl DownloadLink {
    /// A link carrying the form's convention defaults
    pub fn with_defaults() -> Self {
        Self {
            provider: "G-Direct".to_string(),
            url: String::new(),
            link_type: LinkType::GDirectInstant,
            size: String::new(),
        }
    }
}

impl LinkType {
    pub const ALL: [LinkType; 4] = [
        LinkType::GDirectInstant,
        LinkType::VCloudResumable,
        LinkType::BatchZip,
        LinkType::GdtotGDrive,
    ];

    /// Canonical type for a provider key; unknown providers fall back to G-Direct
    pub fn for_provider(provider: &str) -> Self {
        match provider {
            "G-Direct" => LinkType::GDirectInstant,
            "V-Cloud" => LinkType::VCloudResumable,
            "Batch/Zip" => LinkType::BatchZip,
            "GDTot" => LinkType::GdtotGDrive,
            _ => LinkType::GDirectInstant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::GDirectInstant => "G-Direct [Instant]",
            LinkType::VCloudResumable => "V-Cloud [Resumable]",
            LinkType::BatchZip => "Batch/Zip",
            LinkType::GdtotGDrive => "GDTot [G-Drive]",
        }
    }

    /// Label without the bracketed suffix
    pub fn button_label(&self) -> &'static str {
        let label = self.as_str();
        match label.find('[') {
            Some(idx) => label[..idx].trim_end(),
            None => label,
        }
    }
}

impl std::str::FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown link type: {}", s))
    }
}

// ============================================================================
// ENUM DISPLAY / PARSING
// ============================================================================

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::WebSeries => "Web Series",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Movie" => Ok(ContentType::Movie),
            "Web Series" | "WebSeries" => Ok(ContentType::WebSeries),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

impl Quality {
    pub const ALL: [Quality; 2] = [Quality::WebDl, Quality::BluRay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::WebDl => "WEB-DL",
            Quality::BluRay => "Blu-Ray",
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEB-DL" => Ok(Quality::WebDl),
            "Blu-Ray" => Ok(Quality::BluRay),
            _ => Err(format!("Unknown quality: {}", s)),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
