// src/application/form.rs
//
// Add/edit form for a catalog item, including the nested
// sections -> links editor.
//
// RULES:
// - Index-based edits report out-of-range indices as NotFound
// - Choosing a provider also picks its canonical link type;
//   choosing a type never touches the provider
// - Genres are edited as comma-separated text and split on submit

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Content, ContentType, DomainError, DomainResult, DownloadLink, DownloadSection, LinkType,
    NewContent, Quality,
};

/// Scalar form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ContentType,
    Title,
    PosterUrl,
    ReleaseDate,
    Quality,
    Genres,
    Description,
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" | "contentType" => Ok(FormField::ContentType),
            "title" => Ok(FormField::Title),
            "poster" | "posterUrl" => Ok(FormField::PosterUrl),
            "release" | "releaseDate" => Ok(FormField::ReleaseDate),
            "quality" => Ok(FormField::Quality),
            "genres" => Ok(FormField::Genres),
            "description" => Ok(FormField::Description),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

/// Editable parts of a download link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Provider,
    Url,
    Type,
    Size,
}

impl std::str::FromStr for LinkField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider" => Ok(LinkField::Provider),
            "url" => Ok(LinkField::Url),
            "type" => Ok(LinkField::Type),
            "size" => Ok(LinkField::Size),
            other => Err(format!("Unknown link field: {}", other)),
        }
    }
}

/// Result of a valid submit
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(NewContent),
    Update(Content),
}

impl FormSubmission {
    pub fn content_type(&self) -> ContentType {
        match self {
            FormSubmission::Create(new) => new.content_type,
            FormSubmission::Update(content) => content.content_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentForm {
    /// Id and creation time of the item being edited
    #[serde(skip)]
    original: Option<(i64, Option<DateTime<Utc>>)>,

    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub release_date: String,
    pub quality: Quality,
    pub genres_text: String,
    pub sections: Vec<DownloadSection>,
}

impl ContentForm {
    /// Empty form in create mode
    pub fn create() -> Self {
        Self {
            original: None,
            content_type: ContentType::Movie,
            title: String::new(),
            description: String::new(),
            poster_url: String::new(),
            release_date: String::new(),
            quality: Quality::WebDl,
            genres_text: String::new(),
            sections: Vec::new(),
        }
    }

    /// Form prefilled from an existing item
    pub fn edit(content: &Content) -> Self {
        Self {
            original: Some((content.id, content.created_at)),
            content_type: content.content_type,
            title: content.title.clone(),
            description: content.description.clone(),
            poster_url: content.poster_url.clone(),
            release_date: content.release_date.clone(),
            quality: content.quality,
            genres_text: content.genres.join(", "),
            sections: content.sections().to_vec(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    pub fn heading(&self) -> String {
        match self.original {
            Some(_) => format!("Edit {}", self.content_type),
            None => format!("Add New {}", self.content_type),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> DomainResult<()> {
        match field {
            FormField::ContentType => {
                self.content_type = value.parse().map_err(DomainError::InvariantViolation)?
            }
            FormField::Quality => {
                self.quality = value.parse().map_err(DomainError::InvariantViolation)?
            }
            FormField::Title => self.title = value.to_string(),
            FormField::PosterUrl => self.poster_url = value.to_string(),
            FormField::ReleaseDate => self.release_date = value.to_string(),
            FormField::Genres => self.genres_text = value.to_string(),
            FormField::Description => self.description = value.to_string(),
        }
        Ok(())
    }

    // ========================================================================
    // SECTIONS & LINKS
    // ========================================================================

    pub fn add_section(&mut self) -> usize {
        self.sections.push(DownloadSection::default());
        self.sections.len() - 1
    }

    /// Drops the section together with its links
    pub fn remove_section(&mut self, section: usize) -> DomainResult<DownloadSection> {
        self.section_mut(section)?;
        Ok(self.sections.remove(section))
    }

    pub fn set_section_title(&mut self, section: usize, title: &str) -> DomainResult<()> {
        self.section_mut(section)?.title = title.to_string();
        Ok(())
    }

    /// Appends a default G-Direct link and returns its index
    pub fn add_link(&mut self, section: usize) -> DomainResult<usize> {
        let links = &mut self.section_mut(section)?.links;
        links.push(DownloadLink::with_defaults());
        Ok(links.len() - 1)
    }

    pub fn remove_link(&mut self, section: usize, link: usize) -> DomainResult<DownloadLink> {
        self.link_mut(section, link)?;
        Ok(self.sections[section].links.remove(link))
    }

    pub fn set_link_field(
        &mut self,
        section: usize,
        link: usize,
        field: LinkField,
        value: &str,
    ) -> DomainResult<()> {
        let target = self.link_mut(section, link)?;
        match field {
            LinkField::Provider => {
                target.provider = value.to_string();
                target.link_type = LinkType::for_provider(value);
            }
            LinkField::Type => {
                target.link_type = value.parse().map_err(DomainError::InvariantViolation)?;
            }
            LinkField::Url => target.url = value.to_string(),
            LinkField::Size => target.size = value.to_string(),
        }
        Ok(())
    }

    fn section_mut(&mut self, section: usize) -> DomainResult<&mut DownloadSection> {
        self.sections
            .get_mut(section)
            .ok_or_else(|| DomainError::NotFound(format!("Section {}", section + 1)))
    }

    fn link_mut(&mut self, section: usize, link: usize) -> DomainResult<&mut DownloadLink> {
        self.section_mut(section)?
            .links
            .get_mut(link)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Link {} in section {}", link + 1, section + 1))
            })
    }

    // ========================================================================
    // SUBMIT
    // ========================================================================

    /// Comma-split, trimmed, empties dropped, order kept
    pub fn genres(&self) -> Vec<String> {
        self.genres_text
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn submit(&self) -> DomainResult<FormSubmission> {
        let genres = self.genres();

        let required = [
            ("Title", self.title.trim().is_empty()),
            ("Poster URL", self.poster_url.trim().is_empty()),
            ("Release Date", self.release_date.trim().is_empty()),
            ("Genres", genres.is_empty()),
            ("Description", self.description.trim().is_empty()),
        ];
        if let Some((label, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(DomainError::InvariantViolation(format!("{} is required", label)));
        }

        let new_content = NewContent {
            content_type: self.content_type,
            title: self.title.clone(),
            description: self.description.clone(),
            poster_url: self.poster_url.clone(),
            release_date: self.release_date.clone(),
            quality: self.quality,
            genres,
            download_sections: (!self.sections.is_empty()).then(|| self.sections.clone()),
        };

        Ok(match self.original {
            Some((id, created_at)) => {
                FormSubmission::Update(Content::from_new(id, created_at, new_content))
            }
            None => FormSubmission::Create(new_content),
        })
    }
}

impl Default for ContentForm {
    fn default() -> Self {
        Self::create()
    }
}
