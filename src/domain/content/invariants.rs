use super::entity::{Content, DownloadSection, NewContent};
use crate::domain::{DomainError, DomainResult};

/// Validates a stored Content
pub fn validate_content(content: &Content) -> DomainResult<()> {
    validate_title(&content.title)?;
    validate_sections(content.sections())?;
    Ok(())
}

/// Validates an insert payload
pub fn validate_new_content(content: &NewContent) -> DomainResult<()> {
    validate_title(&content.title)?;
    validate_sections(content.download_sections.as_deref().unwrap_or(&[]))?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Content title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Every link needs a provider key
fn validate_sections(sections: &[DownloadSection]) -> DomainResult<()> {
    for (section_idx, section) in sections.iter().enumerate() {
        for (link_idx, link) in section.links.iter().enumerate() {
            if link.provider.trim().is_empty() {
                return Err(DomainError::InvariantViolation(format!(
                    "Link {} in section {} has no provider",
                    link_idx, section_idx
                )));
            }
        }
    }
    Ok(())
}

/// Invariants that must hold true for Content:
///
/// 1. Identity is assigned by the store and never changes
/// 2. created_at is set once at insert
/// 3. Title cannot be empty
/// 4. Sections and links have no identity of their own
/// 5. A link's type may diverge from its provider
