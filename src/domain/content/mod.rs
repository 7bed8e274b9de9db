pub mod entity;
pub mod invariants;

pub use entity::{
    extract_year, Content, ContentType, DownloadLink, DownloadSection, LinkType, NewContent,
    Quality, TitleSegment, DESCRIPTION_PREVIEW_CHARS,
};
pub use invariants::{validate_content, validate_new_content};
