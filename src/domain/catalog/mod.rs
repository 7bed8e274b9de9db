// src/domain/catalog/mod.rs
//
// Catalog browsing: search/filter engine, filter options, pagination and the
// view state composing them. Everything here is pure and synchronous.

pub mod filter;
pub mod options;
pub mod pagination;
pub mod view;

pub use filter::{filter_content, CatalogQuery, FilterSelection, FilterState};
pub use options::{all_genres, all_years, FilterOptions};
pub use pagination::{PaginationControl, Paginator, PAGE_SIZE};
pub use view::{
    CatalogPage, CatalogView, ContentCard, ContentDetail, GridStatus, LinkButton, SectionView,
    EMPTY_GRID_MESSAGE, LOADING_MESSAGE,
};
