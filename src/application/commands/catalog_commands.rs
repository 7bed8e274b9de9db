// src/application/commands/catalog_commands.rs
//
// Public grid: search, filters, pagination and the detail view.
//
// RULES:
// - Call services
// - Return DTOs
// - Never contain business logic

use crate::application::dto::HomeDto;
use crate::application::error_handling::{CommandResult, ErrorResponse, ToErrorResponse};
use crate::application::state::AppState;
use crate::domain::{CatalogPage, ContentDetail, FilterSelection, Quality};

fn home(state: &AppState, page: CatalogPage) -> HomeDto {
    HomeDto {
        page,
        query: state.catalog_service.query(),
        filter_options: state.catalog_service.filter_options(),
    }
}

/// Initial fetch. On failure the grid stays empty and the error is returned.
pub fn load_catalog(state: &AppState) -> CommandResult<HomeDto> {
    let page = state.catalog_service.load().to_error_response()?;
    Ok(home(state, page))
}

pub fn get_home(state: &AppState) -> HomeDto {
    home(state, state.catalog_service.page())
}

pub fn search_catalog(state: &AppState, query: &str) -> HomeDto {
    let page = state.catalog_service.set_search(query);
    home(state, page)
}

/// `dimension` is genre, year or quality; an empty value clears it
pub fn set_filter(state: &AppState, dimension: &str, value: &str) -> CommandResult<HomeDto> {
    let value = Some(value.trim()).filter(|v| !v.is_empty());

    let selection = match dimension {
        "genre" => FilterSelection::Genre(value.map(str::to_string)),
        "year" => FilterSelection::Year(value.map(str::to_string)),
        "quality" => FilterSelection::Quality(
            value
                .map(|v| v.parse::<Quality>())
                .transpose()
                .map_err(ErrorResponse::validation)?,
        ),
        other => {
            return Err(ErrorResponse::validation(format!(
                "Unknown filter: {}",
                other
            )))
        }
    };

    let page = state.catalog_service.set_filter(selection);
    Ok(home(state, page))
}

pub fn clear_filters(state: &AppState) -> HomeDto {
    let page = state.catalog_service.clear_filters();
    home(state, page)
}

pub fn next_page(state: &AppState) -> HomeDto {
    let page = state.catalog_service.next_page();
    home(state, page)
}

pub fn previous_page(state: &AppState) -> HomeDto {
    let page = state.catalog_service.previous_page();
    home(state, page)
}

pub fn open_detail(state: &AppState, id: i64) -> CommandResult<ContentDetail> {
    state
        .catalog_service
        .select(id)
        .ok_or_else(|| ErrorResponse::not_found("Content"))
}

pub fn toggle_description(state: &AppState) -> CommandResult<ContentDetail> {
    state
        .catalog_service
        .toggle_description()
        .ok_or_else(|| ErrorResponse::validation("No content is open".to_string()))
}

pub fn close_detail(state: &AppState) {
    state.catalog_service.close_detail();
}
