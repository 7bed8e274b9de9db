// src/application/commands/import_commands.rs
//
// TMDB import screen. Searches are debounced by the service; these
// commands must run inside the tokio runtime.

use crate::application::dto::MutationDto;
use crate::application::error_handling::{CommandResult, ErrorResponse, Notice};
use crate::application::state::AppState;
use crate::integrations::MediaKind;
use crate::services::{import_failure_message, ImportState};

pub fn get_import_state(state: &AppState) -> ImportState {
    state.import_service.state()
}

pub fn import_search(state: &AppState, query: &str) -> ImportState {
    state.import_service.set_query(query)
}

pub fn import_set_kind(state: &AppState, kind: &str) -> CommandResult<ImportState> {
    let kind: MediaKind = kind.parse().map_err(ErrorResponse::from)?;
    Ok(state.import_service.set_kind(kind))
}

/// Store a search result as new content and show it in the matching list
pub async fn import_content(state: &AppState, external_id: i64) -> CommandResult<MutationDto> {
    match state.import_service.import(external_id).await {
        Ok(outcome) => {
            let view = state.navigator().saved(outcome.content.content_type);
            Ok(MutationDto {
                notice: Notice::success(outcome.message()),
                view,
                content: Some(outcome.content),
            })
        }
        Err(e) => {
            let message = import_failure_message(&e);
            let mut response = ErrorResponse::from(e);
            response.message = message;
            response.details = None;
            Err(response)
        }
    }
}
