// src/application/commands/settings_commands.rs

use crate::application::dto::SettingsDto;
use crate::application::error_handling::{CommandResult, Notice, ToErrorResponse};
use crate::application::state::AppState;

pub fn get_settings(state: &AppState) -> SettingsDto {
    let api_key = state.credential.get();
    SettingsDto {
        is_set: api_key.is_some(),
        api_key: api_key.unwrap_or_default(),
    }
}

/// Save the TMDB key and re-run any pending import search with it
pub fn save_settings(state: &AppState, api_key: &str) -> CommandResult<Notice> {
    state.credential.save(api_key).to_error_response()?;
    state.import_service.refresh();
    Ok(Notice::success("Settings saved successfully!"))
}
