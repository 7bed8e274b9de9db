// src/application/commands/admin_commands.rs
//
// Admin console: navigation, lists, the add/edit form and deletion.
//
// RULES:
// - Call services
// - Return DTOs
// - Never contain business logic
// - A failed mutation leaves the screen and the form as they were

use crate::application::dto::{ContentListDto, DashboardDto, FormDto, MutationDto};
use crate::application::error_handling::{CommandResult, ErrorResponse, Notice, ToErrorResponse};
use crate::application::form::{ContentForm, FormField, FormSubmission, LinkField};
use crate::application::navigation::{AdminView, View};
use crate::application::state::AppState;
use crate::domain::ContentType;

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this item?";

// ============================================================================
// NAVIGATION
// ============================================================================

pub fn current_view(state: &AppState) -> View {
    state.navigator().view()
}

pub fn enter_admin(state: &AppState) -> View {
    *state.form() = None;
    state.navigator().enter_admin()
}

pub fn exit_admin(state: &AppState) -> View {
    *state.form() = None;
    state.navigator().exit_admin()
}

pub fn select_admin_view(state: &AppState, target: AdminView) -> View {
    *state.form() = None;
    state.navigator().select(target)
}

pub fn get_dashboard(state: &AppState) -> DashboardDto {
    let catalog = &state.catalog_service;
    DashboardDto {
        movie_count: catalog.count_by_type(ContentType::Movie),
        web_series_count: catalog.count_by_type(ContentType::WebSeries),
        total_count: catalog.total_count(),
    }
}

pub fn list_content(state: &AppState, content_type: ContentType) -> ContentListDto {
    ContentListDto::new(content_type, &state.catalog_service.by_type(content_type))
}

// ============================================================================
// FORM
// ============================================================================

pub fn start_add(state: &AppState) -> FormDto {
    let form = ContentForm::create();
    let dto = FormDto::from(&form);
    *state.form() = Some(form);
    state.navigator().add();
    dto
}

pub fn start_edit(state: &AppState, id: i64) -> CommandResult<FormDto> {
    let target = state
        .catalog_service
        .find(id)
        .ok_or_else(|| ErrorResponse::not_found("Content"))?;

    let form = ContentForm::edit(&target);
    let dto = FormDto::from(&form);
    *state.form() = Some(form);
    state.navigator().edit(target);
    Ok(dto)
}

/// Run `edit` against the open form and return its new state
fn with_form<F>(state: &AppState, edit: F) -> CommandResult<FormDto>
where
    F: FnOnce(&mut ContentForm) -> CommandResult<()>,
{
    let mut guard = state.form();
    let form = guard
        .as_mut()
        .ok_or_else(|| ErrorResponse::validation("No form is open".to_string()))?;
    edit(form)?;
    Ok(FormDto::from(&*form))
}

pub fn form_set_field(state: &AppState, field: FormField, value: &str) -> CommandResult<FormDto> {
    with_form(state, |form| form.set_field(field, value).to_error_response())
}

pub fn form_add_section(state: &AppState) -> CommandResult<FormDto> {
    with_form(state, |form| {
        form.add_section();
        Ok(())
    })
}

pub fn form_remove_section(state: &AppState, section: usize) -> CommandResult<FormDto> {
    with_form(state, |form| form.remove_section(section).map(|_| ()).to_error_response())
}

pub fn form_set_section_title(
    state: &AppState,
    section: usize,
    title: &str,
) -> CommandResult<FormDto> {
    with_form(state, |form| form.set_section_title(section, title).to_error_response())
}

pub fn form_add_link(state: &AppState, section: usize) -> CommandResult<FormDto> {
    with_form(state, |form| form.add_link(section).map(|_| ()).to_error_response())
}

pub fn form_remove_link(state: &AppState, section: usize, link: usize) -> CommandResult<FormDto> {
    with_form(state, |form| form.remove_link(section, link).map(|_| ()).to_error_response())
}

pub fn form_set_link_field(
    state: &AppState,
    section: usize,
    link: usize,
    field: LinkField,
    value: &str,
) -> CommandResult<FormDto> {
    with_form(state, |form| {
        form.set_link_field(section, link, field, value)
            .to_error_response()
    })
}

/// Validate, store, and on success go to the saved item's list
pub fn submit_form(state: &AppState) -> CommandResult<MutationDto> {
    let submission = {
        let guard = state.form();
        let form = guard
            .as_ref()
            .ok_or_else(|| ErrorResponse::validation("No form is open".to_string()))?;
        form.submit().to_error_response()?
    };

    let content_type = submission.content_type();
    let (content, message) = match submission {
        FormSubmission::Create(new_content) => {
            let created = state.admin_service.create(new_content).to_error_response()?;
            let message = format!("Added \"{}\"", created.title);
            (created, message)
        }
        FormSubmission::Update(content) => {
            let updated = state.admin_service.update(content).to_error_response()?;
            let message = format!("Updated \"{}\"", updated.title);
            (updated, message)
        }
    };

    *state.form() = None;
    let view = state.navigator().saved(content_type);

    Ok(MutationDto {
        notice: Notice::success(message),
        view,
        content: Some(content),
    })
}

pub fn cancel_form(state: &AppState) -> View {
    *state.form() = None;
    state.navigator().cancel()
}

// ============================================================================
// DELETE
// ============================================================================

/// `confirmed` is the operator's answer to DELETE_CONFIRMATION_PROMPT
pub fn delete_content(state: &AppState, id: i64, confirmed: bool) -> CommandResult<MutationDto> {
    let deleted = state
        .admin_service
        .delete(id, confirmed)
        .to_error_response()?;

    let notice = if deleted {
        Notice::success("Content deleted")
    } else {
        Notice::info("Delete cancelled")
    };

    Ok(MutationDto {
        notice,
        view: current_view(state),
        content: None,
    })
}
