// src/application/shell.rs
//
// Line-oriented console front end.
//
// One command per line in, one JSON object per line out:
// `{"ok":true,"data":...}` or `{"ok":false,"error":{...}}`.
// The shell only parses arguments and routes to commands.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::application::commands::*;
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::form::{FormField, LinkField};
use crate::application::navigation::AdminView;
use crate::application::state::AppState;
use crate::domain::ContentType;
use crate::error::AppError;

pub const HELP: &str = "\
home | load | search <text> | filter <genre|year|quality> [value] | clear-filters
next | prev | open <id> | toggle-description | close
admin | exit-admin | view <dashboard|movies|webseries|import|settings> | dashboard
list <movies|webseries> | add | edit <id> | set <field> <value> | add-section
remove-section <s> | section-title <s> <title> | add-link <s> | remove-link <s> <l>
link <s> <l> <provider|url|type|size> <value> | submit | cancel | delete <id>
import-search <text> | import-kind <movie|tv> | import-state | import <tmdb id>
settings | save-settings <key> | help | quit";

pub struct Shell<'a> {
    state: &'a AppState,
    pending_delete: Option<i64>,
}

impl<'a> Shell<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            pending_delete: None,
        }
    }

    /// Run one input line. `None` means the operator asked to quit.
    pub async fn execute(&mut self, line: &str) -> Option<Value> {
        let line = line.trim();

        // The line after `delete <id>` answers the confirmation prompt
        if let Some(id) = self.pending_delete.take() {
            let confirmed = matches!(line.to_ascii_lowercase().as_str(), "y" | "yes");
            return Some(respond(delete_content(self.state, id, confirmed)));
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));
        let mut args = rest.split_whitespace();
        let state = self.state;

        let reply = match command {
            "" => return Some(json!({ "ok": true })),
            "quit" | "exit" => return None,
            "help" => respond(Ok(HELP)),

            // Catalog
            "home" => respond(Ok(get_home(state))),
            "load" => respond(load_catalog(state)),
            "search" => respond(Ok(search_catalog(state, rest))),
            "filter" => match args.next() {
                Some(dimension) => {
                    let value = rest[dimension.len()..].trim();
                    respond(set_filter(state, dimension, value))
                }
                None => usage("filter <genre|year|quality> [value]"),
            },
            "clear-filters" => respond(Ok(clear_filters(state))),
            "next" => respond(Ok(next_page(state))),
            "prev" => respond(Ok(previous_page(state))),
            "open" => respond(arg(args.next(), "id").and_then(|id| open_detail(state, id))),
            "toggle-description" => respond(toggle_description(state)),
            "close" => {
                close_detail(state);
                respond(Ok(get_home(state)))
            }

            // Admin
            "admin" => respond(Ok(enter_admin(state))),
            "exit-admin" => respond(Ok(exit_admin(state))),
            "view" => respond(
                arg::<AdminView>(args.next(), "view").map(|view| select_admin_view(state, view)),
            ),
            "dashboard" => respond(Ok(get_dashboard(state))),
            "list" => respond(arg::<AdminView>(args.next(), "list").and_then(|view| match view {
                AdminView::Movies => Ok(list_content(state, ContentType::Movie)),
                AdminView::WebSeries => Ok(list_content(state, ContentType::WebSeries)),
                _ => Err(ErrorResponse::validation("Expected movies or webseries".to_string())),
            })),
            "add" => respond(Ok(start_add(state))),
            "edit" => respond(arg(args.next(), "id").and_then(|id| start_edit(state, id))),
            "set" => match args.next() {
                Some(field) => {
                    let value = rest[field.len()..].trim();
                    respond(
                        arg::<FormField>(Some(field), "field")
                            .and_then(|field| form_set_field(state, field, value)),
                    )
                }
                None => usage("set <field> <value>"),
            },
            "add-section" => respond(form_add_section(state)),
            "remove-section" => {
                respond(arg(args.next(), "section").and_then(|s| form_remove_section(state, s)))
            }
            "section-title" => match args.next() {
                Some(section) => {
                    let title = rest[section.len()..].trim();
                    respond(
                        arg(Some(section), "section")
                            .and_then(|s| form_set_section_title(state, s, title)),
                    )
                }
                None => usage("section-title <s> <title>"),
            },
            "add-link" => {
                respond(arg(args.next(), "section").and_then(|s| form_add_link(state, s)))
            }
            "remove-link" => respond(
                indices(&mut args).and_then(|(s, l)| form_remove_link(state, s, l)),
            ),
            "link" => {
                let parsed = indices(&mut args)
                    .and_then(|(s, l)| Ok((s, l, arg::<LinkField>(args.next(), "field")?)));
                let value = skip_words(rest, 3);
                respond(parsed.and_then(|(section, link, field)| {
                    form_set_link_field(state, section, link, field, value)
                }))
            }
            "submit" => respond(submit_form(state)),
            "cancel" => respond(Ok(cancel_form(state))),
            "delete" => match arg::<i64>(args.next(), "id") {
                Ok(id) => {
                    self.pending_delete = Some(id);
                    json!({ "ok": true, "confirm": DELETE_CONFIRMATION_PROMPT })
                }
                Err(error) => respond::<()>(Err(error)),
            },

            // Import
            "import-search" => respond(Ok(import_search(state, rest))),
            "import-kind" => respond(import_set_kind(state, rest)),
            "import-state" => respond(Ok(get_import_state(state))),
            "import" => match arg(args.next(), "id") {
                Ok(id) => respond(import_content(state, id).await),
                Err(error) => respond::<()>(Err(error)),
            },

            // Settings
            "settings" => respond(Ok(get_settings(state))),
            "save-settings" => respond(save_settings(state, rest)),

            other => usage(&format!("unknown command \"{}\"; try help", other)),
        };

        Some(reply)
    }
}

fn arg<T>(value: Option<&str>, name: &str) -> CommandResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = value.ok_or_else(|| ErrorResponse::validation(format!("Missing {}", name)))?;
    value
        .parse()
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} \"{}\": {}", name, value, e)))
}

/// `<section> <link>` index pair
fn indices<'s>(args: &mut impl Iterator<Item = &'s str>) -> CommandResult<(usize, usize)> {
    let section = arg(args.next(), "section")?;
    let link = arg(args.next(), "link")?;
    Ok((section, link))
}

/// Text after the first `count` whitespace-separated words
fn skip_words(text: &str, count: usize) -> &str {
    let mut remaining = text.trim();
    for _ in 0..count {
        remaining = match remaining.split_once(char::is_whitespace) {
            Some((_, tail)) => tail.trim_start(),
            None => "",
        };
    }
    remaining
}

fn usage(message: &str) -> Value {
    respond::<()>(Err(ErrorResponse::validation(format!("Usage: {}", message))))
}

fn respond<T: Serialize>(result: CommandResult<T>) -> Value {
    let result = result.and_then(|data| {
        serde_json::to_value(data).map_err(|e| ErrorResponse::from(AppError::from(e)))
    });

    match result {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(error) => json!({ "ok": false, "error": error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::{seeded_state, titled};

    async fn run(shell: &mut Shell<'_>, line: &str) -> Value {
        shell.execute(line).await.unwrap()
    }

    #[tokio::test]
    async fn test_browse_session() {
        let state = seeded_state(vec![titled(1, "Dune"), titled(2, "Alien")]);
        let mut shell = Shell::new(&state);

        let loaded = run(&mut shell, "load").await;
        assert_eq!(loaded["ok"], true);
        assert_eq!(loaded["data"]["page"]["total_results"], 2);

        let searched = run(&mut shell, "search  dune ").await;
        assert_eq!(searched["data"]["query"]["search"], "dune");

        let opened = run(&mut shell, "open 1").await;
        assert_eq!(opened["data"]["title"], "Dune");

        let bad = run(&mut shell, "open one").await;
        assert_eq!(bad["ok"], false);
        assert_eq!(bad["error"]["error_type"], "validation");
    }

    #[tokio::test]
    async fn test_delete_asks_first() {
        let state = seeded_state(vec![titled(1, "Dune")]);
        let mut shell = Shell::new(&state);
        run(&mut shell, "load").await;

        let prompt = run(&mut shell, "delete 1").await;
        assert_eq!(prompt["confirm"], DELETE_CONFIRMATION_PROMPT);
        let answer = run(&mut shell, "no").await;
        assert_eq!(answer["data"]["notice"]["message"], "Delete cancelled");

        run(&mut shell, "delete 1").await;
        run(&mut shell, "yes").await;
        let dashboard = run(&mut shell, "dashboard").await;
        assert_eq!(dashboard["data"]["totalCount"], 0);
    }

    #[tokio::test]
    async fn test_form_session() {
        let state = seeded_state(vec![]);
        let mut shell = Shell::new(&state);
        run(&mut shell, "load").await;
        run(&mut shell, "admin").await;
        run(&mut shell, "add").await;

        for line in [
            "set title Download Alien (1979)",
            "set poster https://img/alien.jpg",
            "set release May 25, 1979",
            "set genres Horror, Sci-Fi",
            "set description In space no one can hear you scream.",
            "add-section",
            "section-title 0 720p",
            "add-link 0",
            "link 0 0 provider V-Cloud",
        ] {
            assert_eq!(run(&mut shell, line).await["ok"], true, "{}", line);
        }

        let saved = run(&mut shell, "submit").await;
        assert_eq!(saved["data"]["view"]["view"], "movies");
        assert_eq!(saved["data"]["content"]["title"], "Download Alien (1979)");
    }

    #[tokio::test]
    async fn test_link_tolerates_extra_spaces() {
        let state = seeded_state(vec![]);
        let mut shell = Shell::new(&state);
        run(&mut shell, "load").await;
        run(&mut shell, "admin").await;
        run(&mut shell, "add").await;

        for line in [
            "set title Download Alien (1979)",
            "set poster https://img/alien.jpg",
            "set release May 25, 1979",
            "set genres Horror, Sci-Fi",
            "set description In space no one can hear you scream.",
            "add-section",
            "section-title 0 720p",
            "add-link 0",
            "link 0  0 provider V-Cloud",
            "link  0 0   url   https://dl.example/alien",
        ] {
            assert_eq!(run(&mut shell, line).await["ok"], true, "{}", line);
        }

        let saved = run(&mut shell, "submit").await;
        let link = &saved["data"]["content"]["downloadSections"][0]["links"][0];
        assert_eq!(link["provider"], "V-Cloud");
        assert_eq!(link["url"], "https://dl.example/alien");
    }

    #[test]
    fn test_skip_words() {
        assert_eq!(skip_words("0  0 url  a b", 3), "a b");
        assert_eq!(skip_words("0 0", 3), "");
    }

    #[tokio::test]
    async fn test_unknown_and_quit() {
        let state = seeded_state(vec![]);
        let mut shell = Shell::new(&state);

        assert_eq!(run(&mut shell, "frobnicate").await["ok"], false);
        assert!(shell.execute("quit").await.is_none());
    }
}
