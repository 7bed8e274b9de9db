// src/application/navigation.rs
//
// Screen state machine for the public grid and the admin console.
// Every transition is operator-triggered; nothing here is persisted.

use serde::Serialize;

use crate::domain::{Content, ContentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminView {
    Dashboard,
    Movies,
    #[serde(rename = "webseries")]
    WebSeries,
    Import,
    Settings,
    Form,
}

impl AdminView {
    /// List screen for a content type
    pub fn list_for(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Movie => AdminView::Movies,
            ContentType::WebSeries => AdminView::WebSeries,
        }
    }
}

impl std::str::FromStr for AdminView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(AdminView::Dashboard),
            "movies" => Ok(AdminView::Movies),
            "webseries" | "web-series" => Ok(AdminView::WebSeries),
            "import" => Ok(AdminView::Import),
            "settings" => Ok(AdminView::Settings),
            other => Err(format!("Unknown admin view: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "view", rename_all = "lowercase")]
pub enum View {
    Home,
    Admin(AdminView),
}

/// Current screen plus the item the form is editing, if any
#[derive(Debug, Clone)]
pub struct Navigator {
    view: View,
    edit_target: Option<Content>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            view: View::Home,
            edit_target: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The admin console always opens on the dashboard
    pub fn enter_admin(&mut self) -> View {
        self.edit_target = None;
        self.view = View::Admin(AdminView::Dashboard);
        self.view
    }

    pub fn exit_admin(&mut self) -> View {
        self.edit_target = None;
        self.view = View::Home;
        self.view
    }

    /// Sidebar selection. The form is reached only through add/edit.
    pub fn select(&mut self, target: AdminView) -> View {
        if target != AdminView::Form {
            self.edit_target = None;
            self.view = View::Admin(target);
        }
        self.view
    }

    pub fn add(&mut self) -> View {
        self.edit_target = None;
        self.view = View::Admin(AdminView::Form);
        self.view
    }

    pub fn edit(&mut self, target: Content) -> View {
        self.edit_target = Some(target);
        self.view = View::Admin(AdminView::Form);
        self.view
    }

    /// After a save, show the list the saved item belongs to
    pub fn saved(&mut self, content_type: ContentType) -> View {
        self.edit_target = None;
        self.view = View::Admin(AdminView::list_for(content_type));
        self.view
    }

    /// Back to the original target's list, or the dashboard when creating
    pub fn cancel(&mut self) -> View {
        let target = match self.edit_target.take() {
            Some(content) => AdminView::list_for(content.content_type),
            None => AdminView::Dashboard,
        };
        self.view = View::Admin(target);
        self.view
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
