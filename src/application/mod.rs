// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above the services and the domain
// - Provides the boundary between the console shell and the services
// - Owns screen state (navigation, the open form); never business rules
// - Translates domain entities into DTOs

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod form;
pub mod navigation;
pub mod shell;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType, Notice, NoticeLevel};
pub use navigation::{AdminView, Navigator, View};
pub use shell::Shell;
pub use state::AppState;
