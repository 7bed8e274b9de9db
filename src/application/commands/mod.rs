// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the console shell and the services
// - Commands accept plain values, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod admin_commands;
pub mod catalog_commands;
pub mod import_commands;
pub mod settings_commands;

pub use admin_commands::*;
pub use catalog_commands::*;
pub use import_commands::*;
pub use settings_commands::*;
