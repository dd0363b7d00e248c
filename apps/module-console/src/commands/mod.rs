//! Subcommand implementations.

pub mod config;
pub mod listing;
pub mod modules;

use console_async::{Client, ConsoleConfig};

use crate::settings::ModuleConsoleSettings;

pub fn client(settings: &ModuleConsoleSettings) -> Client<ConsoleConfig> {
    Client::with_config(settings.console_config())
}
