pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{export::JsonExporter, prompter::ConsolePrompter, prompter::ScriptedPrompter};
pub use config::{toml_config::LanguageConfig, CliConfig};
pub use core::{
    game::{GameEngine, GameSettings},
    language::Language,
};
pub use utils::error::{LangError, Result};
