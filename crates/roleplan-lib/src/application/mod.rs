//! Application layer modules
//!
//! CLI interface, configuration management, and command dispatch.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

pub use cli::{Cli, CliConfig, Commands};
pub use commands::{execute_command, execute_command_with_output};
pub use config::AppConfig;
