//! # roleplan Library
//!
//! Deterministic provisioning order for the roles of a lab range.
//!
//! ## Core Modules
//!
//! - [`resolver`] - Graph builder and topological sorter
//! - [`range`] - Range config loading and validation
//! - [`primitives`] - Shared enums and errors
//! - [`logger`] - Structured logging setup
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```
//! use roleplan_lib::range::VmRecord;
//! use roleplan_lib::resolver::{NodeId, resolve};
//!
//! let vms = vec![
//!     VmRecord::new("vm1").with_role("base"),
//!     VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
//! ];
//!
//! let resolution = resolve(&vms).unwrap();
//! assert_eq!(
//!     resolution.order,
//!     vec![NodeId::new("vm1", "base"), NodeId::new("vm2", "app")]
//! );
//! ```

pub mod application;
pub mod logger;
pub mod primitives;
pub mod range;
pub mod resolver;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat};
pub use range::{RangeConfig, RangeConfigError, VmRecord};
pub use resolver::{NodeId, Resolution, ResolveError, resolve};

use anyhow::Result;
use application::CliConfig;

/// Entry point used by the `roleplan` binary
pub fn main() -> Result<()> {
    // .env files first so clap sees their ROLEPLAN_* values
    AppConfig::load_env_files()?;

    let cli = CliConfig::load()?;
    let app_config = AppConfig::load(cli.app_config)?;

    console::set_colors_enabled(app_config.color.enabled(console::Term::stdout().is_term()));
    Logger::init(app_config.to_logger_config())?;

    execute_command(CliConfig {
        app_config,
        command: cli.command,
    })
}
