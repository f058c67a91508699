use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// roleplan CLI - role provisioning order for lab ranges
#[derive(Debug, Clone, Parser)]
#[command(name = "roleplan")]
#[command(about = "Resolve the order in which VM roles must be provisioned")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// roleplan commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config,
            command: cli.command,
        })
    }
}

/// Available roleplan commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the provisioning order for a range config
    Resolve {
        /// Range config file (YAML, or JSON with a .json extension)
        config: PathBuf,

        /// Only print these roles; the whole config is still resolved
        #[arg(long, value_delimiter = ',', help = "Comma separated list of roles to keep in the output")]
        only_roles: Vec<String>,
    },

    /// Check a range config without printing an order
    Validate {
        /// Range config file
        config: PathBuf,

        /// Roles installed on the server; enables the unknown-role check
        #[arg(
            long = "known-role",
            env = "ROLEPLAN_KNOWN_ROLES",
            value_delimiter = ',',
            help = "Installed role name (repeatable or comma separated)"
        )]
        known_roles: Vec<String>,
    },

    /// Print the role dependency graph as Graphviz DOT
    Graph {
        /// Range config file
        config: PathBuf,
    },

    /// Run as an Ansible module: read a JSON args file, answer in JSON
    Module {
        /// Args file holding `ludus_config_object`
        args_file: PathBuf,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Range config path the command reads, if any
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Commands::Resolve { config, .. }
            | Commands::Validate { config, .. }
            | Commands::Graph { config } => Some(config),
            Commands::Module { .. } | Commands::Version => None,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
