//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::io::IsTerminal;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const OUTPUT_FORMAT: &str = "json";
    pub const MAX_LOG_LEVEL: u8 = 4;
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput, OutputFormat};

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn output_format() -> OutputFormat {
        OutputFormat::Json
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "ROLEPLAN_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log line format (text, json, yaml)
    #[arg(long, global = true, env = "ROLEPLAN_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "ROLEPLAN_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, global = true, env = "ROLEPLAN_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Result format on stdout (json, yaml, text)
    #[arg(short = 'f', long = "format", global = true, env = "ROLEPLAN_OUTPUT_FORMAT", default_value = defaults::OUTPUT_FORMAT)]
    #[serde(default = "default_fns::output_format")]
    pub output_format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output_format: default_fns::output_format(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, enabling ANSI only when the log stream is a terminal
    pub fn to_logger_config(&self) -> LoggerConfig {
        let is_tty = match self.log_output {
            LogOutput::Stderr => std::io::stderr().is_terminal(),
            LogOutput::Stdout => std::io::stdout().is_terminal(),
        };

        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.enabled(is_tty),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.log_format != default_fns::log_format() {
            self.log_format = other.log_format;
        }
        if other.log_output != default_fns::log_output() {
            self.log_output = other.log_output;
        }
        if other.color != default_fns::color() {
            self.color = other.color;
        }
        if other.output_format != default_fns::output_format() {
            self.output_format = other.output_format;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level > defaults::MAX_LOG_LEVEL {
            return Err(ConfigError::ValidationFailed {
                reason: format!(
                    "log level {} is out of range 0-{}",
                    self.log_level,
                    defaults::MAX_LOG_LEVEL
                ),
            });
        }

        Ok(())
    }
}
