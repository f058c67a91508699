//! Fixture infrastructure for E2E tests
//!
//! Range config fixtures live in `fixtures/` next to this crate's manifest.
//! Commands run through the library's command layer with output captured.

use anyhow::Result;
use roleplan_lib::application::{AppConfig, Commands, execute_command_with_output};
use roleplan_lib::range::RangeConfig;
use std::path::PathBuf;

/// Absolute path of a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Load a fixture range config
pub fn load_fixture(name: &str) -> Result<RangeConfig> {
    let path = fixture_path(name);
    RangeConfig::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load fixture '{}': {}", path.display(), e))
}

/// Captured result of one command
pub struct CommandRun {
    pub result: Result<()>,
    pub stdout: String,
}

impl CommandRun {
    /// Error chain as the binary would print it
    pub fn error_message(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| format!("{e:#}"))
    }
}

/// Run a command with `config`, capturing what it writes
pub fn run_command(command: Commands, config: &AppConfig) -> CommandRun {
    let mut out = Vec::new();
    let result = execute_command_with_output(command, config, &mut out);
    CommandRun {
        result,
        stdout: String::from_utf8_lossy(&out).into_owned(),
    }
}
