//! Configuration loading
//!
//! Coordinates loading configuration from the layered sources.

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Dotenv files consulted, first one wins per variable
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` / `.env` into the process environment
    ///
    /// Must run before the CLI is parsed so `ROLEPLAN_*` values from these
    /// files reach clap's `env` fallbacks. Missing files are fine.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            if let Err(e) = dotenvy::from_filename(env_file) {
                if !e.not_found() {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Load config: defaults -> standard env vars -> CLI (already carrying .env and ROLEPLAN_* values)
    pub fn load(cli_config: AppConfig) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        Self::layer(env_config, cli_config)
    }

    /// Combine the layers without touching the process environment
    pub fn layer(env_config: EnvironmentConfig, cli_config: AppConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env_config.apply_color_config(config.color);
        config = config.merge_with(cli_config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
