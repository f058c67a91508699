use super::*;
use crate::primitives::{ColorIntent, OutputFormat};

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output_format, OutputFormat::Json);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        output_format: OutputFormat::Text,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.output_format, OutputFormat::Text);
}

#[test]
fn test_layer_env_color_applies_when_cli_is_default() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::layer(env, AppConfig::default()).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_layer_cli_color_overrides_env() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::layer(env, cli).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_layer_rejects_out_of_range_log_level() {
    let cli = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };

    let err = AppConfig::layer(EnvironmentConfig::default(), cli).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}
