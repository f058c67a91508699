use super::*;
use crate::primitives::OutputFormat;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_resolve_with_only_roles() {
    let cli = Cli::try_parse_from([
        "roleplan",
        "resolve",
        "range.yml",
        "--only-roles",
        "base,app",
        "--format",
        "text",
    ])
    .unwrap();

    assert_eq!(cli.config.output_format, OutputFormat::Text);
    match cli.command {
        Some(Commands::Resolve { config, only_roles }) => {
            assert_eq!(config, PathBuf::from("range.yml"));
            assert_eq!(only_roles, vec!["base".to_string(), "app".to_string()]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_validate_known_roles_repeatable() {
    let cli = Cli::try_parse_from([
        "roleplan",
        "validate",
        "range.yml",
        "--known-role",
        "base",
        "--known-role",
        "app,db",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Validate { known_roles, .. }) => {
            assert_eq!(known_roles, vec!["base", "app", "db"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_config_path() {
    let graph = Commands::Graph {
        config: PathBuf::from("r.yml"),
    };
    assert_eq!(graph.config_path(), Some(&PathBuf::from("r.yml")));
    assert_eq!(Commands::Version.config_path(), None);
}
