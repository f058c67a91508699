use super::*;
use crate::resolver::{NodeId, ResolveError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

const CHAIN_YAML: &str = r#"
ludus:
  - vm_name: dc01
    hostname: "{{ range_id }}-DC01"
    roles:
      - ad_forest
  - vm_name: web01
    roles:
      - name: iis
        depends_on:
          - vm_name: dc01
            role: ad_forest
      - monitoring
"#;

const CYCLE_YAML: &str = r#"
- vm_name: vm1
  roles:
    - name: roleA
      depends_on:
        - vm_name: vm2
          role: roleB
- vm_name: vm2
  roles:
    - name: roleB
      depends_on:
        - vm_name: vm1
          role: roleA
"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(command: Commands, config: &AppConfig) -> (Result<()>, String) {
    let mut out = Vec::new();
    let result = execute_command_with_output(command, config, &mut out);
    (result, String::from_utf8(out).unwrap())
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn test_resolve_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CHAIN_YAML);

    let (result, output) = run(
        Commands::Resolve {
            config: path,
            only_roles: vec![],
        },
        &AppConfig::default(),
    );
    result.unwrap();

    let parsed: Resolution = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed.order,
        vec![
            NodeId::new("dc01", "ad_forest"),
            NodeId::new("web01", "iis"),
            NodeId::new("web01", "monitoring"),
        ]
    );
}

#[test]
fn test_resolve_text_output_with_only_roles() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CHAIN_YAML);
    let config = AppConfig {
        output_format: OutputFormat::Text,
        ..AppConfig::default()
    };

    let (result, output) = run(
        Commands::Resolve {
            config: path,
            only_roles: vec!["iis".to_string(), "ad_forest".to_string()],
        },
        &config,
    );
    result.unwrap();
    assert_eq!(output, "dc01:ad_forest\nweb01:iis\n");
}

#[test]
fn test_resolve_cycle_error_is_bare_diagnostic() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CYCLE_YAML);

    let (result, output) = run(
        Commands::Resolve {
            config: path,
            only_roles: vec![],
        },
        &AppConfig::default(),
    );

    let err = result.unwrap_err();
    assert!(output.is_empty());
    assert_eq!(
        format!("{err:#}"),
        "ERROR: Circular dependency found for vm1:roleA"
    );
    assert!(err.downcast_ref::<ResolveError>().is_some());
}

#[test]
fn test_resolve_malformed_input_is_not_a_resolve_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", "ludus: 42\n");

    let (result, _) = run(
        Commands::Resolve {
            config: path,
            only_roles: vec![],
        },
        &AppConfig::default(),
    );

    let err = result.unwrap_err();
    assert!(err.downcast_ref::<ResolveError>().is_none());
    assert!(format!("{err:#}").contains("Malformed range config"));
}

#[test]
fn test_resolve_missing_file() {
    let (result, _) = run(
        Commands::Resolve {
            config: PathBuf::from("/nonexistent/range.yml"),
            only_roles: vec![],
        },
        &AppConfig::default(),
    );
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to load range config"));
}

// ============================================================================
// validate / graph / version
// ============================================================================

#[test]
fn test_validate_reports_unknown_roles() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CHAIN_YAML);

    let (result, output) = run(
        Commands::Validate {
            config: path,
            known_roles: vec!["ad_forest".to_string(), "iis".to_string()],
        },
        &AppConfig::default(),
    );

    assert!(result.is_err());
    assert!(output.contains("the role 'monitoring' (referenced by web01:monitoring) is not installed"));
    assert!(output.contains("3 roles resolve in a valid order"));
}

#[test]
fn test_validate_clean_config() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CHAIN_YAML);

    let (result, output) = run(
        Commands::Validate {
            config: path,
            known_roles: vec![],
        },
        &AppConfig::default(),
    );

    result.unwrap();
    assert!(output.starts_with("3 nodes, 1 dependency edges"));
}

#[test]
fn test_validate_cycle_fails_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CYCLE_YAML);

    let (result, output) = run(
        Commands::Validate {
            config: path,
            known_roles: vec![],
        },
        &AppConfig::default(),
    );

    assert_eq!(
        result.unwrap_err().to_string(),
        "ERROR: Circular dependency found for vm1:roleA"
    );
    assert!(output.contains("ERROR: Circular dependency found for vm1:roleA"));
}

#[test]
fn test_graph_outputs_dot() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "range.yml", CHAIN_YAML);

    let (result, output) = run(Commands::Graph { config: path }, &AppConfig::default());
    result.unwrap();

    assert!(output.starts_with("digraph {"));
    assert!(output.contains("dc01:ad_forest"));
    assert!(output.contains("0 -> 1"));
}

#[test]
fn test_version() {
    let (result, output) = run(Commands::Version, &AppConfig::default());
    result.unwrap();
    assert!(output.starts_with("roleplan "));
}

// ============================================================================
// module
// ============================================================================

fn module_reply_for(args: &str) -> Value {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "args.json", args);
    let (result, output) = run(Commands::Module { args_file: path }, &AppConfig::default());
    result.unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn test_module_success_reply() {
    let reply = module_reply_for(
        r#"{"ludus_config_object": [
            {"vm_name": "vm1", "roles": ["base"]},
            {"vm_name": "vm2", "roles": [{"name": "app", "depends_on": [{"vm_name": "vm1", "role": "base"}]}]}
        ], "_ansible_check_mode": false}"#,
    );

    assert_eq!(
        reply,
        json!({
            "changed": false,
            "order": [
                {"vm_name": "vm1", "role_name": "base"},
                {"vm_name": "vm2", "role_name": "app"}
            ]
        })
    );
}

#[test]
fn test_module_resolution_failure_reply() {
    let reply = module_reply_for(
        r#"{"ludus_config_object": [
            {"vm_name": "vm1", "roles": [{"name": "roleA", "depends_on": [{"vm_name": "vm9", "role": "roleZ"}]}]}
        ]}"#,
    );

    assert_eq!(
        reply,
        json!({ "failed": true, "msg": "ERROR: Dependency not found vm1:roleA" })
    );
}

#[test]
fn test_module_missing_param() {
    let reply = module_reply_for(r#"{"other": 1}"#);
    assert_eq!(reply["failed"], json!(true));
    assert_eq!(
        reply["msg"],
        json!("missing required arguments: ludus_config_object")
    );
}

#[test]
fn test_module_malformed_input_reply() {
    let reply = module_reply_for(r#"{"ludus_config_object": [{"roles": ["base"]}]}"#);
    assert_eq!(reply["failed"], json!(true));
    let msg = reply["msg"].as_str().unwrap();
    assert!(msg.starts_with("An error occurred: Malformed range config"), "{msg}");
}
