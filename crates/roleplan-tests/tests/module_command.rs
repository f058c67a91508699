//! E2E tests for the Ansible module mode

use roleplan_lib::application::{AppConfig, Commands};
use roleplan_tests::{fixture_path, run_command};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn module_reply(args_file: std::path::PathBuf) -> Value {
    let run = run_command(Commands::Module { args_file }, &AppConfig::default());
    assert!(run.result.is_ok(), "module mode never fails the process");
    serde_json::from_str(&run.stdout).unwrap()
}

#[test]
fn e2e_module_reply_from_fixture() {
    let reply = module_reply(fixture_path("module_args.json"));
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
fn e2e_module_cycle_reply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("args");
    fs::write(
        &path,
        json!({
            "ludus_config_object": [
                {"vm_name": "vm1", "roles": [{"name": "roleA", "depends_on": [{"vm_name": "vm1", "role": "roleA"}]}]}
            ]
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        module_reply(path),
        json!({"failed": true, "msg": "ERROR: Circular dependency found for vm1:roleA"})
    );
}

#[test]
fn e2e_module_unreadable_args_file() {
    let reply = module_reply("/nonexistent/args".into());
    assert_eq!(reply["failed"], json!(true));
    assert!(
        reply["msg"]
            .as_str()
            .unwrap()
            .starts_with("An error occurred: failed to read module args")
    );
}

#[test]
fn e2e_module_param_must_be_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("args");
    fs::write(&path, r#"{"ludus_config_object": {"ludus": []}}"#).unwrap();

    assert_eq!(
        module_reply(path),
        json!({"failed": true, "msg": "argument 'ludus_config_object' must be a list"})
    );
}
