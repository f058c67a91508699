//! Binary-level tests: exit codes and the streams each diagnostic lands on

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EXAMPLE_RANGE: &str = r#"
ludus:
  - vm_name: vm1
    roles: [base]
  - vm_name: vm2
    roles:
      - name: app
        depends_on:
          - vm_name: vm1
            role: base
"#;

const CYCLE_RANGE: &str = r#"
- vm_name: vm1
  roles:
    - name: roleA
      depends_on:
        - vm_name: vm1
          role: roleA
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.dir.path().join(name), content).unwrap();
        self
    }

    fn roleplan(&self) -> Command {
        let mut cmd = Command::cargo_bin("roleplan").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("ROLEPLAN_OUTPUT_FORMAT")
            .env_remove("ROLEPLAN_KNOWN_ROLES")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[test]
fn resolve_prints_text_order() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    ws.roleplan()
        .args(["--format", "text", "resolve", "range.yml"])
        .assert()
        .success()
        .stdout("vm1:base\nvm2:app\n");
}

#[test]
fn resolve_defaults_to_json() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    let output = ws
        .roleplan()
        .args(["resolve", "range.yml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["order"][1]["vm_name"], "vm2");
    assert_eq!(value["order"][1]["role_name"], "app");
}

#[test]
fn output_format_from_environment() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    ws.roleplan()
        .env("ROLEPLAN_OUTPUT_FORMAT", "text")
        .args(["resolve", "range.yml"])
        .assert()
        .success()
        .stdout("vm1:base\nvm2:app\n");
}

#[test]
fn cycle_exits_with_exact_diagnostic() {
    let ws = Workspace::new();
    ws.write("range.yml", CYCLE_RANGE);

    ws.roleplan()
        .args(["resolve", "range.yml"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr("ERROR: Circular dependency found for vm1:roleA\n");
}

#[test]
fn malformed_config_reports_loader_error() {
    let ws = Workspace::new();
    ws.write("range.yml", "- vm_name: vm1\n  roles: 42\n");

    ws.roleplan()
        .args(["resolve", "range.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load range config 'range.yml'"))
        .stderr(predicate::str::contains("ERROR:").not());
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();

    ws.roleplan()
        .args(["resolve", "absent.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.yml"));
}

#[test]
fn validate_unknown_role_fails() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    ws.roleplan()
        .args(["validate", "range.yml", "--known-role", "base"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("the role 'app'"))
        .stderr(predicate::str::contains("Validation failed: 1 unknown role(s)"));
}

#[test]
fn validate_accepts_comma_separated_roles_from_env() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    ws.roleplan()
        .env("ROLEPLAN_KNOWN_ROLES", "base,app")
        .args(["validate", "range.yml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 roles resolve in a valid order"));
}

#[test]
fn graph_prints_dot() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE);

    ws.roleplan()
        .args(["graph", "range.yml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("vm2:app"));
}

#[test]
fn module_failure_travels_in_json_with_exit_zero() {
    let ws = Workspace::new();
    ws.write(
        "args.json",
        r#"{"ludus_config_object": [{"vm_name": "vm1", "roles": [{"name": "roleA", "depends_on": [{"vm_name": "vm9", "role": "roleZ"}]}]}]}"#,
    );

    ws.roleplan()
        .args(["module", "args.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""msg":"ERROR: Dependency not found vm1:roleA""#,
        ))
        .stdout(predicate::str::contains(r#""failed":true"#));
}

#[test]
fn version_prints_crate_version() {
    Workspace::new()
        .roleplan()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn env_file_sets_output_format() {
    let ws = Workspace::new();
    ws.write("range.yml", EXAMPLE_RANGE)
        .write(".env", "ROLEPLAN_OUTPUT_FORMAT=text\n");

    ws.roleplan()
        .args(["resolve", "range.yml"])
        .assert()
        .success()
        .stdout("vm1:base\nvm2:app\n");
}
