// Tests for range config loading

use super::*;
use std::fs;
use tempfile::TempDir;

const WRAPPED_YAML: &str = r#"
ludus:
  - vm_name: "{{ range_id }}-dc01"
    hostname: "{{ range_id }}-DC01"
    template: win2019-server-x64-template
    vlan: 10
    ip_last_octet: 11
    roles:
      - ad_forest
  - vm_name: "{{ range_id }}-web01"
    roles:
      - name: iis
        depends_on:
          - vm_name: "{{ range_id }}-dc01"
            role: ad_forest
  - vm_name: "{{ range_id }}-router"
"#;

#[test]
fn test_parse_wrapped_yaml_document() {
    let config = RangeConfig::from_yaml_str(WRAPPED_YAML).unwrap();

    assert_eq!(config.vms.len(), 3);
    assert_eq!(config.vms[0].roles, vec![RoleEntry::Name("ad_forest".to_string())]);
    assert_eq!(config.vms[1].roles[0].name(), "iis");
    assert_eq!(
        config.vms[1].roles[0].depends_on(),
        &[DependencyRef {
            vm_name: "{{ range_id }}-dc01".to_string(),
            role: "ad_forest".to_string(),
        }]
    );
    // roles is optional
    assert!(config.vms[2].roles.is_empty());
}

#[test]
fn test_parse_bare_list_json() {
    let config = RangeConfig::from_json_str(
        r#"[{"vm_name": "vm1", "roles": ["base", {"name": "app"}]}]"#,
    )
    .unwrap();

    assert_eq!(config.vms[0].roles[0], RoleEntry::Name("base".to_string()));
    assert_eq!(
        config.vms[0].roles[1],
        RoleEntry::Detailed(RoleSpec {
            name: "app".to_string(),
            depends_on: vec![],
        })
    );
}

#[test]
fn test_yaml_and_json_agree() {
    let yaml = RangeConfig::from_yaml_str(
        "- vm_name: vm1\n  roles:\n    - name: app\n      depends_on:\n        - {vm_name: vm2, role: db}\n",
    )
    .unwrap();
    let json = RangeConfig::from_json_str(
        r#"[{"vm_name":"vm1","roles":[{"name":"app","depends_on":[{"vm_name":"vm2","role":"db"}]}]}]"#,
    )
    .unwrap();
    assert_eq!(yaml, json);
}

#[test]
fn test_load_picks_format_by_extension() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("range.json");
    let yaml_path = dir.path().join("range-config.yml");
    fs::write(&json_path, r#"{"ludus": [{"vm_name": "vm1", "roles": ["base"]}]}"#).unwrap();
    fs::write(&yaml_path, WRAPPED_YAML).unwrap();

    assert_eq!(RangeConfig::load(&json_path).unwrap().vms.len(), 1);
    assert_eq!(RangeConfig::load(&yaml_path).unwrap().vms.len(), 3);
}

#[test]
fn test_load_missing_file() {
    let err = RangeConfig::load(Path::new("/nonexistent/range.yml")).unwrap_err();
    assert!(matches!(err, RangeConfigError::FileReadError { .. }));
}

// ============================================================================
// Malformed input
// ============================================================================

fn malformed_reason(value: serde_json::Value) -> String {
    match RangeConfig::from_value(value) {
        Err(RangeConfigError::Malformed { reason }) => reason,
        other => panic!("expected malformed error, got {other:?}"),
    }
}

#[test]
fn test_scalar_document_is_malformed() {
    let reason = malformed_reason(serde_json::json!("vm1"));
    assert!(reason.contains("found a string"), "{reason}");
}

#[test]
fn test_mapping_without_range_key_is_malformed() {
    let reason = malformed_reason(serde_json::json!({"vms": []}));
    assert!(reason.contains("no `ludus` key"), "{reason}");
}

#[test]
fn test_range_key_must_hold_list() {
    let reason = malformed_reason(serde_json::json!({"ludus": {"vm_name": "vm1"}}));
    assert!(reason.contains("must be a list"), "{reason}");
}

#[test]
fn test_missing_vm_name_is_malformed() {
    let reason = malformed_reason(serde_json::json!([{"vm_name": "ok"}, {"roles": []}]));
    assert!(reason.starts_with("VM record #1"), "{reason}");
}

#[test]
fn test_non_string_non_mapping_role_is_malformed() {
    let reason = malformed_reason(serde_json::json!([{"vm_name": "vm1", "roles": [42]}]));
    assert!(reason.starts_with("VM record #0"), "{reason}");
}

#[test]
fn test_dependency_without_role_is_malformed() {
    malformed_reason(serde_json::json!([
        {"vm_name": "vm1", "roles": [{"name": "app", "depends_on": [{"vm_name": "vm2"}]}]}
    ]));
}

#[test]
fn test_empty_names_are_malformed() {
    let reason = malformed_reason(serde_json::json!([{"vm_name": " ", "roles": []}]));
    assert!(reason.contains("empty vm_name"), "{reason}");

    let reason = malformed_reason(serde_json::json!([{"vm_name": "vm1", "roles": [""]}]));
    assert!(reason.contains("empty name"), "{reason}");

    let reason = malformed_reason(serde_json::json!([
        {"vm_name": "vm1", "roles": [{"name": "app", "depends_on": [{"vm_name": "", "role": "db"}]}]}
    ]));
    assert!(reason.contains("depends_on"), "{reason}");
}

#[test]
fn test_syntax_errors_are_not_malformed() {
    assert!(matches!(
        RangeConfig::from_json_str("[{"),
        Err(RangeConfigError::JsonParseError { .. })
    ));
    assert!(matches!(
        RangeConfig::from_yaml_str("ludus: [unclosed"),
        Err(RangeConfigError::YamlParseError { .. })
    ));
}
