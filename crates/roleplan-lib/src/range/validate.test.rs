use super::*;
use crate::range::VmRecord;

fn known(roles: &[&str]) -> BTreeSet<String> {
    roles.iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_clean_config_passes() {
    let config = RangeConfig::new(vec![
        VmRecord::new("vm1").with_role("base"),
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
    ])
    .unwrap();

    let report = validate(&config, Some(&known(&["base", "app"])));
    assert!(report.is_ok());
    assert!(!report.has_warnings());
    assert_eq!(report.node_count, 2);
    assert_eq!(report.edge_count, 1);
    assert_eq!(report.resolution, Ok(2));
}

#[test]
fn test_unknown_roles_reported_once_at_first_reference() {
    let config = RangeConfig::new(vec![
        VmRecord::new("vm1").with_role("custom"),
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "custom")]),
        VmRecord::new("vm3").with_role("custom"),
    ])
    .unwrap();

    let report = validate(&config, Some(&known(&["app"])));
    assert!(!report.is_ok());
    assert_eq!(
        report.unknown_roles,
        vec![UnknownRole {
            role: "custom".to_string(),
            referenced_by: NodeId::new("vm1", "custom"),
        }]
    );
}

#[test]
fn test_dependency_target_role_is_checked() {
    let config = RangeConfig::new(vec![
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "db")]),
        VmRecord::new("vm1").with_role("db"),
    ])
    .unwrap();

    let report = validate(&config, Some(&known(&["app"])));
    assert_eq!(report.unknown_roles.len(), 1);
    assert_eq!(report.unknown_roles[0].role, "db");
    assert_eq!(report.unknown_roles[0].referenced_by, NodeId::new("vm2", "app"));
}

#[test]
fn test_no_known_roles_skips_role_check() {
    let config = RangeConfig::new(vec![VmRecord::new("vm1").with_role("anything")]).unwrap();
    let report = validate(&config, None);
    assert!(report.unknown_roles.is_empty());
    assert!(report.is_ok());
}

#[test]
fn test_overwritten_nodes_are_warnings() {
    let config = RangeConfig::new(vec![
        VmRecord::new("vm1").with_role("base").with_role("base"),
    ])
    .unwrap();

    let report = validate(&config, None);
    assert!(report.is_ok());
    assert!(report.has_warnings());
    assert_eq!(report.overwritten, vec![NodeId::new("vm1", "base")]);
}

#[test]
fn test_resolution_failure_is_an_error() {
    let config = RangeConfig::new(vec![
        VmRecord::new("vm1").with_dependent_role("app", &[("vm9", "ghost")]),
    ])
    .unwrap();

    let report = validate(&config, None);
    assert!(!report.is_ok());
    assert_eq!(
        report.resolution,
        Err(ResolveError::DependencyNotFound {
            node: NodeId::new("vm1", "app")
        })
    );
}
