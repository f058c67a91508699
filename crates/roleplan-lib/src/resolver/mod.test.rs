use super::*;

#[test]
fn test_resolve_spec_example() {
    let vms = vec![
        VmRecord::new("vm1").with_role("base"),
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
    ];

    let resolution = resolve(&vms).unwrap();
    assert_eq!(
        serde_json::to_value(&resolution).unwrap(),
        serde_json::json!({
            "order": [
                {"vm_name": "vm1", "role_name": "base"},
                {"vm_name": "vm2", "role_name": "app"}
            ]
        })
    );
}

#[test]
fn test_retain_roles_filters_and_keeps_order() {
    let resolution = Resolution {
        order: vec![
            NodeId::new("dc", "ad"),
            NodeId::new("web", "iis"),
            NodeId::new("web2", "iis"),
            NodeId::new("web", "monitoring"),
        ],
    };

    let filtered = resolution.clone().retain_roles(&["iis"]);
    assert_eq!(
        filtered.order,
        vec![NodeId::new("web", "iis"), NodeId::new("web2", "iis")]
    );

    let unfiltered = resolution.clone().retain_roles::<&str>(&[]);
    assert_eq!(unfiltered, resolution);
}

#[test]
fn test_position_lookup() {
    let resolution = Resolution {
        order: vec![NodeId::new("a", "x"), NodeId::new("b", "y")],
    };
    assert_eq!(resolution.position(&NodeId::new("b", "y")), Some(1));
    assert_eq!(resolution.position(&NodeId::new("c", "z")), None);
    assert_eq!(resolution.len(), 2);
    assert!(!resolution.is_empty());
}

#[test]
fn test_node_display_and_ordering() {
    let node = NodeId::from(("vm1", "roleA"));
    assert_eq!(node.to_string(), "vm1:roleA");

    // vm_name compares first, then role_name
    assert!(NodeId::new("a", "z") < NodeId::new("b", "a"));
    assert!(NodeId::new("a", "a") < NodeId::new("a", "b"));
}

#[test]
fn test_resolve_errors_propagate() {
    let vms = vec![VmRecord::new("vm1").with_dependent_role("roleA", &[("vm1", "roleA")])];
    assert_eq!(
        resolve(&vms).unwrap_err().to_string(),
        "ERROR: Circular dependency found for vm1:roleA"
    );
}
