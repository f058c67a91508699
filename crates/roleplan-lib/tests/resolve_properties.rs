use roleplan_lib::range::{DependencyRef, RangeConfig, RoleEntry, RoleSpec, VmRecord};
use roleplan_lib::resolver::{NodeId, ResolveError, resolve};
use std::collections::HashSet;

/// Layered lab range: every role depends on a few roles of the previous layer
fn layered_range(layers: usize, width: usize) -> Vec<VmRecord> {
    let mut vms = Vec::new();
    for layer in 0..layers {
        let mut vm = VmRecord::new(format!("layer{layer}"));
        for slot in 0..width {
            let depends_on = if layer == 0 {
                vec![]
            } else {
                (0..width)
                    .filter(|dep| (dep + slot) % 3 != 0)
                    .map(|dep| DependencyRef {
                        vm_name: format!("layer{}", layer - 1),
                        role: format!("role{dep}"),
                    })
                    .collect()
            };
            vm.roles.push(RoleEntry::Detailed(RoleSpec {
                name: format!("role{slot}"),
                depends_on,
            }));
        }
        vms.push(vm);
    }
    vms
}

fn assert_valid_order(vms: &[VmRecord], order: &[NodeId]) {
    let declared: HashSet<NodeId> = vms
        .iter()
        .flat_map(|vm| vm.roles.iter().map(|r| NodeId::new(&vm.vm_name, r.name())))
        .collect();
    let emitted: HashSet<NodeId> = order.iter().cloned().collect();

    assert_eq!(order.len(), emitted.len(), "every node exactly once");
    assert_eq!(emitted, declared, "order is a permutation of the node set");

    let position = |node: &NodeId| order.iter().position(|n| n == node).unwrap();
    for vm in vms {
        for role in &vm.roles {
            let dependent = NodeId::new(&vm.vm_name, role.name());
            for dep in role.depends_on() {
                let dependency = NodeId::new(&dep.vm_name, &dep.role);
                assert!(
                    position(&dependency) < position(&dependent),
                    "{dependency} must precede {dependent}"
                );
            }
        }
    }
}

#[test]
fn acyclic_range_produces_valid_permutation() {
    let vms = layered_range(5, 6);
    let resolution = resolve(&vms).unwrap();
    assert_valid_order(&vms, &resolution.order);
}

#[test]
fn layers_declared_in_reverse_still_resolve() {
    let mut vms = layered_range(4, 5);
    vms.reverse();
    let resolution = resolve(&vms).unwrap();
    assert_valid_order(&vms, &resolution.order);
}

#[test]
fn resolution_is_deterministic_across_runs() {
    let vms = layered_range(4, 4);
    let first = resolve(&vms).unwrap();
    for _ in 0..5 {
        assert_eq!(resolve(&vms).unwrap(), first);
    }
}

#[test]
fn depends_on_declaration_order_does_not_change_result() {
    let vms = layered_range(4, 5);
    let mut shuffled = vms.clone();
    for vm in &mut shuffled {
        for role in &mut vm.roles {
            if let RoleEntry::Detailed(spec) = role {
                spec.depends_on.reverse();
                let len = spec.depends_on.len();
                if len > 1 {
                    spec.depends_on.rotate_left(len / 2);
                }
            }
        }
    }

    assert_eq!(resolve(&vms).unwrap(), resolve(&shuffled).unwrap());
}

#[test]
fn independent_roles_keep_declaration_order() {
    let vms = vec![
        VmRecord::new("kali").with_role("tools"),
        VmRecord::new("dc01").with_role("ad_forest").with_role("adcs"),
        VmRecord::new("win10").with_role("sysmon"),
    ];

    let order: Vec<String> = resolve(&vms)
        .unwrap()
        .order
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        order,
        vec!["kali:tools", "dc01:ad_forest", "dc01:adcs", "win10:sysmon"]
    );
}

#[test]
fn cycle_anywhere_fails_whole_resolution() {
    let mut vms = layered_range(3, 3);
    vms.push(
        VmRecord::new("loop")
            .with_dependent_role("a", &[("loop", "b")])
            .with_dependent_role("b", &[("loop", "a")]),
    );

    assert_eq!(
        resolve(&vms).unwrap_err(),
        ResolveError::CircularDependency {
            node: NodeId::new("loop", "a")
        }
    );
}

#[test]
fn spec_example_from_yaml() {
    let config = RangeConfig::from_yaml_str(
        r#"
- vm_name: vm1
  roles: [base]
- vm_name: vm2
  roles:
    - name: app
      depends_on: [{vm_name: vm1, role: base}]
"#,
    )
    .unwrap();

    let resolution = resolve(&config.vms).unwrap();
    assert_eq!(
        resolution.order,
        vec![NodeId::new("vm1", "base"), NodeId::new("vm2", "app")]
    );
}
