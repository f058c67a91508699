// Tests for the topological sorter

use super::*;
use crate::range::VmRecord;

fn node(vm: &str, role: &str) -> NodeId {
    NodeId::new(vm, role)
}

fn sort(vms: &[VmRecord]) -> Result<Vec<NodeId>, ResolveError> {
    topological_sort(&RoleGraph::build(vms))
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_empty_graph_sorts_to_empty_order() {
    assert!(sort(&[]).unwrap().is_empty());
}

#[test]
fn test_independent_nodes_keep_insertion_order() {
    let vms = vec![
        VmRecord::new("vm2").with_role("b"),
        VmRecord::new("vm1").with_role("a").with_role("c"),
    ];
    assert_eq!(
        sort(&vms).unwrap(),
        vec![node("vm2", "b"), node("vm1", "a"), node("vm1", "c")]
    );
}

#[test]
fn test_dependency_declared_later_is_pulled_forward() {
    let vms = vec![
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
        VmRecord::new("vm1").with_role("base"),
    ];
    assert_eq!(
        sort(&vms).unwrap(),
        vec![node("vm1", "base"), node("vm2", "app")]
    );
}

#[test]
fn test_dependencies_explored_in_sorted_order() {
    // Declared z-first, explored a-first
    let vms = vec![
        VmRecord::new("top").with_dependent_role("app", &[("z", "r"), ("a", "r"), ("m", "r")]),
        VmRecord::new("z").with_role("r"),
        VmRecord::new("m").with_role("r"),
        VmRecord::new("a").with_role("r"),
    ];
    assert_eq!(
        sort(&vms).unwrap(),
        vec![node("a", "r"), node("m", "r"), node("z", "r"), node("top", "app")]
    );
}

#[test]
fn test_diamond_emits_shared_dependency_once() {
    let vms = vec![
        VmRecord::new("web").with_dependent_role("site", &[("app", "api"), ("app", "worker")]),
        VmRecord::new("app")
            .with_dependent_role("api", &[("db", "postgres")])
            .with_dependent_role("worker", &[("db", "postgres")]),
        VmRecord::new("db").with_role("postgres"),
    ];
    assert_eq!(
        sort(&vms).unwrap(),
        vec![
            node("db", "postgres"),
            node("app", "api"),
            node("app", "worker"),
            node("web", "site"),
        ]
    );
}

#[test]
fn test_duplicate_dependency_entries_are_harmless() {
    let vms = vec![
        VmRecord::new("vm1").with_role("base"),
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base"), ("vm1", "base")]),
    ];
    assert_eq!(
        sort(&vms).unwrap(),
        vec![node("vm1", "base"), node("vm2", "app")]
    );
}

#[test]
fn test_long_chain_does_not_exhaust_call_stack() {
    let depth = 50_000;
    let mut vms = vec![VmRecord::new("vm").with_role("r00000")];
    for i in 1..depth {
        let prev = format!("r{:05}", i - 1);
        vms.push(VmRecord::new("vm").with_dependent_role(format!("r{i:05}"), &[("vm", prev.as_str())]));
    }
    // Reverse so every root has to walk the whole remaining chain first
    vms.reverse();

    let order = sort(&vms).unwrap();
    assert_eq!(order.len(), depth);
    assert_eq!(order[0], node("vm", "r00000"));
    assert_eq!(order[depth - 1], node("vm", &format!("r{:05}", depth - 1)));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_self_dependency_is_a_cycle() {
    let vms = vec![VmRecord::new("vm1").with_dependent_role("roleA", &[("vm1", "roleA")])];
    assert_eq!(
        sort(&vms).unwrap_err(),
        ResolveError::CircularDependency {
            node: node("vm1", "roleA")
        }
    );
}

#[test]
fn test_mutual_cycle_names_first_reentered_node() {
    let vms = vec![
        VmRecord::new("vm1").with_dependent_role("roleA", &[("vm2", "roleB")]),
        VmRecord::new("vm2").with_dependent_role("roleB", &[("vm1", "roleA")]),
    ];
    let err = sort(&vms).unwrap_err();
    assert_eq!(err.node(), &node("vm1", "roleA"));
    assert_eq!(err.to_string(), "ERROR: Circular dependency found for vm1:roleA");
}

#[test]
fn test_cycle_names_reentry_point_not_root() {
    // root -> b -> c -> b: b is re-entered, root is not part of the cycle
    let vms = vec![
        VmRecord::new("vm").with_dependent_role("root", &[("vm", "b")]),
        VmRecord::new("vm").with_dependent_role("b", &[("vm", "c")]),
        VmRecord::new("vm").with_dependent_role("c", &[("vm", "b")]),
    ];
    assert_eq!(
        sort(&vms).unwrap_err(),
        ResolveError::CircularDependency { node: node("vm", "b") }
    );
}

#[test]
fn test_missing_dependency_names_declaring_node() {
    let vms = vec![VmRecord::new("vm1").with_dependent_role("roleA", &[("vm9", "roleZ")])];
    let err = sort(&vms).unwrap_err();
    assert_eq!(
        err,
        ResolveError::DependencyNotFound {
            node: node("vm1", "roleA")
        }
    );
    assert_eq!(err.to_string(), "ERROR: Dependency not found vm1:roleA");
}

#[test]
fn test_missing_dependency_deep_in_chain_names_its_declarer() {
    let vms = vec![
        VmRecord::new("vm1").with_dependent_role("app", &[("vm2", "db")]),
        VmRecord::new("vm2").with_dependent_role("db", &[("vm3", "storage")]),
    ];
    assert_eq!(
        sort(&vms).unwrap_err(),
        ResolveError::DependencyNotFound { node: node("vm2", "db") }
    );
}

#[test]
fn test_first_failure_in_sorted_order_wins() {
    // ("a","x") sorts before ("z","ghost"): the cycle through a:x is hit first
    let vms = vec![
        VmRecord::new("top").with_dependent_role("app", &[("z", "ghost"), ("a", "x")]),
        VmRecord::new("a").with_dependent_role("x", &[("top", "app")]),
    ];
    assert_eq!(
        sort(&vms).unwrap_err(),
        ResolveError::CircularDependency { node: node("top", "app") }
    );
}
