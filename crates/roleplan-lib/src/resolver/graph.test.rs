// Tests for the graph builder

use super::*;

fn node(vm: &str, role: &str) -> NodeId {
    NodeId::new(vm, role)
}

#[test]
fn test_new_graph_is_empty() {
    let graph = RoleGraph::new();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_build_preserves_first_seen_order() {
    let vms = vec![
        VmRecord::new("vm2").with_role("zeta").with_role("alpha"),
        VmRecord::new("vm1").with_role("base"),
    ];

    let graph = RoleGraph::build(&vms);
    assert_eq!(
        graph.nodes(),
        &[node("vm2", "zeta"), node("vm2", "alpha"), node("vm1", "base")]
    );
}

#[test]
fn test_bare_roles_have_empty_dependency_lists() {
    let vms = vec![VmRecord::new("vm1").with_role("base")];
    let graph = RoleGraph::build(&vms);

    assert_eq!(graph.dependencies_of(&node("vm1", "base")), Some(&[][..]));
    assert_eq!(graph.dependencies_of(&node("vm1", "missing")), None);
}

#[test]
fn test_dependencies_keep_declaration_order() {
    let vms = vec![VmRecord::new("vm1").with_dependent_role(
        "app",
        &[("vm3", "db"), ("vm2", "cache"), ("vm3", "auth")],
    )];
    let graph = RoleGraph::build(&vms);

    assert_eq!(
        graph.dependencies_of(&node("vm1", "app")).unwrap(),
        &[node("vm3", "db"), node("vm2", "cache"), node("vm3", "auth")]
    );
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_dangling_dependency_is_recorded_not_registered() {
    let vms = vec![VmRecord::new("vm1").with_dependent_role("app", &[("vm9", "ghost")])];
    let graph = RoleGraph::build(&vms);

    assert_eq!(graph.node_count(), 1);
    assert!(!graph.contains(&node("vm9", "ghost")));
    assert_eq!(graph.sorted_dependency_slots(0), vec![None]);
}

#[test]
fn test_duplicate_node_last_write_wins_and_keeps_slot() {
    let vms = vec![
        VmRecord::new("vm1")
            .with_dependent_role("app", &[("vm2", "db")])
            .with_role("base"),
        VmRecord::new("vm2").with_role("db"),
        VmRecord::new("vm1").with_role("app"),
    ];
    let graph = RoleGraph::build(&vms);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.slot_of(&node("vm1", "app")), Some(0));
    assert_eq!(graph.dependencies_of(&node("vm1", "app")), Some(&[][..]));
    assert_eq!(graph.overwritten(), &[node("vm1", "app")]);
}

#[test]
fn test_duplicate_node_later_dependencies_replace_earlier() {
    let vms = vec![
        VmRecord::new("vm1")
            .with_dependent_role("app", &[("vm1", "base")])
            .with_role("base")
            .with_dependent_role("app", &[("vm1", "cache")])
            .with_role("cache"),
    ];
    let graph = RoleGraph::build(&vms);

    assert_eq!(
        graph.dependencies_of(&node("vm1", "app")).unwrap(),
        &[node("vm1", "cache")]
    );
}

#[test]
fn test_sorted_dependency_slots_are_lexicographic() {
    let vms = vec![
        VmRecord::new("b").with_role("x"),
        VmRecord::new("a").with_role("z").with_role("y"),
        VmRecord::new("c").with_dependent_role("top", &[("b", "x"), ("a", "z"), ("a", "y")]),
    ];
    let graph = RoleGraph::build(&vms);
    let top = graph.slot_of(&node("c", "top")).unwrap();

    let slots = graph.sorted_dependency_slots(top);
    let names: Vec<&NodeId> = slots.iter().map(|s| graph.node(s.unwrap())).collect();
    assert_eq!(names, vec![&node("a", "y"), &node("a", "z"), &node("b", "x")]);
}
