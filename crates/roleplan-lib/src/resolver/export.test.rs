use super::*;
use crate::range::VmRecord;

fn view(vms: &[VmRecord]) -> DependencyView {
    DependencyView::from_graph(&RoleGraph::build(vms))
}

#[test]
fn test_view_mirrors_registered_nodes_and_edges() {
    let view = view(&[
        VmRecord::new("vm1").with_role("base"),
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
    ]);

    assert_eq!(view.node_count(), 2);
    assert_eq!(view.edge_count(), 1);
    assert!(view.dangling().is_empty());
}

#[test]
fn test_dangling_references_are_collected() {
    let view = view(&[VmRecord::new("vm1").with_dependent_role("app", &[("vm9", "ghost")])]);

    assert_eq!(view.edge_count(), 0);
    assert_eq!(
        view.dangling(),
        &[(NodeId::new("vm1", "app"), NodeId::new("vm9", "ghost"))]
    );
}

#[test]
fn test_dot_edges_point_from_dependency_to_dependent() {
    let dot = view(&[
        VmRecord::new("vm2").with_dependent_role("app", &[("vm1", "base")]),
        VmRecord::new("vm1").with_role("base"),
    ])
    .to_dot();

    assert!(dot.contains("label = \"vm2:app\""), "{dot}");
    assert!(dot.contains("label = \"vm1:base\""), "{dot}");
    assert!(dot.contains("1 -> 0"), "{dot}");
}

#[test]
fn test_cyclic_graph_still_renders() {
    let dot = view(&[VmRecord::new("vm1").with_dependent_role("roleA", &[("vm1", "roleA")])]).to_dot();
    assert!(dot.contains("0 -> 0"), "{dot}");
}
