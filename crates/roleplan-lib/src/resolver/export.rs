//! petgraph view of a [`RoleGraph`] for rendering
//!
//! Edges point from the dependency to the dependent, so reading the DOT output
//! top-down follows provisioning order.

use super::graph::RoleGraph;
use super::node::NodeId;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::warn;

/// Directed graph of registered nodes; edge weight is the declaration position
/// within the dependent's `depends_on` list
pub struct DependencyView {
    graph: DiGraph<NodeId, usize>,
    node_map: HashMap<NodeId, NodeIndex>,
    /// (dependent, missing dependency) pairs that could not become edges
    dangling: Vec<(NodeId, NodeId)>,
}

impl DependencyView {
    pub fn from_graph(role_graph: &RoleGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        let mut dangling = Vec::new();

        for node in role_graph.nodes() {
            let idx = graph.add_node(node.clone());
            node_map.insert(node.clone(), idx);
        }

        for node in role_graph.nodes() {
            let dependent = node_map[node];
            let deps = role_graph.dependencies_of(node).unwrap_or_default();
            for (position, dep) in deps.iter().enumerate() {
                match node_map.get(dep) {
                    Some(&dependency) => {
                        graph.add_edge(dependency, dependent, position);
                    }
                    None => {
                        warn!(node = %node, dependency = %dep, "Skipping dangling dependency");
                        dangling.push((node.clone(), dep.clone()));
                    }
                }
            }
        }

        Self {
            graph,
            node_map,
            dangling,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// References that point at unregistered nodes
    pub fn dangling(&self) -> &[(NodeId, NodeId)] {
        &self.dangling
    }

    /// Graphviz DOT rendering, node labels are `vm:role`
    pub fn to_dot(&self) -> String {
        format!(
            "{}",
            Dot::with_config(&self.graph, &[Config::EdgeNoLabel])
        )
    }
}

#[cfg(test)]
mod tests {
    include!("export.test.rs");
}
