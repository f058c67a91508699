//! Graph builder: range config VM records into an ordered node arena
//!
//! Nodes live in a `Vec` in first-seen order and are addressed by their slot
//! index; a side map resolves `NodeId` to slot. Dependency lists keep
//! declaration order, the sorter sorts them when it walks them.

use super::node::NodeId;
use crate::range::VmRecord;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Node set plus adjacency relation for one resolution call
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    /// Node arena in insertion order
    nodes: Vec<NodeId>,
    /// Map from node to arena slot
    index: HashMap<NodeId, usize>,
    /// Declared dependencies per arena slot
    dependencies: Vec<Vec<NodeId>>,
    /// Nodes registered more than once (later registration won)
    overwritten: Vec<NodeId>,
}

impl RoleGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from VM records in declaration order
    pub fn build(vms: &[VmRecord]) -> Self {
        let mut graph = Self::new();

        for vm in vms {
            for role in &vm.roles {
                let slot = graph.register(NodeId::new(&vm.vm_name, role.name()));
                for dep in role.depends_on() {
                    graph.push_dependency(slot, NodeId::new(&dep.vm_name, &dep.role));
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            overwritten = graph.overwritten.len(),
            "Built role dependency graph"
        );
        graph
    }

    /// Register a node, returning its slot
    ///
    /// A node seen before keeps its original slot but its dependency list is
    /// cleared, so the later declaration wins.
    pub fn register(&mut self, node: NodeId) -> usize {
        if let Some(&slot) = self.index.get(&node) {
            trace!(node = %node, "Node registered again, resetting dependencies");
            self.dependencies[slot].clear();
            self.overwritten.push(node);
            return slot;
        }

        let slot = self.nodes.len();
        self.index.insert(node.clone(), slot);
        self.nodes.push(node);
        self.dependencies.push(Vec::new());
        slot
    }

    /// Record that the node in `slot` depends on `dependency`
    ///
    /// The target does not have to be registered; dangling references are
    /// reported when the graph is sorted.
    pub fn push_dependency(&mut self, slot: usize, dependency: NodeId) {
        trace!(node = %self.nodes[slot], dependency = %dependency, "Adding dependency edge");
        self.dependencies[slot].push(dependency);
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared dependency edges (dangling ones included)
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// Arena slot of a node, if registered
    pub fn slot_of(&self, node: &NodeId) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Node stored in `slot`
    pub fn node(&self, slot: usize) -> &NodeId {
        &self.nodes[slot]
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Declared dependencies of a node, in declaration order
    pub fn dependencies_of(&self, node: &NodeId) -> Option<&[NodeId]> {
        self.slot_of(node).map(|slot| self.dependencies[slot].as_slice())
    }

    /// Dependencies of `slot` sorted by `(vm_name, role_name)`, as arena slots
    ///
    /// `None` entries are references to nodes that were never registered.
    pub(crate) fn sorted_dependency_slots(&self, slot: usize) -> Vec<Option<usize>> {
        let mut deps: Vec<&NodeId> = self.dependencies[slot].iter().collect();
        deps.sort();
        deps.into_iter().map(|dep| self.slot_of(dep)).collect()
    }

    /// Nodes that were declared more than once, in the order the repeats were seen
    pub fn overwritten(&self) -> &[NodeId] {
        &self.overwritten
    }
}

#[cfg(test)]
mod tests {
    include!("graph.test.rs");
}
