//! Role dependency resolution
//!
//! Turns range config VM records into a single deterministic provisioning
//! order in which every role runs after the roles it depends on.
//!
//! - [`graph`] - node arena and adjacency relation built from VM records
//! - [`sort`] - iterative three-mark depth-first topological sort
//! - [`export`] - petgraph view of a built graph for DOT rendering

pub mod export;
pub mod graph;
pub mod node;
pub mod sort;

pub use export::DependencyView;
pub use graph::RoleGraph;
pub use node::NodeId;
pub use sort::topological_sort;

use crate::range::VmRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resolution failures
///
/// The `Display` output of each variant is the diagnostic handed to the
/// provisioning driver verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A node was re-entered while still on the traversal path
    #[error("ERROR: Circular dependency found for {node}")]
    CircularDependency { node: NodeId },

    /// `node` declares a dependency on a node that was never registered
    #[error("ERROR: Dependency not found {node}")]
    DependencyNotFound { node: NodeId },
}

impl ResolveError {
    /// The node named by the diagnostic
    pub fn node(&self) -> &NodeId {
        match self {
            ResolveError::CircularDependency { node } | ResolveError::DependencyNotFound { node } => {
                node
            }
        }
    }
}

/// Successful resolution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub order: Vec<NodeId>,
}

impl Resolution {
    /// Keep only entries whose role is in `roles`, preserving order
    ///
    /// An empty filter keeps everything.
    pub fn retain_roles<S: AsRef<str>>(mut self, roles: &[S]) -> Self {
        if roles.is_empty() {
            return self;
        }
        self.order
            .retain(|node| roles.iter().any(|role| role.as_ref() == node.role_name));
        self
    }

    /// Position of `node` in the order
    pub fn position(&self, node: &NodeId) -> Option<usize> {
        self.order.iter().position(|n| n == node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Build the graph for `vms` and sort it
pub fn resolve(vms: &[VmRecord]) -> Result<Resolution, ResolveError> {
    let graph = RoleGraph::build(vms);
    let order = topological_sort(&graph)?;
    Ok(Resolution { order })
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
