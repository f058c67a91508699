//! Deterministic topological sort over a [`RoleGraph`]
//!
//! Iterative depth-first search with three marks per node. Each stack frame
//! holds a node slot, its dependencies sorted by `(vm_name, role_name)` and a
//! cursor into that list, so chain length is bounded by heap, not call stack.

use super::ResolveError;
use super::graph::RoleGraph;
use super::node::NodeId;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

struct Frame {
    slot: usize,
    dependencies: Vec<Option<usize>>,
    cursor: usize,
}

impl Frame {
    fn enter(graph: &RoleGraph, slot: usize) -> Self {
        Self {
            slot,
            dependencies: graph.sorted_dependency_slots(slot),
            cursor: 0,
        }
    }
}

/// Order every node of `graph` so dependencies come before dependents
///
/// Roots are taken in node insertion order; dependencies are explored in
/// sorted order and emitted post-order. The first cycle or dangling reference
/// aborts the whole sort.
pub fn topological_sort(graph: &RoleGraph) -> Result<Vec<NodeId>, ResolveError> {
    let node_count = graph.node_count();
    let mut marks = vec![Mark::Unvisited; node_count];
    let mut order = Vec::with_capacity(node_count);
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..node_count {
        if marks[root] == Mark::Done {
            continue;
        }

        trace!(root = %graph.node(root), "Starting traversal");
        marks[root] = Mark::InProgress;
        stack.push(Frame::enter(graph, root));

        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.dependencies.get(frame.cursor) else {
                let slot = frame.slot;
                stack.pop();
                marks[slot] = Mark::Done;
                order.push(graph.node(slot).clone());
                continue;
            };
            frame.cursor += 1;

            let Some(dependency) = next else {
                return Err(ResolveError::DependencyNotFound {
                    node: graph.node(frame.slot).clone(),
                });
            };

            match marks[dependency] {
                Mark::InProgress => {
                    return Err(ResolveError::CircularDependency {
                        node: graph.node(dependency).clone(),
                    });
                }
                Mark::Done => {}
                Mark::Unvisited => {
                    marks[dependency] = Mark::InProgress;
                    stack.push(Frame::enter(graph, dependency));
                }
            }
        }
    }

    debug!(nodes = order.len(), "Topological sort complete");
    Ok(order)
}

#[cfg(test)]
mod tests {
    include!("sort.test.rs");
}
