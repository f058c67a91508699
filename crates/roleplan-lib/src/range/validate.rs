//! Pre-deploy checks over a range config
//!
//! Collects everything worth telling the user in one pass: nodes that are
//! silently overwritten, roles that are not installed, and whether the role
//! graph resolves at all.

use super::config::RangeConfig;
use crate::resolver::{NodeId, ResolveError, RoleGraph, topological_sort};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A role name referenced by the config but absent from the known set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole {
    pub role: String,
    /// Node that applies the role, or that depends on it
    pub referenced_by: NodeId,
}

/// Result of [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes declared more than once; the last declaration wins
    pub overwritten: Vec<NodeId>,
    pub unknown_roles: Vec<UnknownRole>,
    pub resolution: Result<usize, ResolveError>,
}

impl ValidationReport {
    /// No errors; overwritten nodes are warnings only
    pub fn is_ok(&self) -> bool {
        self.unknown_roles.is_empty() && self.resolution.is_ok()
    }

    pub fn has_warnings(&self) -> bool {
        !self.overwritten.is_empty()
    }
}

/// Check `config`; `known_roles` enables the installed-role check when given
pub fn validate(config: &RangeConfig, known_roles: Option<&BTreeSet<String>>) -> ValidationReport {
    let graph = RoleGraph::build(&config.vms);

    for node in graph.overwritten() {
        warn!(node = %node, "Role declared more than once on the same VM, keeping the last declaration");
    }

    let unknown_roles = known_roles
        .map(|known| find_unknown_roles(config, known))
        .unwrap_or_default();

    let resolution = topological_sort(&graph).map(|order| order.len());

    debug!(
        nodes = graph.node_count(),
        unknown_roles = unknown_roles.len(),
        resolved = resolution.is_ok(),
        "Validated range config"
    );

    ValidationReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        overwritten: graph.overwritten().to_vec(),
        unknown_roles,
        resolution,
    }
}

/// Each missing role is reported once, at its first reference
fn find_unknown_roles(config: &RangeConfig, known: &BTreeSet<String>) -> Vec<UnknownRole> {
    let mut reported = BTreeSet::new();
    let mut unknown = Vec::new();

    let mut check = |role: &str, referenced_by: &NodeId| {
        if !known.contains(role) && reported.insert(role.to_string()) {
            unknown.push(UnknownRole {
                role: role.to_string(),
                referenced_by: referenced_by.clone(),
            });
        }
    };

    for vm in &config.vms {
        for role in &vm.roles {
            let node = NodeId::new(&vm.vm_name, role.name());
            check(role.name(), &node);
            for dep in role.depends_on() {
                check(&dep.role, &node);
            }
        }
    }

    unknown
}

#[cfg(test)]
mod tests {
    include!("validate.test.rs");
}
