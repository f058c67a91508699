use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of provisioning work: a role applied to a VM
///
/// Ordering is lexicographic by `(vm_name, role_name)`, which is the order the
/// sorter walks dependency lists in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub vm_name: String,
    pub role_name: String,
}

impl NodeId {
    pub fn new(vm_name: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            vm_name: vm_name.into(),
            role_name: role_name.into(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vm_name, self.role_name)
    }
}

impl From<(&str, &str)> for NodeId {
    fn from((vm_name, role_name): (&str, &str)) -> Self {
        Self::new(vm_name, role_name)
    }
}
