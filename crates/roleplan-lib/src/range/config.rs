//! Range config documents: VM records and their role entries
//!
//! A document is either the VM record list itself or a mapping holding that
//! list under `ludus`. Other VM fields (hostname, template, vlan, ...) belong
//! to other tooling and are ignored here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Key holding the VM list in a full range config file
pub const RANGE_KEY: &str = "ludus";

/// Range config loading errors
#[derive(Debug, Error)]
pub enum RangeConfigError {
    #[error("Failed to read range config: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {reason}")]
    YamlParseError { reason: String },

    #[error("Failed to parse JSON: {source}")]
    JsonParseError { source: serde_json::Error },

    #[error("Malformed range config: {reason}")]
    Malformed { reason: String },
}

/// One VM and the roles applied to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRecord {
    pub vm_name: String,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
}

/// A role applied to a VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleEntry {
    /// Bare role name, no dependencies
    Name(String),
    /// Role with declared dependencies
    Detailed(RoleSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    #[serde(default)]
    pub depends_on: Vec<DependencyRef>,
}

/// Reference to a role on another (or the same) VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
    pub vm_name: String,
    pub role: String,
}

impl RoleEntry {
    pub fn name(&self) -> &str {
        match self {
            RoleEntry::Name(name) => name,
            RoleEntry::Detailed(spec) => &spec.name,
        }
    }

    pub fn depends_on(&self) -> &[DependencyRef] {
        match self {
            RoleEntry::Name(_) => &[],
            RoleEntry::Detailed(spec) => &spec.depends_on,
        }
    }
}

impl VmRecord {
    pub fn new(vm_name: impl Into<String>) -> Self {
        Self {
            vm_name: vm_name.into(),
            roles: Vec::new(),
        }
    }

    /// Add a bare role
    pub fn with_role(mut self, name: impl Into<String>) -> Self {
        self.roles.push(RoleEntry::Name(name.into()));
        self
    }

    /// Add a role depending on `(vm_name, role)` pairs
    pub fn with_dependent_role(mut self, name: impl Into<String>, depends_on: &[(&str, &str)]) -> Self {
        self.roles.push(RoleEntry::Detailed(RoleSpec {
            name: name.into(),
            depends_on: depends_on
                .iter()
                .map(|(vm_name, role)| DependencyRef {
                    vm_name: vm_name.to_string(),
                    role: role.to_string(),
                })
                .collect(),
        }));
        self
    }
}

/// Parsed and shape-checked VM record list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub vms: Vec<VmRecord>,
}

impl RangeConfig {
    pub fn new(vms: Vec<VmRecord>) -> Result<Self, RangeConfigError> {
        let config = Self { vms };
        config.check_names()?;
        Ok(config)
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self, RangeConfigError> {
        trace!("Loading range config: {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| RangeConfigError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        debug!(
            path = %path.display(),
            vms = config.vms.len(),
            "Loaded range config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RangeConfigError> {
        let value: Value =
            serde_saphyr::from_str(content).map_err(|e| RangeConfigError::YamlParseError {
                reason: e.to_string(),
            })?;
        Self::from_value(value)
    }

    pub fn from_json_str(content: &str) -> Result<Self, RangeConfigError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| RangeConfigError::JsonParseError { source: e })?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed document
    pub fn from_value(value: Value) -> Result<Self, RangeConfigError> {
        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut map) => match map.remove(RANGE_KEY) {
                Some(Value::Array(records)) => records,
                Some(other) => {
                    return Err(RangeConfigError::Malformed {
                        reason: format!("`{RANGE_KEY}` must be a list, found {}", kind(&other)),
                    });
                }
                None => {
                    return Err(RangeConfigError::Malformed {
                        reason: format!("mapping has no `{RANGE_KEY}` key"),
                    });
                }
            },
            other => {
                return Err(RangeConfigError::Malformed {
                    reason: format!(
                        "expected a list of VM records or a mapping with a `{RANGE_KEY}` key, found {}",
                        kind(&other)
                    ),
                });
            }
        };

        let vms = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                serde_json::from_value::<VmRecord>(record).map_err(|e| {
                    RangeConfigError::Malformed {
                        reason: format!("VM record #{position}: {e}"),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(vms)
    }

    fn check_names(&self) -> Result<(), RangeConfigError> {
        for (position, vm) in self.vms.iter().enumerate() {
            if vm.vm_name.trim().is_empty() {
                return Err(RangeConfigError::Malformed {
                    reason: format!("VM record #{position} has an empty vm_name"),
                });
            }
            for role in &vm.roles {
                if role.name().trim().is_empty() {
                    return Err(RangeConfigError::Malformed {
                        reason: format!("VM '{}' has a role with an empty name", vm.vm_name),
                    });
                }
                for dep in role.depends_on() {
                    if dep.vm_name.trim().is_empty() || dep.role.trim().is_empty() {
                        return Err(RangeConfigError::Malformed {
                            reason: format!(
                                "role '{}' on VM '{}' has a depends_on entry with an empty vm_name or role",
                                role.name(),
                                vm.vm_name
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
