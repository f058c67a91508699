//! Range config input handling
//!
//! Loading and shape validation of the VM/role list that feeds the resolver.
//! Everything here runs before a graph is built, so its errors never mix with
//! resolution failures.

pub mod config;
pub mod validate;

pub use config::{DependencyRef, RangeConfig, RangeConfigError, RoleEntry, RoleSpec, VmRecord};
pub use validate::{UnknownRole, ValidationReport, validate};
