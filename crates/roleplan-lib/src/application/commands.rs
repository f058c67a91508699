//! Command handlers
//!
//! Every handler writes its result to the supplied writer so the binary can
//! pass stdout and tests can pass a buffer.

use crate::primitives::OutputFormat;
use crate::range::{RangeConfig, ValidationReport, validate};
use crate::resolver::{DependencyView, Resolution, RoleGraph, resolve};
use anyhow::{Context, Result, anyhow};
use console::style;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::{info, info_span};

use super::cli::{CliConfig, Commands};
use super::config::AppConfig;

/// Key of the range config list in module args
pub const MODULE_CONFIG_PARAM: &str = "ludus_config_object";

/// Execute the parsed command against stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(command) = config.command else {
        writeln!(out, "roleplan - role provisioning order for lab ranges")?;
        writeln!(out, "Run 'roleplan --help' for usage information")?;
        return Ok(());
    };

    execute_command_with_output(command, &config.app_config, &mut out)
}

/// Execute a specific command writing to `out` (for testing)
pub fn execute_command_with_output(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let span = info_span!(
        "command",
        config = ?command.config_path()
    );
    let _entered = span.enter();

    match command {
        Commands::Resolve { config: path, only_roles } => {
            handle_resolve(&path, &only_roles, config.output_format, out)
        }
        Commands::Validate {
            config: path,
            known_roles,
        } => handle_validate(&path, &known_roles, out),
        Commands::Graph { config: path } => handle_graph(&path, out),
        Commands::Module { args_file } => handle_module(&args_file, out),
        Commands::Version => {
            writeln!(out, "roleplan {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

fn load_range_config(path: &Path) -> Result<RangeConfig> {
    RangeConfig::load(path)
        .with_context(|| format!("Failed to load range config '{}'", path.display()))
}

fn handle_resolve(
    path: &Path,
    only_roles: &[String],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let range = load_range_config(path)?;

    // Resolution errors propagate bare so the printed diagnostic is exact
    let resolution = resolve(&range.vms)?;
    info!(nodes = resolution.len(), "Resolved provisioning order");

    let resolution = resolution.retain_roles(only_roles);
    write_resolution(&resolution, format, out)
}

/// Render a resolution in the requested format
pub fn write_resolution(
    resolution: &Resolution,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, resolution)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            let rendered = serde_saphyr::to_string(resolution)
                .map_err(|e| anyhow!("Failed to render YAML: {e}"))?;
            write!(out, "{rendered}")?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
        }
        OutputFormat::Text => {
            for node in &resolution.order {
                writeln!(out, "{node}")?;
            }
        }
    }
    Ok(())
}

fn handle_validate(path: &Path, known_roles: &[String], out: &mut dyn Write) -> Result<()> {
    let range = load_range_config(path)?;

    let known: BTreeSet<String> = known_roles.iter().cloned().collect();
    let report = validate(&range, (!known.is_empty()).then_some(&known));

    write_report(&report, out)?;

    match &report.resolution {
        Err(e) => Err(anyhow::Error::new(e.clone())),
        Ok(_) if !report.is_ok() => Err(anyhow!(
            "Validation failed: {} unknown role(s)",
            report.unknown_roles.len()
        )),
        Ok(_) => Ok(()),
    }
}

fn write_report(report: &ValidationReport, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} nodes, {} dependency edges",
        report.node_count, report.edge_count
    )?;

    for node in &report.overwritten {
        writeln!(
            out,
            "{} {node} is declared more than once, the last declaration wins",
            style("warning:").yellow().bold()
        )?;
    }

    for unknown in &report.unknown_roles {
        writeln!(
            out,
            "{} the role '{}' (referenced by {}) is not installed",
            style("error:").red().bold(),
            unknown.role,
            unknown.referenced_by
        )?;
    }

    match &report.resolution {
        Ok(count) => writeln!(
            out,
            "{} {count} roles resolve in a valid order",
            style("ok:").green().bold()
        )?,
        Err(e) => writeln!(out, "{} {e}", style("error:").red().bold())?,
    }

    Ok(())
}

fn handle_graph(path: &Path, out: &mut dyn Write) -> Result<()> {
    let range = load_range_config(path)?;
    let view = DependencyView::from_graph(&RoleGraph::build(&range.vms));
    info!(
        nodes = view.node_count(),
        edges = view.edge_count(),
        dangling = view.dangling().len(),
        "Rendering dependency graph"
    );
    write!(out, "{}", view.to_dot())?;
    Ok(())
}

/// Ansible module protocol: failures are reported in the JSON reply, never as
/// a process error
fn handle_module(args_file: &Path, out: &mut dyn Write) -> Result<()> {
    let reply = match module_reply(args_file) {
        Ok(resolution) => json!({ "changed": false, "order": resolution.order }),
        Err(msg) => json!({ "failed": true, "msg": msg }),
    };
    serde_json::to_writer(&mut *out, &reply)?;
    writeln!(out)?;
    Ok(())
}

fn module_reply(args_file: &Path) -> Result<Resolution, String> {
    let content = std::fs::read_to_string(args_file).map_err(|e| {
        format!(
            "An error occurred: failed to read module args '{}': {e}",
            args_file.display()
        )
    })?;
    let mut args: Value = serde_json::from_str(&content)
        .map_err(|e| format!("An error occurred: invalid module args: {e}"))?;

    let param = match args.get_mut(MODULE_CONFIG_PARAM).map(Value::take) {
        None | Some(Value::Null) => {
            return Err(format!("missing required arguments: {MODULE_CONFIG_PARAM}"));
        }
        Some(value @ Value::Array(_)) => value,
        Some(_) => {
            return Err(format!(
                "argument '{MODULE_CONFIG_PARAM}' must be a list"
            ));
        }
    };

    let range = RangeConfig::from_value(param).map_err(|e| format!("An error occurred: {e}"))?;
    resolve(&range.vms).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
