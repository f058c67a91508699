//! E2E tests for the resolve command against range config fixtures

use roleplan_lib::application::{AppConfig, Commands};
use roleplan_lib::primitives::OutputFormat;
use roleplan_lib::resolver::{NodeId, Resolution};
use roleplan_tests::{fixture_path, load_fixture, run_command};
use std::fs;
use tempfile::TempDir;

fn resolve_command(fixture: &str, only_roles: &[&str]) -> Commands {
    Commands::Resolve {
        config: fixture_path(fixture),
        only_roles: only_roles.iter().map(|r| r.to_string()).collect(),
    }
}

fn with_format(output_format: OutputFormat) -> AppConfig {
    AppConfig {
        output_format,
        ..AppConfig::default()
    }
}

fn ad_lab_order() -> Vec<NodeId> {
    vec![
        NodeId::new("{{ range_id }}-ad-dc-win2022-server-x64", "ludus_adcs"),
        NodeId::new("{{ range_id }}-sccm", "ludus_sccm_site"),
        NodeId::new("{{ range_id }}-ad-win11-22h2-enterprise-x64-1", "ludus_sccm_client"),
        NodeId::new("{{ range_id }}-ad-win11-22h2-enterprise-x64-1", "sysmon"),
    ]
}

#[test]
fn e2e_resolve_ad_lab_json() {
    let run = run_command(resolve_command("ad_lab.yml", &[]), &AppConfig::default());
    assert!(run.result.is_ok(), "{:?}", run.error_message());

    let resolution: Resolution = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(resolution.order, ad_lab_order());
}

#[test]
fn e2e_resolve_ad_lab_yaml_matches_json() {
    let run = run_command(
        resolve_command("ad_lab.yml", &[]),
        &with_format(OutputFormat::Yaml),
    );
    assert!(run.result.is_ok(), "{:?}", run.error_message());

    let resolution: Resolution = serde_saphyr::from_str(&run.stdout).unwrap();
    assert_eq!(resolution.order, ad_lab_order());
}

#[test]
fn e2e_resolve_only_roles_filters_output() {
    let run = run_command(
        resolve_command("ad_lab.yml", &["sysmon", "ludus_adcs"]),
        &with_format(OutputFormat::Text),
    );
    assert!(run.result.is_ok(), "{:?}", run.error_message());

    assert_eq!(
        run.stdout,
        "{{ range_id }}-ad-dc-win2022-server-x64:ludus_adcs\n\
         {{ range_id }}-ad-win11-22h2-enterprise-x64-1:sysmon\n"
    );
}

#[test]
fn e2e_only_roles_does_not_hide_resolution_errors() {
    let run = run_command(resolve_command("cycle.yml", &["unrelated"]), &AppConfig::default());
    assert_eq!(
        run.error_message().as_deref(),
        Some("ERROR: Circular dependency found for vm1:roleA")
    );
    assert!(run.stdout.is_empty());
}

#[test]
fn e2e_resolve_dangling_dependency() {
    let run = run_command(resolve_command("dangling.yml", &[]), &AppConfig::default());
    assert_eq!(
        run.error_message().as_deref(),
        Some("ERROR: Dependency not found vm1:roleA")
    );
}

#[test]
fn e2e_resolve_json_config_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("range.json");
    let config = load_fixture("ad_lab.yml")?;
    fs::write(&path, serde_json::to_string(&config.vms)?)?;

    let run = run_command(
        Commands::Resolve {
            config: path,
            only_roles: vec![],
        },
        &AppConfig::default(),
    );
    assert!(run.result.is_ok(), "{:?}", run.error_message());

    let resolution: Resolution = serde_json::from_str(&run.stdout)?;
    assert_eq!(resolution.order, ad_lab_order());
    Ok(())
}
