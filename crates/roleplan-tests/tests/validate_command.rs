//! E2E tests for validate and graph commands

use roleplan_lib::application::{AppConfig, Commands};
use roleplan_lib::range::validate;
use roleplan_tests::{fixture_path, load_fixture, run_command};
use std::collections::BTreeSet;

#[test]
fn e2e_validate_ad_lab_with_installed_roles() {
    let run = run_command(
        Commands::Validate {
            config: fixture_path("ad_lab.yml"),
            known_roles: ["ludus_adcs", "ludus_sccm_site", "ludus_sccm_client", "sysmon"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
        },
        &AppConfig::default(),
    );

    assert!(run.result.is_ok(), "{:?}", run.error_message());
    assert!(run.stdout.contains("4 nodes, 2 dependency edges"));
    assert!(run.stdout.contains("4 roles resolve in a valid order"));
}

#[test]
fn e2e_validate_flags_uninstalled_role() {
    let run = run_command(
        Commands::Validate {
            config: fixture_path("ad_lab.yml"),
            known_roles: vec!["ludus_adcs".to_string()],
        },
        &AppConfig::default(),
    );

    assert_eq!(
        run.error_message().as_deref(),
        Some("Validation failed: 3 unknown role(s)")
    );
    assert!(run.stdout.contains("the role 'ludus_sccm_client'"));
    assert!(run.stdout.contains("the role 'ludus_sccm_site'"));
    assert!(run.stdout.contains("the role 'sysmon'"));
}

#[test]
fn e2e_validate_library_report_matches_fixture() {
    let config = load_fixture("dangling.yml").unwrap();
    let known: BTreeSet<String> = BTreeSet::new();
    let report = validate(&config, Some(&known));

    assert_eq!(report.node_count, 1);
    // roleA and its dependency roleZ are both unknown to an empty installed set
    assert_eq!(report.unknown_roles.len(), 2);
    assert!(report.resolution.is_err());
}

#[test]
fn e2e_graph_skips_dangling_edges() {
    let run = run_command(
        Commands::Graph {
            config: fixture_path("dangling.yml"),
        },
        &AppConfig::default(),
    );

    assert!(run.result.is_ok(), "{:?}", run.error_message());
    assert!(run.stdout.contains("vm1:roleA"));
    assert!(!run.stdout.contains("vm9:roleZ"));
    assert!(!run.stdout.contains("->"));
}
