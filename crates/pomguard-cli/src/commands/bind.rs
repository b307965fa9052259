//! `pomguard bind`.

use std::path::Path;

use pomguard_core::config::CliOverrides;
use pomguard_core::errors::FleetError;
use pomguard_fleet::report::write_csv;
use pomguard_fleet::{BindingRule, FleetScanner, FleetSummary, GitLabHost};

use super::load_config;
use crate::cli::BindArgs;

pub fn run_bind(args: BindArgs, config_path: Option<&Path>) -> Result<i32, FleetError> {
    let dry_run = match (args.apply, args.dry_run) {
        (true, _) => Some(false),
        (_, true) => Some(true),
        _ => None,
    };
    let overrides = CliOverrides {
        gitlab_url: args.gitlab_url,
        group_id: args.group_id,
        git_ref: args.git_ref,
        report_path: args.report,
        dry_run,
        ..CliOverrides::default()
    };
    let (root, config) = load_config(config_path, overrides)?;

    let host = GitLabHost::from_fleet_config(&config.fleet)?;
    let rule = BindingRule::from_config(&config.fleet);
    if rule.dry_run {
        println!("Dry run: no changes will be committed.");
    }

    let outcomes = FleetScanner::new(&host, rule).scan()?;
    let summary = FleetSummary::from_outcomes(&outcomes);
    println!(
        "Scanned {} projects: {} use the library, {} added, {} pending, {} errors.",
        summary.projects, summary.lib_found, summary.added, summary.pending, summary.errors
    );

    for failed in outcomes.iter().filter(|o| o.action.is_error()) {
        eprintln!("⚠️ {}: {}", failed.project_name, failed.action);
    }

    let report_path = root.join(config.fleet.effective_report_path());
    write_csv(&report_path, &outcomes)?;
    println!("✅ Done: report written to {}", report_path.display());

    Ok(0)
}
