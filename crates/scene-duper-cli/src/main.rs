mod commands;
mod logging;
mod presenter;
mod progress;
mod review;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use presenter::TerminalPresenter;
use progress::CliReporter;
use scene_duper_core::format::format_file_size;
use scene_duper_core::ports::Presenter;
use scene_duper_core::resolution::ReviewSession;
use scene_duper_core::stash::StashClient;
use scene_duper_core::tasks::{self, PluginTaskRunner, TASK_FAILED, TASK_SUCCEEDED};
use scene_duper_core::{report, AppConfig, CheckEngine, CheckOutcome, CheckReport};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match scene_duper_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Check { export }) => {
            let client = connect(&config);
            let Some(check_report) = run_check(&config, client.as_ref(), false).await else {
                return Ok(());
            };
            if let Some(path) = export {
                let path = path.unwrap_or_else(|| {
                    PathBuf::from(report::default_report_name(chrono::Local::now()))
                });
                report::export_csv(&check_report.findings, &config.fingerprint_type, &path)?;
                println!("Findings written to {}", path.display());
            }
        }
        Some(Commands::Review) => {
            let client = connect(&config);
            let Some(check_report) = run_check(&config, client.as_ref(), true).await else {
                return Ok(());
            };
            let session = Arc::new(ReviewSession::new(
                check_report.findings,
                client,
                Arc::new(TerminalPresenter::new(true)),
            ));
            review::run_review(session).await?;
        }
        Some(Commands::Tasks) => {
            let client = connect(&config);
            match client.plugin_tasks().await {
                Ok(list) => print_plugin_tasks(tasks::group_by_plugin(list)),
                Err(err) => {
                    error!("Error fetching plugin tasks: {}", err);
                    process::exit(1);
                }
            }
        }
        Some(Commands::RunTask { plugin_id }) => {
            let client = connect(&config);
            if tasks::run_task(client.as_ref(), &plugin_id).await {
                println!("{}", TASK_SUCCEEDED.green());
            } else {
                println!("{}", TASK_FAILED.red());
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("{}", toml::to_string_pretty(&config.redacted())?);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

/// One client per command, shared by the check and the review session.
fn connect(config: &AppConfig) -> Arc<StashClient> {
    match StashClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!("Could not create catalog client: {}", err);
            process::exit(1);
        }
    }
}

/// Runs the check and prints its results. `None` when there is nothing to
/// review; exits the process when the catalog cannot be queried.
async fn run_check(
    config: &AppConfig,
    client: &StashClient,
    interactive: bool,
) -> Option<CheckReport> {
    let engine = CheckEngine::new(config.clone());
    let reporter = CliReporter::new();
    let outcome = match engine.check(client, &reporter).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Could not check for issues: {}", err);
            process::exit(1);
        }
    };

    match outcome {
        CheckOutcome::NoIssuesFound(stats) => {
            println!(
                "{} ({} scenes, {} files checked)",
                "No issues found.".green(),
                stats.scenes_checked,
                stats.files_checked
            );
            None
        }
        CheckOutcome::IssuesFound(report) => {
            info!(
                "Fetch: {}, Classify: {}",
                format!("{:.2}s", report.fetch_duration.as_secs_f64()).green(),
                format!("{:.2}s", report.classify_duration.as_secs_f64()).green(),
            );
            info!(
                "{} duplicate files, {} duplicate titles, {} scenes without files, {} in duplicate files",
                format!("{}", report.findings.duplicate_files.len()).red(),
                format!("{}", report.findings.duplicate_titles.len()).red(),
                format!("{}", report.findings.zero_file_scenes.len()).red(),
                format_file_size(report.findings.total_duplicate_bytes).red(),
            );
            if !interactive {
                TerminalPresenter::new(false).show_findings(&report.findings);
            }
            Some(report)
        }
    }
}

fn print_plugin_tasks(groups: Vec<tasks::PluginGroup>) {
    if groups.is_empty() {
        println!("No plugin tasks available.");
        return;
    }
    for group in groups {
        println!("{} {}", group.name.cyan().bold(), format!("({})", group.id).dimmed());
        for task in group.tasks {
            println!("  - {}", task.name);
        }
    }
}
