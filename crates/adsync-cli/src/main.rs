mod logging;
mod pipeline;

use std::process::ExitCode;

use adsync_core::{AppConfig, ConfigError};
use clap::{Parser, Subcommand};

use crate::pipeline::{PipelineError, RunOutcome};

#[derive(Debug, Parser)]
#[command(name = "adsync-cli")]
#[command(about = "Publish ad campaign performance to a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch campaigns and insights, then rewrite the sheet (default).
    Run {
        /// Build the rows and print them instead of writing the sheet.
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and print it with secrets redacted.
    CheckConfig,
    /// Print the sheet column headers, one per line.
    Header,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run { dry_run: false });
    match run_cli(command, adsync_core::load_app_config).await {
        Ok(code) => code,
        Err(e) => {
            if tracing::dispatcher::has_been_set() {
                tracing::error!(error = %format!("{e:#}"), "adsync failed");
            } else {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run_cli<F>(command: Commands, load_config: F) -> anyhow::Result<ExitCode>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match command {
        Commands::Header => {
            for column in adsync_core::HEADER {
                println!("{column}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckConfig => {
            let Some(config) = configure(load_config)? else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{config:#?}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { dry_run } => {
            let Some(config) = configure(load_config)? else {
                return Ok(ExitCode::FAILURE);
            };
            tracing::info!(env = %config.env, dry_run, "starting campaign sync");
            let result = pipeline::run(&config, dry_run).await;
            if let Ok(outcome) = &result {
                report(outcome);
            }
            Ok(exit_code(&result))
        }
    }
}

/// Load configuration and install logging from it.
///
/// `None` means the configuration was invalid; the error has been reported.
fn configure<F>(load_config: F) -> anyhow::Result<Option<AppConfig>>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match load_config() {
        Ok(config) => {
            logging::init(&config.log_level, config.log_file.as_deref())?;
            Ok(Some(config))
        }
        Err(e) => {
            if logging::init("info", None).is_ok() {
                tracing::error!(error = %e, "configuration is invalid");
            } else {
                eprintln!("configuration is invalid: {e}");
            }
            Ok(None)
        }
    }
}

/// Pipeline errors are logged with their stage before they get here.
fn exit_code(result: &Result<RunOutcome, PipelineError>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NoCampaigns => {
            tracing::info!("run complete; no campaigns to publish");
        }
        RunOutcome::Published { campaigns, skipped } => {
            tracing::info!(campaigns = *campaigns, skipped = *skipped, "run complete");
        }
        RunOutcome::DryRun { rows, skipped } => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
            tracing::info!(
                campaigns = rows.len().saturating_sub(1),
                skipped = *skipped,
                "dry run complete"
            );
        }
    }
}

#[cfg(test)]
mod tests;
