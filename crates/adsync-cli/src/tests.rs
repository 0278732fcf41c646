use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["adsync-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["adsync-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run { dry_run: false })
    ));
}

#[test]
fn parses_run_dry_run() {
    let cli =
        Cli::try_parse_from(["adsync-cli", "run", "--dry-run"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Run { dry_run: true })));
}

#[test]
fn parses_check_config_command() {
    let cli =
        Cli::try_parse_from(["adsync-cli", "check-config"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::CheckConfig)));
}

#[test]
fn parses_header_command() {
    let cli = Cli::try_parse_from(["adsync-cli", "header"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Header)));
}

#[test]
fn rejects_unknown_command() {
    assert!(Cli::try_parse_from(["adsync-cli", "publish"]).is_err());
}

#[test]
fn dry_run_is_not_a_top_level_flag() {
    assert!(Cli::try_parse_from(["adsync-cli", "--dry-run"]).is_err());
}

fn missing_token() -> Result<AppConfig, ConfigError> {
    Err(ConfigError::MissingEnvVar("COMPOSIO_TOKEN".to_string()))
}

fn write_failure() -> PipelineError {
    PipelineError::WriteValues {
        range: "A1".to_string(),
        source: adsync_composio::ActionError::Api {
            action: "GOOGLESHEETS_UPDATE_VALUES".to_string(),
            message: "quota exceeded".to_string(),
        },
    }
}

#[test]
fn exit_code_is_success_when_no_campaigns() {
    assert_eq!(exit_code(&Ok(RunOutcome::NoCampaigns)), ExitCode::SUCCESS);
}

#[test]
fn exit_code_is_success_when_published() {
    let result = Ok(RunOutcome::Published {
        campaigns: 3,
        skipped: 1,
    });
    assert_eq!(exit_code(&result), ExitCode::SUCCESS);
}

#[test]
fn exit_code_is_failure_when_write_fails() {
    assert_eq!(exit_code(&Err(write_failure())), ExitCode::FAILURE);
}

#[test]
fn exit_code_is_failure_when_every_campaign_fails() {
    let result = Err(PipelineError::NoCampaignsProcessed { attempted: 2 });
    assert_eq!(exit_code(&result), ExitCode::FAILURE);
}

#[tokio::test]
async fn run_with_missing_secret_exits_with_failure() {
    let code = run_cli(Commands::Run { dry_run: false }, missing_token)
        .await
        .expect("invalid config is reported, not propagated");
    assert_eq!(code, ExitCode::FAILURE);
}

#[tokio::test]
async fn check_config_with_missing_secret_exits_with_failure() {
    let code = run_cli(Commands::CheckConfig, missing_token)
        .await
        .expect("invalid config is reported, not propagated");
    assert_eq!(code, ExitCode::FAILURE);
}

#[tokio::test]
async fn header_does_not_load_config() {
    let code = run_cli(Commands::Header, || -> Result<AppConfig, ConfigError> {
        panic!("header must not read configuration")
    })
    .await
    .expect("header always succeeds");
    assert_eq!(code, ExitCode::SUCCESS);
}
