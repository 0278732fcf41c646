//! Run orchestration: fetch campaigns → fetch + aggregate insights per
//! campaign → format rows → clear and rewrite the sheet.
//!
//! A failing campaign is logged and skipped so one bad campaign does not abort
//! the run; the run only fails at the campaign stage when every campaign
//! failed. Fetching the campaign list, clearing and writing are run-fatal.

use adsync_composio::{
    ActionError, AdsSource, CampaignFilter, ComposioClient, InsightsQuery, SheetRange, SheetSink,
};
use adsync_core::{
    aggregate, format_row, header_row, run_timestamp, AppConfig, Campaign, FormattedRow,
    InsightsWindow,
};
use chrono::Local;
use futures::stream::{self, StreamExt};
use thiserror::Error;

/// Where a run is. `Failed` is reachable from every other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunStage {
    Init,
    ClientReady,
    CampaignsFetched,
    DataProcessed,
    SheetsUpdated,
    Done,
    Failed,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStage::Init => "init",
            RunStage::ClientReady => "client_ready",
            RunStage::CampaignsFetched => "campaigns_fetched",
            RunStage::DataProcessed => "data_processed",
            RunStage::SheetsUpdated => "sheets_updated",
            RunStage::Done => "done",
            RunStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Run-fatal errors.
#[derive(Debug, Error)]
pub(crate) enum PipelineError {
    #[error("failed to initialize action client: {0}")]
    ClientInit(#[source] ActionError),

    #[error("failed to fetch campaigns: {0}")]
    FetchCampaigns(#[source] ActionError),

    #[error("all {attempted} campaigns failed processing")]
    NoCampaignsProcessed { attempted: usize },

    #[error("failed to clear range {range}: {source}")]
    ClearRange {
        range: String,
        #[source]
        source: ActionError,
    },

    #[error("failed to write range {range}: {source}")]
    WriteValues {
        range: String,
        #[source]
        source: ActionError,
    },
}

impl PipelineError {
    /// The last stage reached before the run moved to [`RunStage::Failed`].
    pub(crate) fn stage(&self) -> RunStage {
        match self {
            PipelineError::ClientInit(_) => RunStage::Init,
            PipelineError::FetchCampaigns(_) => RunStage::ClientReady,
            PipelineError::NoCampaignsProcessed { .. } => RunStage::CampaignsFetched,
            PipelineError::ClearRange { .. } | PipelineError::WriteValues { .. } => {
                RunStage::DataProcessed
            }
        }
    }
}

/// Per-campaign errors; the campaign is skipped and the run continues.
#[derive(Debug, Error)]
pub(crate) enum CampaignError {
    #[error("campaign has no id")]
    MissingId,

    #[error("failed to fetch insights: {0}")]
    Insights(#[from] ActionError),
}

/// Run parameters derived from [`AppConfig`] and CLI flags.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub campaign_limit: u32,
    pub insights_days: u32,
    pub max_concurrent_campaigns: usize,
    pub clear_range: SheetRange,
    pub write_range: SheetRange,
    /// Build the rows but skip clearing and writing the sheet.
    pub dry_run: bool,
}

impl RunSettings {
    pub(crate) fn from_config(config: &AppConfig, dry_run: bool) -> Self {
        Self {
            campaign_limit: config.campaign_limit,
            insights_days: config.insights_days,
            max_concurrent_campaigns: config.max_concurrent_campaigns,
            clear_range: SheetRange::new(&config.spreadsheet_id, &config.clear_range),
            write_range: SheetRange::new(&config.spreadsheet_id, &config.write_range),
            dry_run,
        }
    }
}

/// How a successful run ended.
#[derive(Debug)]
pub(crate) enum RunOutcome {
    /// The provider returned no campaigns; the sheet was left untouched.
    NoCampaigns,
    /// Header plus `campaigns` rows were written.
    Published { campaigns: usize, skipped: usize },
    /// Rows were built but not written (`--dry-run`).
    DryRun {
        rows: Vec<FormattedRow>,
        skipped: usize,
    },
}

/// Build the gateway client from `config` and execute one run.
///
/// # Errors
///
/// Returns [`PipelineError`] for every run-fatal failure; the error has
/// already been logged.
pub(crate) async fn run(config: &AppConfig, dry_run: bool) -> Result<RunOutcome, PipelineError> {
    enter(RunStage::Init);
    let client = ComposioClient::with_base_url(
        &config.composio_token,
        config.request_timeout_secs,
        &config.composio_base_url,
    )
    .map(|c| c.with_entity_ids(&config.ads_entity_id, &config.sheets_entity_id))
    .map_err(|e| failed(PipelineError::ClientInit(e)))?;

    let settings = RunSettings::from_config(config, dry_run);
    execute(&client, &client, &settings).await
}

/// Execute one run against the given ads source and sheet sink.
///
/// # Errors
///
/// Returns [`PipelineError`] for every run-fatal failure; the error has
/// already been logged.
pub(crate) async fn execute<A, S>(
    ads: &A,
    sheets: &S,
    settings: &RunSettings,
) -> Result<RunOutcome, PipelineError>
where
    A: AdsSource + Sync,
    S: SheetSink + Sync,
{
    enter(RunStage::ClientReady);

    let filter = CampaignFilter::active_or_paused(settings.campaign_limit);
    let campaigns = ads
        .fetch_campaigns(&filter)
        .await
        .map_err(|e| failed(PipelineError::FetchCampaigns(e)))?;
    tracing::info!(count = campaigns.len(), "campaigns fetched");

    if campaigns.is_empty() {
        tracing::info!("no campaigns found; nothing to publish");
        enter(RunStage::Done);
        return Ok(RunOutcome::NoCampaigns);
    }
    enter(RunStage::CampaignsFetched);

    let (rows, skipped) = build_rows(ads, &campaigns, settings).await?;
    enter(RunStage::DataProcessed);
    let processed = rows.len() - 1;

    if settings.dry_run {
        tracing::info!(processed, skipped, "dry run; sheet left untouched");
        return Ok(RunOutcome::DryRun { rows, skipped });
    }

    sheets
        .clear_range(&settings.clear_range)
        .await
        .map_err(|source| {
            failed(PipelineError::ClearRange {
                range: settings.clear_range.range.clone(),
                source,
            })
        })?;
    tracing::info!(range = %settings.clear_range.range, "sheet range cleared");

    sheets
        .write_values(&settings.write_range, &rows)
        .await
        .map_err(|source| {
            failed(PipelineError::WriteValues {
                range: settings.write_range.range.clone(),
                source,
            })
        })?;
    enter(RunStage::SheetsUpdated);
    tracing::info!(campaigns = processed, "sheet updated");

    enter(RunStage::Done);
    Ok(RunOutcome::Published {
        campaigns: processed,
        skipped,
    })
}

/// Header row plus one row per campaign that processed cleanly, in the order
/// the provider listed them, and the number of skipped campaigns.
async fn build_rows<A>(
    ads: &A,
    campaigns: &[Campaign],
    settings: &RunSettings,
) -> Result<(Vec<FormattedRow>, usize), PipelineError>
where
    A: AdsSource + Sync,
{
    let updated_at = run_timestamp(Local::now());
    let updated_at = updated_at.as_str();
    let insights_days = settings.insights_days;

    // `buffered` yields in input order regardless of completion order.
    let results: Vec<(&Campaign, Result<FormattedRow, CampaignError>)> = stream::iter(campaigns)
        .map(|c| async move { (c, process_campaign(ads, c, insights_days, updated_at).await) })
        .buffered(settings.max_concurrent_campaigns.max(1))
        .collect()
        .await;

    let mut rows = Vec::with_capacity(campaigns.len() + 1);
    rows.push(header_row());
    let mut skipped = 0usize;

    for (campaign, result) in results {
        match result {
            Ok(row) => {
                tracing::info!(
                    campaign_id = %campaign.id,
                    campaign = %campaign.name,
                    "campaign processed"
                );
                rows.push(row);
            }
            Err(e) => {
                tracing::error!(
                    campaign_id = %campaign.id,
                    campaign = %campaign.name,
                    error = %e,
                    "skipping campaign"
                );
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(
            skipped,
            total_campaigns = campaigns.len(),
            "some campaigns failed processing"
        );
    }

    if rows.len() == 1 {
        return Err(failed(PipelineError::NoCampaignsProcessed {
            attempted: campaigns.len(),
        }));
    }

    Ok((rows, skipped))
}

async fn process_campaign<A>(
    ads: &A,
    campaign: &Campaign,
    insights_days: u32,
    updated_at: &str,
) -> Result<FormattedRow, CampaignError>
where
    A: AdsSource + Sync,
{
    if campaign.id.trim().is_empty() {
        return Err(CampaignError::MissingId);
    }

    let window = InsightsWindow::trailing(Local::now().date_naive(), insights_days);
    let query = InsightsQuery::by_device_platform(&campaign.id, window);
    let insights = ads.fetch_insights(&query).await?;

    let summary = aggregate(campaign, &insights);
    if summary.record_count == 0 {
        tracing::debug!(
            campaign_id = %campaign.id,
            "no insight records in window; reporting zeros"
        );
    }

    Ok(format_row(updated_at, campaign, &summary))
}

fn enter(stage: RunStage) {
    tracing::info!(stage = %stage, "pipeline stage");
}

fn failed(err: PipelineError) -> PipelineError {
    tracing::error!(
        stage = %err.stage(),
        next = %RunStage::Failed,
        error = %err,
        "run failed"
    );
    err
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
