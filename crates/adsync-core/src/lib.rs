//! Domain types, configuration, metric aggregation and row formatting for the
//! ads-to-spreadsheet batch job.
//!
//! Everything in this crate is pure: no network access, no global state.
//! The HTTP adapter lives in `adsync-composio` and the orchestration in
//! `adsync-cli`.

pub mod app_config;
pub mod campaigns;
pub mod config;
pub mod metrics;
pub mod report;

mod decode;

pub use app_config::{AppConfig, Environment};
pub use campaigns::{Campaign, CampaignStatus, InsightRecord, InsightsWindow};
pub use config::{load_app_config, load_app_config_from_env};
pub use metrics::{aggregate, CampaignSummary};
pub use report::{format_row, header_row, run_timestamp, FormattedRow, HEADER};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
