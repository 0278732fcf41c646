//! Request and response shapes for the action gateway.
//!
//! Each action has its own typed input struct; the gateway wraps them in an
//! [`ExecuteRequest`] and answers with an [`ActionResponse`] envelope.

use adsync_core::{CampaignStatus, InsightsWindow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;

pub const GET_CAMPAIGNS: &str = "METAADS_GET_CAMPAIGNS";
pub const GET_INSIGHTS: &str = "METAADS_GET_INSIGHTS";
pub const CLEAR_VALUES: &str = "GOOGLESHEETS_CLEAR_VALUES";
pub const UPDATE_VALUES: &str = "GOOGLESHEETS_UPDATE_VALUES";

pub(crate) const CAMPAIGN_FIELDS: &[&str] = &[
    "id",
    "name",
    "status",
    "objective",
    "created_time",
    "updated_time",
    "daily_budget",
    "lifetime_budget",
    "budget_remaining",
    "start_time",
    "stop_time",
];

pub(crate) const INSIGHT_FIELDS: &[&str] = &[
    "campaign_id",
    "campaign_name",
    "impressions",
    "clicks",
    "spend",
    "reach",
    "frequency",
    "ctr",
    "cpc",
    "cpm",
    "cpp",
    "conversions",
    "cost_per_conversion",
    "conversion_rate",
];

// ---------------------------------------------------------------------------
// Caller-facing queries
// ---------------------------------------------------------------------------

/// Which campaigns to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignFilter {
    pub limit: u32,
    pub effective_status: Vec<CampaignStatus>,
}

impl CampaignFilter {
    /// Up to `limit` campaigns that are either running or paused.
    #[must_use]
    pub fn active_or_paused(limit: u32) -> Self {
        Self {
            limit,
            effective_status: vec![CampaignStatus::Active, CampaignStatus::Paused],
        }
    }
}

/// Daily insights for one campaign over `window`, split by `breakdowns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsQuery {
    pub campaign_id: String,
    pub window: InsightsWindow,
    pub breakdowns: Vec<String>,
}

impl InsightsQuery {
    #[must_use]
    pub fn by_device_platform(campaign_id: &str, window: InsightsWindow) -> Self {
        Self {
            campaign_id: campaign_id.to_string(),
            window,
            breakdowns: vec!["device_platform".to_string()],
        }
    }
}

/// A range inside a spreadsheet, in A1 notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub spreadsheet_id: String,
    pub range: String,
}

impl SheetRange {
    #[must_use]
    pub fn new(spreadsheet_id: &str, range: &str) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExecuteRequest<'a, I: Serialize> {
    pub entity_id: &'a str,
    pub input: &'a I,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetCampaignsInput<'a> {
    pub fields: &'a [&'a str],
    pub limit: u32,
    pub effective_status: &'a [CampaignStatus],
}

#[derive(Debug, Serialize)]
pub(crate) struct GetInsightsInput<'a> {
    pub campaign_id: &'a str,
    pub level: &'static str,
    pub fields: &'a [&'a str],
    pub time_range: InsightsWindow,
    pub breakdowns: &'a [String],
    pub time_increment: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClearValuesInput<'a> {
    pub spreadsheet_id: &'a str,
    pub range: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateValuesInput<'a> {
    pub spreadsheet_id: &'a str,
    pub range: &'a str,
    pub values: &'a [Vec<String>],
    pub value_input_option: &'static str,
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Envelope returned by every action execution.
///
/// The gateway has historically spelled the flag `successfull`; both
/// spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, alias = "successfull")]
    pub successful: Option<bool>,
}

impl ActionResponse {
    /// Converts an unsuccessful envelope into [`ActionError::Api`] and
    /// returns the payload otherwise.
    ///
    /// When the flag is missing, a non-null `error` marks the call as failed.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Api`] if the action did not succeed.
    pub fn into_data(self, action: &str) -> Result<Option<Value>, ActionError> {
        let error_present = self.error.as_ref().is_some_and(|e| !e.is_null());
        let failed = match self.successful {
            Some(flag) => !flag,
            None => error_present,
        };
        if failed {
            let message = match self.error {
                Some(Value::String(s)) => s,
                Some(Value::Null) | None => "unknown error".to_string(),
                Some(other) => other.to_string(),
            };
            return Err(ActionError::Api {
                action: action.to_string(),
                message,
            });
        }
        Ok(self.data)
    }
}

/// Pulls a record list out of an action payload.
///
/// The list is either the payload itself or nested under a `data` /
/// `response_data` key (the platform's own envelope). A missing payload is an
/// empty list.
///
/// # Errors
///
/// Returns [`ActionError::Deserialize`] if the list cannot be decoded.
pub fn extract_list<T: DeserializeOwned>(
    data: Option<Value>,
    context: &str,
) -> Result<Vec<T>, ActionError> {
    let mut current = match data {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    while let Value::Object(map) = &mut current {
        let nested = map
            .remove("data")
            .or_else(|| map.remove("response_data"));
        match nested {
            Some(Value::Null) => return Ok(Vec::new()),
            Some(inner) => current = inner,
            None if map.is_empty() => return Ok(Vec::new()),
            None => break,
        }
    }

    serde_json::from_value(current).map_err(|e| ActionError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
