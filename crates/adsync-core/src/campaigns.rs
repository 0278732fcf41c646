//! Campaign and insight records as returned by the ads platform.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::decode;

/// Delivery status of a campaign. Tags the platform adds later are kept
/// verbatim in [`CampaignStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CampaignStatus {
    Active,
    Paused,
    Deleted,
    Archived,
    #[default]
    Unknown,
    Other(String),
}

impl CampaignStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
            Self::Deleted => "DELETED",
            Self::Archived => "ARCHIVED",
            Self::Unknown => "",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for CampaignStatus {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Unknown,
            "ACTIVE" => Self::Active,
            "PAUSED" => Self::Paused,
            "DELETED" => Self::Deleted,
            "ARCHIVED" => Self::Archived,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CampaignStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CampaignStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = decode::opt_string(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Unknown, Self::from))
    }
}

/// A campaign as listed by the ads platform. Budgets are minor units (cents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Campaign {
    #[serde(default, deserialize_with = "decode::string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::string_or_empty")]
    pub name: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default, deserialize_with = "decode::string_or_empty")]
    pub objective: String,
    #[serde(default, deserialize_with = "decode::minor_units")]
    pub daily_budget: Option<i64>,
    #[serde(default, deserialize_with = "decode::minor_units")]
    pub lifetime_budget: Option<i64>,
    #[serde(default, deserialize_with = "decode::minor_units")]
    pub budget_remaining: Option<i64>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub updated_time: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub stop_time: Option<String>,
}

/// One row of performance data for a campaign: a single day crossed with a
/// single breakdown value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsightRecord {
    #[serde(default, deserialize_with = "decode::string_or_empty")]
    pub campaign_id: String,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub campaign_name: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub date_stop: Option<String>,
    #[serde(default, deserialize_with = "decode::opt_string")]
    pub device_platform: Option<String>,
    #[serde(default, deserialize_with = "decode::count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "decode::count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "decode::money")]
    pub spend: Decimal,
    #[serde(default, deserialize_with = "decode::count")]
    pub reach: u64,
    #[serde(default, deserialize_with = "decode::ratio")]
    pub frequency: f64,
    #[serde(default, deserialize_with = "decode::conversions")]
    pub conversions: u64,
}

/// Inclusive date range for an insights query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightsWindow {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl InsightsWindow {
    /// Window ending on `today` and starting `days` calendar days earlier.
    #[must_use]
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let since = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            since,
            until: today,
        }
    }
}
