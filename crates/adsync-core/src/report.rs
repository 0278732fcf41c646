//! Spreadsheet row formatting.
//!
//! Every cell is written to the sheet as a literal string, so all number and
//! date presentation happens here.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::campaigns::Campaign;
use crate::metrics::CampaignSummary;

/// Column titles of the destination sheet, in write order.
pub const HEADER: [&str; 22] = [
    "Update Timestamp",
    "Campaign ID",
    "Campaign Name",
    "Status",
    "Objective",
    "Daily Budget",
    "Total Budget",
    "Remaining Budget",
    "Created Date",
    "Start Date",
    "End Date",
    "Impressions",
    "Clicks",
    "Spend",
    "Reach",
    "Frequency",
    "CTR",
    "CPC",
    "CPM",
    "Conversions",
    "Cost per Conversion",
    "Conversion Rate",
];

/// Rendered for absent budgets and timestamps.
pub const NOT_APPLICABLE: &str = "N/A";

const CURRENCY_SYMBOL: &str = "R$";

/// One sheet row; always [`HEADER`]`.len()` cells.
pub type FormattedRow = Vec<String>;

#[must_use]
pub fn header_row() -> FormattedRow {
    HEADER.iter().map(|h| (*h).to_string()).collect()
}

/// The "updated at" cell value, computed once per run.
#[must_use]
pub fn run_timestamp(now: DateTime<Local>) -> String {
    now.format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Render one campaign as a sheet row.
///
/// Budgets use [`NOT_APPLICABLE`] when zero or absent, while spend and the
/// cost ratios always render as currency, including zero.
#[must_use]
pub fn format_row(
    updated_at: &str,
    campaign: &Campaign,
    summary: &CampaignSummary,
) -> FormattedRow {
    vec![
        updated_at.to_string(),
        campaign.id.clone(),
        campaign.name.clone(),
        campaign.status.to_string(),
        campaign.objective.clone(),
        format_budget(campaign.daily_budget),
        format_budget(campaign.lifetime_budget),
        format_budget(campaign.budget_remaining),
        format_timestamp(campaign.created_time.as_deref()),
        format_timestamp(campaign.start_time.as_deref()),
        format_timestamp(campaign.stop_time.as_deref()),
        format_count(summary.impressions),
        format_count(summary.clicks),
        format_currency(summary.spend),
        format_count(summary.reach),
        format!("{:.2}", summary.frequency),
        format_percent(summary.ctr),
        format_currency(summary.cpc),
        format_currency(summary.cpm),
        format_count(summary.conversions),
        format_currency(summary.cost_per_conversion),
        format_percent(summary.conversion_rate),
    ]
}

/// Minor units to major-unit currency; zero and absent are not applicable.
#[must_use]
pub fn format_budget(minor_units: Option<i64>) -> String {
    match minor_units {
        Some(cents) if cents != 0 => format_currency(Decimal::new(cents, 2)),
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// Two decimal places, ties to even: `0.125` renders as `R$ 0.12`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{CURRENCY_SYMBOL} {rounded:.2}")
}

#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Thousands-separated integer, e.g. `1,234,567`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `DD/MM/YYYY HH:MM` for ISO-8601 date-times, in the value's own offset.
///
/// Values without a `T` separator pass through untouched, empty values render
/// as [`NOT_APPLICABLE`], and anything that fails to parse is returned as-is.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return NOT_APPLICABLE.to_string();
    };
    if !raw.contains('T') {
        return raw.to_string();
    }
    parse_iso_datetime(raw).unwrap_or_else(|| raw.to_string())
}

fn parse_iso_datetime(raw: &str) -> Option<String> {
    const OUTPUT: &str = "%d/%m/%Y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(OUTPUT).to_string());
    }
    // The ads platform emits offsets without a colon: `+0000`.
    for pattern in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(raw, pattern) {
            return Some(dt.format(OUTPUT).to_string());
        }
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.format(OUTPUT).to_string());
        }
    }
    None
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
