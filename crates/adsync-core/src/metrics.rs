//! Per-campaign reduction of insight records into totals and ratios.

use rust_decimal::Decimal;

use crate::campaigns::{Campaign, InsightRecord};

/// Totals and derived ratios for one campaign over the insights window.
///
/// Ratios are computed from the totals, never averaged from per-record
/// ratios. Every ratio is finite and non-negative; a zero denominator yields 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignSummary {
    pub campaign_id: String,
    /// Number of insight records the totals were built from.
    pub record_count: usize,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: Decimal,
    pub reach: u64,
    /// Arithmetic mean of the per-record frequency.
    pub frequency: f64,
    pub conversions: u64,
    /// Click-through rate, percent.
    pub ctr: f64,
    /// Cost per thousand impressions.
    pub cpm: Decimal,
    /// Cost per click.
    pub cpc: Decimal,
    pub cost_per_conversion: Decimal,
    /// Conversions per click, percent.
    pub conversion_rate: f64,
}

/// Reduce `insights` into a [`CampaignSummary`] for `campaign`.
///
/// Never fails. An empty slice produces an all-zero summary, which is
/// indistinguishable in the totals from a campaign that had no traffic;
/// `record_count` tells the two apart.
#[must_use]
pub fn aggregate(campaign: &Campaign, insights: &[InsightRecord]) -> CampaignSummary {
    let mut summary = CampaignSummary {
        campaign_id: campaign.id.clone(),
        record_count: insights.len(),
        ..CampaignSummary::default()
    };

    let mut frequency_total = 0.0_f64;
    for insight in insights {
        summary.impressions = summary.impressions.saturating_add(insight.impressions);
        summary.clicks = summary.clicks.saturating_add(insight.clicks);
        summary.reach = summary.reach.saturating_add(insight.reach);
        summary.conversions = summary.conversions.saturating_add(insight.conversions);
        summary.spend = summary
            .spend
            .checked_add(insight.spend)
            .unwrap_or(Decimal::MAX);
        frequency_total += insight.frequency;
    }

    if !insights.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let denom = insights.len() as f64;
        summary.frequency = finite_or_zero(frequency_total / denom);
    }

    summary.ctr = percent(summary.clicks, summary.impressions);
    summary.cpm = cost_per(summary.spend, summary.impressions, Decimal::ONE_THOUSAND);
    summary.cpc = cost_per(summary.spend, summary.clicks, Decimal::ONE);
    summary.cost_per_conversion = cost_per(summary.spend, summary.conversions, Decimal::ONE);
    summary.conversion_rate = percent(summary.conversions, summary.clicks);

    summary
}

fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = numerator as f64 / denominator as f64 * 100.0;
    finite_or_zero(ratio)
}

/// `spend * scale / units`, or zero when `units` is zero or the arithmetic
/// overflows.
fn cost_per(spend: Decimal, units: u64, scale: Decimal) -> Decimal {
    if units == 0 {
        return Decimal::ZERO;
    }
    spend
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_div(Decimal::from(units)))
        .unwrap_or(Decimal::ZERO)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}
