use chrono::TimeZone;

use super::*;
use crate::campaigns::{CampaignStatus, InsightRecord};
use crate::metrics::aggregate;

fn sample_campaign() -> Campaign {
    Campaign {
        id: "120210000000001".to_string(),
        name: "Black Friday".to_string(),
        status: CampaignStatus::Active,
        objective: "OUTCOME_SALES".to_string(),
        daily_budget: Some(5000),
        lifetime_budget: None,
        budget_remaining: Some(0),
        created_time: Some("2024-03-01T10:30:00Z".to_string()),
        updated_time: None,
        start_time: Some("2024-03-02T08:00:00-0300".to_string()),
        stop_time: None,
    }
}

#[test]
fn header_has_twenty_two_columns() {
    let header = header_row();
    assert_eq!(header.len(), 22);
    assert_eq!(header[0], "Update Timestamp");
    assert_eq!(header[21], "Conversion Rate");
}

#[test]
fn row_matches_header_width() {
    let campaign = sample_campaign();
    let summary = aggregate(&campaign, &[]);
    let row = format_row("01/03/2024 12:00:00", &campaign, &summary);
    assert_eq!(row.len(), HEADER.len());
}

#[test]
fn zero_budget_is_not_applicable_but_zero_spend_is_currency() {
    let mut campaign = sample_campaign();
    campaign.daily_budget = Some(0);
    let summary = aggregate(&campaign, &[]);
    let row = format_row("ts", &campaign, &summary);

    assert_eq!(row[5], "N/A");
    assert_eq!(row[13], "R$ 0.00");
    assert_eq!(row[17], "R$ 0.00");
    assert_eq!(row[18], "R$ 0.00");
    assert_eq!(row[20], "R$ 0.00");
}

#[test]
fn budgets_are_divided_by_one_hundred() {
    assert_eq!(format_budget(Some(5000)), "R$ 50.00");
    assert_eq!(format_budget(Some(12345)), "R$ 123.45");
    assert_eq!(format_budget(Some(7)), "R$ 0.07");
    assert_eq!(format_budget(None), "N/A");
    assert_eq!(format_budget(Some(0)), "N/A");
}

#[test]
fn currency_rounds_to_two_places() {
    assert_eq!(format_currency(Decimal::new(225, 1)), "R$ 22.50");
    assert_eq!(format_currency(Decimal::new(12346, 3)), "R$ 12.35");
    assert_eq!(format_currency(Decimal::ZERO), "R$ 0.00");
}

#[test]
fn currency_ties_round_to_even() {
    assert_eq!(format_currency(Decimal::new(12345, 3)), "R$ 12.34");
    assert_eq!(format_currency(Decimal::new(1005, 3)), "R$ 1.00");
    assert_eq!(format_currency(Decimal::new(125, 3)), "R$ 0.12");
    assert_eq!(format_currency(Decimal::new(135, 3)), "R$ 0.14");
}

#[test]
fn cost_per_click_tie_renders_down() {
    let insights = vec![InsightRecord {
        clicks: 2,
        impressions: 100,
        spend: Decimal::new(25, 2),
        ..InsightRecord::default()
    }];
    let summary = aggregate(&sample_campaign(), &insights);

    let row = format_row("01/01/2024 00:00:00", &sample_campaign(), &summary);
    assert_eq!(row[17], "R$ 0.12");
}

#[test]
fn counts_use_thousands_separators() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(4500), "4,500");
    assert_eq!(format_count(1_234_567), "1,234,567");
}

#[test]
fn percentages_have_two_decimals_and_sign() {
    assert_eq!(format_percent(1.0), "1.00%");
    assert_eq!(format_percent(0.0), "0.00%");
    assert_eq!(format_percent(33.333), "33.33%");
}

#[test]
fn iso_timestamp_with_zulu_is_reformatted() {
    assert_eq!(
        format_timestamp(Some("2024-03-01T10:30:00Z")),
        "01/03/2024 10:30"
    );
}

#[test]
fn platform_offset_without_colon_keeps_wall_time() {
    assert_eq!(
        format_timestamp(Some("2024-03-02T08:00:00-0300")),
        "02/03/2024 08:00"
    );
}

#[test]
fn naive_iso_timestamp_is_reformatted() {
    assert_eq!(
        format_timestamp(Some("2024-12-31T23:59:59")),
        "31/12/2024 23:59"
    );
}

#[test]
fn empty_or_missing_timestamp_is_not_applicable() {
    assert_eq!(format_timestamp(Some("")), "N/A");
    assert_eq!(format_timestamp(None), "N/A");
}

#[test]
fn timestamp_without_separator_passes_through() {
    assert_eq!(format_timestamp(Some("not-a-date")), "not-a-date");
    assert_eq!(format_timestamp(Some("2024-03-01")), "2024-03-01");
}

#[test]
fn unparseable_timestamp_with_separator_passes_through() {
    assert_eq!(format_timestamp(Some("Tomorrow")), "Tomorrow");
    assert_eq!(
        format_timestamp(Some("2024-13-45T99:00:00Z")),
        "2024-13-45T99:00:00Z"
    );
}

#[test]
fn run_timestamp_uses_day_first_with_seconds() {
    let now = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
    assert_eq!(run_timestamp(now), "01/03/2024 09:05:07");
}

#[test]
fn full_row_rendering() {
    let campaign = sample_campaign();
    let insights = vec![
        crate::campaigns::InsightRecord {
            impressions: 1_000,
            clicks: 10,
            spend: Decimal::new(50, 1),
            reach: 900,
            frequency: 1.1,
            conversions: 1,
            ..Default::default()
        },
        crate::campaigns::InsightRecord {
            impressions: 2_000,
            clicks: 20,
            spend: Decimal::new(100, 1),
            reach: 1_500,
            frequency: 1.3,
            conversions: 2,
            ..Default::default()
        },
    ];
    let summary = aggregate(&campaign, &insights);
    let row = format_row("01/03/2024 12:00:00", &campaign, &summary);

    assert_eq!(
        row,
        vec![
            "01/03/2024 12:00:00",
            "120210000000001",
            "Black Friday",
            "ACTIVE",
            "OUTCOME_SALES",
            "R$ 50.00",
            "N/A",
            "N/A",
            "01/03/2024 10:30",
            "02/03/2024 08:00",
            "N/A",
            "3,000",
            "30",
            "R$ 15.00",
            "2,400",
            "1.20",
            "1.00%",
            "R$ 0.50",
            "R$ 5.00",
            "3",
            "R$ 5.00",
            "10.00%",
        ]
    );
}
