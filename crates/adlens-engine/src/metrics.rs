//! Per-day rate metrics derived from raw campaign records.

use std::collections::BTreeMap;

use adlens_core::{CampaignRecord, CampaignRecords};
use chrono::NaiveDate;

use crate::types::{CampaignTotals, DailyMetrics};

/// Aggregate the records sharing one `(campaign, date)` key.
///
/// Missing or non-finite values contribute nothing to the sums. CTR is
/// `0.0` without impressions; CPC and ROAS are `None` when their
/// denominator is zero, never infinite.
#[must_use]
pub fn compute_daily_metrics(date: NaiveDate, records: &[&CampaignRecord]) -> DailyMetrics {
    let mut impressions: u64 = 0;
    let mut clicks: u64 = 0;
    let mut spend = 0.0_f64;
    let mut revenue = 0.0_f64;
    let mut observed = false;

    for record in records {
        observed |= record.impressions.is_some()
            || record.clicks.is_some()
            || record.spend.is_some_and(f64::is_finite)
            || record.revenue.is_some_and(f64::is_finite);
        impressions = impressions.saturating_add(record.impressions.unwrap_or(0));
        clicks = clicks.saturating_add(record.clicks.unwrap_or(0));
        spend += finite_or_zero(record.spend);
        revenue += finite_or_zero(record.revenue);
    }

    #[allow(clippy::cast_precision_loss)]
    let (impressions_f, clicks_f) = (impressions as f64, clicks as f64);

    let ctr = if impressions == 0 {
        0.0
    } else {
        clicks_f / impressions_f
    };
    let cpc = ratio(spend, clicks_f);
    let roas = ratio(revenue, spend);

    DailyMetrics {
        date,
        impressions,
        clicks,
        spend,
        revenue,
        ctr,
        cpc,
        roas,
        observed,
    }
}

/// Group a campaign's records by date and compute one [`DailyMetrics`] per
/// date, ascending.
#[must_use]
pub fn daily_metrics(campaign: &CampaignRecords) -> Vec<DailyMetrics> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&CampaignRecord>> = BTreeMap::new();
    for record in &campaign.records {
        by_date.entry(record.date).or_default().push(record);
    }

    by_date
        .into_iter()
        .map(|(date, records)| compute_daily_metrics(date, &records))
        .collect()
}

/// Sum impressions, clicks, spend and revenue over every record.
#[must_use]
pub fn campaign_totals(campaign: &CampaignRecords) -> CampaignTotals {
    campaign
        .records
        .iter()
        .fold(CampaignTotals::default(), |mut acc, r| {
            acc.impressions = acc.impressions.saturating_add(r.impressions.unwrap_or(0));
            acc.clicks = acc.clicks.saturating_add(r.clicks.unwrap_or(0));
            acc.spend += finite_or_zero(r.spend);
            acc.revenue += finite_or_zero(r.revenue);
            acc
        })
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}
