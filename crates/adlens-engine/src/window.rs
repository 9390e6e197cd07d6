//! Baseline vs recent window comparison over a campaign's daily metrics.

use crate::types::{DailyMetrics, SampleStats, WindowComparison, WindowStats, WindowSummary};

/// Added to the previous-window mean so relative change stays finite and
/// keeps its sign when the baseline is zero.
pub const CHANGE_EPSILON: f64 = 1e-6;

/// Compare the most recent `window` days against the `window` days before
/// them.
///
/// `days` must be sorted ascending by date. Returns `None` when fewer than
/// `2 * window` days are available; no partial summary is ever produced.
#[must_use]
pub fn compare_windows(days: &[DailyMetrics], window: usize) -> Option<WindowComparison> {
    let required = window.checked_mul(2)?;
    if window == 0 || days.len() < required {
        return None;
    }

    let recent_days = &days[days.len() - window..];
    let previous_days = &days[days.len() - required..days.len() - window];

    let previous = window_stats(previous_days);
    let recent = window_stats(recent_days);

    let summary = WindowSummary {
        recent_ctr: recent.ctr.mean,
        previous_ctr: previous.ctr.mean,
        recent_roas: recent.roas.mean,
        previous_roas: previous.roas.mean,
        ctr_change_pct: relative_change(previous.ctr.mean, recent.ctr.mean),
        roas_change_pct: relative_change(previous.roas.mean, recent.roas.mean),
    };

    Some(WindowComparison {
        summary,
        previous,
        recent,
    })
}

/// Collect per-metric samples for one window. Undefined CPC/ROAS days are
/// left out of their sample.
#[must_use]
pub fn window_stats(days: &[DailyMetrics]) -> WindowStats {
    let ctr: Vec<f64> = days.iter().map(|d| d.ctr).collect();
    let roas: Vec<f64> = days.iter().filter_map(|d| d.roas).collect();
    let cpc: Vec<f64> = days.iter().filter_map(|d| d.cpc).collect();

    WindowStats {
        days: days.len(),
        observed_days: days.iter().filter(|d| d.observed).count(),
        ctr: SampleStats::from_values(&ctr),
        roas: SampleStats::from_values(&roas),
        cpc: SampleStats::from_values(&cpc),
    }
}

fn relative_change(previous: f64, recent: f64) -> f64 {
    let change = (recent - previous) / (previous + CHANGE_EPSILON);
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(offset: i64, ctr: f64, roas: Option<f64>) -> DailyMetrics {
        let base = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        DailyMetrics {
            date: base + chrono::Duration::days(offset),
            impressions: 1_000,
            clicks: 10,
            spend: if roas.is_some() { 10.0 } else { 0.0 },
            revenue: 0.0,
            ctr,
            cpc: Some(1.0),
            roas,
            observed: true,
        }
    }

    fn series(previous: &[(f64, Option<f64>)], recent: &[(f64, Option<f64>)]) -> Vec<DailyMetrics> {
        previous
            .iter()
            .chain(recent)
            .enumerate()
            .map(|(i, &(ctr, roas))| day(i64::try_from(i).unwrap(), ctr, roas))
            .collect()
    }

    #[test]
    fn fewer_than_two_windows_yields_none() {
        let days: Vec<_> = (0..10).map(|i| day(i, 0.01, Some(2.0))).collect();
        assert!(compare_windows(&days, 7).is_none());
        assert!(compare_windows(&days[..9], 5).is_none());
        assert!(compare_windows(&days, 5).is_some());
    }

    #[test]
    fn zero_window_yields_none() {
        let days: Vec<_> = (0..4).map(|i| day(i, 0.01, Some(2.0))).collect();
        assert!(compare_windows(&days, 0).is_none());
    }

    #[test]
    fn uses_last_two_windows_only() {
        // Oldest day is outside both windows and must not influence the means.
        let mut days = vec![day(-1, 0.9, Some(99.0))];
        days.extend(series(
            &[(0.01, Some(2.0)), (0.01, Some(2.0))],
            &[(0.008, Some(1.0)), (0.008, Some(1.0))],
        ));
        let cmp = compare_windows(&days, 2).unwrap();
        assert!((cmp.summary.previous_ctr - 0.01).abs() < 1e-12);
        assert!((cmp.summary.recent_ctr - 0.008).abs() < 1e-12);
        assert!((cmp.summary.previous_roas - 2.0).abs() < 1e-12);
        assert!((cmp.summary.recent_roas - 1.0).abs() < 1e-12);
        assert!((cmp.summary.ctr_change_pct - (-0.002 / 0.010_001)).abs() < 1e-9);
        assert_eq!(cmp.previous.days, 2);
        assert_eq!(cmp.recent.days, 2);
    }

    #[test]
    fn undefined_roas_is_excluded_from_mean() {
        let days = series(
            &[(0.01, Some(2.0)), (0.01, None)],
            &[(0.01, Some(4.0)), (0.01, None)],
        );
        let cmp = compare_windows(&days, 2).unwrap();
        assert!((cmp.summary.previous_roas - 2.0).abs() < 1e-12);
        assert!((cmp.summary.recent_roas - 4.0).abs() < 1e-12);
        assert_eq!(cmp.recent.roas.count, 1);
    }

    #[test]
    fn all_undefined_roas_falls_back_to_zero_change() {
        let days = series(&[(0.01, None); 3], &[(0.01, None); 3]);
        let cmp = compare_windows(&days, 3).unwrap();
        assert_eq!(cmp.summary.previous_roas, 0.0);
        assert_eq!(cmp.summary.recent_roas, 0.0);
        assert_eq!(cmp.summary.roas_change_pct, 0.0);
    }

    #[test]
    fn comparison_is_deterministic() {
        let days = series(&[(0.02, Some(3.0)); 7], &[(0.015, Some(2.5)); 7]);
        assert_eq!(compare_windows(&days, 7), compare_windows(&days, 7));
    }
}
