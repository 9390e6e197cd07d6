//! Impact classification of a campaign's window-over-window change.
//!
//! Two strategies produce an [`EvaluationResult`]: fixed relative-change
//! rules ([`evaluate_rules`]) and per-metric z-tests
//! ([`evaluate_significance`]). Both share the same failure checks and the
//! same degraded fallback.

use adlens_core::ValidationStrategy;

use crate::error::EvaluationFailure;
use crate::observer::{AnalysisEvent, AnalysisObserver};
use crate::stats::SIGNIFICANCE_LEVEL;
use crate::types::{
    EvaluationResult, Evidence, Impact, Metric, MetricSignificance, SampleStats, WindowComparison,
    WindowStats,
};

/// CTR relative change below which the CTR rule fires.
pub const CTR_DELTA_LIMIT: f64 = -0.20;
/// ROAS relative change below which the ROAS rule fires.
pub const ROAS_DELTA_LIMIT: f64 = -0.15;
/// CPC relative change above which the CPC rule fires.
pub const CPC_DELTA_LIMIT: f64 = 0.20;

pub const NO_ISSUES_REASON: &str = "No performance issues detected";
pub const EVALUATION_ERROR_REASON: &str = "evaluation_error";

const TRIGGERED_CONFIDENCE: f64 = 0.7;
const QUIET_CONFIDENCE: f64 = 0.4;
const DEGRADED_CONFIDENCE: f64 = 0.1;

impl EvaluationResult {
    /// The safe low-impact result used when evaluation fails.
    #[must_use]
    pub fn degraded() -> Self {
        Self {
            impact: Impact::Low,
            severity: 0,
            reasons: vec![EVALUATION_ERROR_REASON.to_string()],
            confidence: DEGRADED_CONFIDENCE,
            evidence: None,
        }
    }

    /// `true` when this is the fallback from [`EvaluationResult::degraded`].
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.evidence.is_none()
    }

    /// Reasons produced by rules that actually fired.
    #[must_use]
    pub fn triggered_reasons(&self) -> &[String] {
        if self.severity > 0 {
            &self.reasons
        } else {
            &[]
        }
    }
}

/// Relative change of `recent` against `baseline`.
///
/// An empty sample or a zero / non-finite baseline mean yields `0.0`.
#[must_use]
pub fn relative_delta(baseline: &SampleStats, recent: &SampleStats) -> f64 {
    if baseline.count == 0
        || recent.count == 0
        || baseline.mean == 0.0
        || !baseline.mean.is_finite()
    {
        return 0.0;
    }
    (recent.mean - baseline.mean) / baseline.mean
}

/// Compute the CTR/ROAS/CPC deltas, rejecting windows that cannot support
/// an evaluation.
///
/// # Errors
///
/// Returns [`EvaluationFailure`] when a window is empty, neither window saw
/// any activity, or a delta is not finite.
pub fn evidence(
    baseline: &WindowStats,
    recent: &WindowStats,
) -> Result<Evidence, EvaluationFailure> {
    if baseline.days == 0 {
        return Err(EvaluationFailure::EmptyWindow { window: "baseline" });
    }
    if recent.days == 0 {
        return Err(EvaluationFailure::EmptyWindow { window: "recent" });
    }
    if baseline.observed_days == 0 && recent.observed_days == 0 {
        return Err(EvaluationFailure::NoNumericData);
    }

    let evidence = Evidence {
        ctr_delta: relative_delta(&baseline.ctr, &recent.ctr),
        roas_delta: relative_delta(&baseline.roas, &recent.roas),
        cpc_delta: relative_delta(&baseline.cpc, &recent.cpc),
    };

    for (metric, value) in [
        (Metric::Ctr, evidence.ctr_delta),
        (Metric::Roas, evidence.roas_delta),
        (Metric::Cpc, evidence.cpc_delta),
    ] {
        if !value.is_finite() {
            return Err(EvaluationFailure::NonFiniteDelta { metric });
        }
    }

    Ok(evidence)
}

/// Threshold-rule evaluation.
///
/// Each rule that fires adds one to severity and one reason, in fixed
/// CTR, ROAS, CPC order.
///
/// # Errors
///
/// See [`evidence`].
pub fn evaluate_rules(
    baseline: &WindowStats,
    recent: &WindowStats,
) -> Result<EvaluationResult, EvaluationFailure> {
    let evidence = evidence(baseline, recent)?;

    let mut severity = 0u32;
    let mut reasons = Vec::new();

    if evidence.ctr_delta < CTR_DELTA_LIMIT {
        severity += 1;
        reasons.push(format!("CTR dropped {}", percent(-evidence.ctr_delta)));
    }
    if evidence.roas_delta < ROAS_DELTA_LIMIT {
        severity += 1;
        reasons.push(format!("ROAS fell {}", percent(-evidence.roas_delta)));
    }
    if evidence.cpc_delta > CPC_DELTA_LIMIT {
        severity += 1;
        reasons.push(format!("CPC increased {}", percent(evidence.cpc_delta)));
    }

    let impact = match severity {
        0 => Impact::Low,
        1 => Impact::Medium,
        _ => Impact::High,
    };

    Ok(finish(impact, severity, reasons, evidence))
}

/// Significance-based evaluation.
///
/// A metric counts when its change is adverse (CTR or ROAS down, CPC up)
/// and its p-value is below [`SIGNIFICANCE_LEVEL`]. Impact is the most
/// severe p-value rating among counted metrics.
///
/// # Errors
///
/// See [`evidence`].
pub fn evaluate_significance(
    baseline: &WindowStats,
    recent: &WindowStats,
    significance: &[MetricSignificance],
) -> Result<EvaluationResult, EvaluationFailure> {
    let evidence = evidence(baseline, recent)?;

    let mut severity = 0u32;
    let mut impact = Impact::Low;
    let mut reasons = Vec::new();

    for test in significance {
        let adverse = match test.metric {
            Metric::Ctr | Metric::Roas => test.z < 0.0,
            Metric::Cpc => test.z > 0.0,
        };
        if adverse && test.p_value < SIGNIFICANCE_LEVEL {
            severity += 1;
            impact = impact.max(test.severity);
            reasons.push(format!(
                "{} change significant (z={:.2}, p={:.4})",
                test.metric, test.z, test.p_value
            ));
        }
    }

    Ok(finish(impact, severity, reasons, evidence))
}

/// Evaluate with the configured strategy.
///
/// # Errors
///
/// See [`evidence`].
pub fn evaluate(
    strategy: ValidationStrategy,
    comparison: &WindowComparison,
    significance: &[MetricSignificance],
) -> Result<EvaluationResult, EvaluationFailure> {
    match strategy {
        ValidationStrategy::Rules => evaluate_rules(&comparison.previous, &comparison.recent),
        ValidationStrategy::Significance => {
            evaluate_significance(&comparison.previous, &comparison.recent, significance)
        }
    }
}

/// [`evaluate`], with any failure reported to `observer` and replaced by
/// [`EvaluationResult::degraded`].
#[must_use]
pub fn evaluate_or_degrade(
    strategy: ValidationStrategy,
    comparison: &WindowComparison,
    significance: &[MetricSignificance],
    campaign: &str,
    observer: &dyn AnalysisObserver,
) -> EvaluationResult {
    match evaluate(strategy, comparison, significance) {
        Ok(result) => result,
        Err(failure) => {
            observer.on_event(&AnalysisEvent::EvaluationDegraded {
                campaign,
                failure: &failure,
            });
            EvaluationResult::degraded()
        }
    }
}

fn finish(
    impact: Impact,
    severity: u32,
    mut reasons: Vec<String>,
    evidence: Evidence,
) -> EvaluationResult {
    if reasons.is_empty() {
        reasons.push(NO_ISSUES_REASON.to_string());
    }
    EvaluationResult {
        impact,
        severity,
        reasons,
        confidence: if severity > 0 {
            TRIGGERED_CONFIDENCE
        } else {
            QUIET_CONFIDENCE
        },
        evidence: Some(evidence),
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod tests;
