//! Two-sample significance scoring for window-over-window metric changes.

use crate::types::{Impact, Metric, MetricSignificance, SampleStats, WindowComparison};

/// p-value below which a change counts as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// p-value below which a significant change is rated high severity.
pub const HIGH_SIGNIFICANCE_LEVEL: f64 = 0.01;

impl SampleStats {
    /// Mean and sample (n-1) variance of `values`, ignoring non-finite
    /// entries. Variance is `0.0` for fewer than two values.
    ///
    /// Accumulates with Welford's running update so large magnitudes do not
    /// overflow a plain sum; a mean or variance that still cannot be
    /// represented is reported as `0.0`.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let mut count = 0usize;
        let mut mean = 0.0_f64;
        let mut m2 = 0.0_f64;

        for value in values.iter().copied().filter(|v| v.is_finite()) {
            count += 1;
            #[allow(clippy::cast_precision_loss)]
            let k = count as f64;
            let delta = value - mean;
            mean += delta / k;
            m2 += delta * (value - mean);
        }

        if count == 0 {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let variance = if count < 2 {
            0.0
        } else {
            m2 / (count as f64 - 1.0)
        };

        Self {
            mean: finite_or_zero(mean),
            variance: finite_or_zero(variance),
            count,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// z-statistic and two-sided p-value for the difference `recent - baseline`.
///
/// Uses the unpooled standard error `sqrt(var_b/n_b + var_r/n_r)`. An empty
/// sample or a zero standard error gives `(0.0, 1.0)`.
#[must_use]
pub fn z_score_and_p_value(baseline: &SampleStats, recent: &SampleStats) -> (f64, f64) {
    if baseline.count == 0 || recent.count == 0 {
        return (0.0, 1.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let denom =
        (baseline.variance / baseline.count as f64 + recent.variance / recent.count as f64).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return (0.0, 1.0);
    }

    let z = (recent.mean - baseline.mean) / denom;
    if !z.is_finite() {
        return (0.0, 1.0);
    }
    (z, two_sided_p_value(z))
}

/// Two-sided tail probability of `z` under the standard normal.
#[must_use]
pub fn two_sided_p_value(z: f64) -> f64 {
    if z == 0.0 {
        return 1.0;
    }
    erfc(z.abs() / std::f64::consts::SQRT_2).clamp(0.0, 1.0)
}

/// Map a p-value onto the impact scale.
#[must_use]
pub fn severity_from_p(p: f64) -> Impact {
    if p < HIGH_SIGNIFICANCE_LEVEL {
        Impact::High
    } else if p < SIGNIFICANCE_LEVEL {
        Impact::Medium
    } else {
        Impact::Low
    }
}

/// Run the z-test on CTR, ROAS and CPC between the two windows.
#[must_use]
pub fn assess_significance(comparison: &WindowComparison) -> Vec<MetricSignificance> {
    let pairs = [
        (Metric::Ctr, comparison.previous.ctr, comparison.recent.ctr),
        (Metric::Roas, comparison.previous.roas, comparison.recent.roas),
        (Metric::Cpc, comparison.previous.cpc, comparison.recent.cpc),
    ];

    pairs
        .into_iter()
        .map(|(metric, baseline, recent)| {
            let (z, p_value) = z_score_and_p_value(&baseline, &recent);
            MetricSignificance {
                metric,
                baseline,
                recent,
                z,
                p_value,
                severity: severity_from_p(p_value),
            }
        })
        .collect()
}

/// Complementary error function.
#[must_use]
pub fn erfc(x: f64) -> f64 {
    1.0 - erf(x)
}

/// Error function approximation (Abramowitz and Stegun 7.1.26), absolute
/// error below 1.5e-7.
#[must_use]
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}
