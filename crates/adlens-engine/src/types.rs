use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated counts and rate metrics for one campaign on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
    /// `clicks / impressions`, or `0.0` when there were no impressions.
    pub ctr: f64,
    /// `spend / clicks`; `None` when there were no clicks.
    pub cpc: Option<f64>,
    /// `revenue / spend`; `None` when nothing was spent.
    pub roas: Option<f64>,
    /// Any record carried a numeric impressions, clicks, spend or revenue
    /// value, zero included.
    pub observed: bool,
}

/// Whole-history totals for one campaign, used by the creative trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl CampaignTotals {
    /// Aggregate click-through rate; `0.0` without impressions.
    #[must_use]
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ctr = self.clicks as f64 / self.impressions as f64;
            ctr
        }
    }
}

/// Mean, sample variance and size of one metric over one window.
///
/// Only defined daily values contribute. An empty sample has mean `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub mean: f64,
    pub variance: f64,
    pub count: usize,
}

/// Per-metric samples for one window of daily metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Days in the window, defined values or not.
    pub days: usize,
    /// Days with at least one numeric value in their records.
    pub observed_days: usize,
    pub ctr: SampleStats,
    pub roas: SampleStats,
    pub cpc: SampleStats,
}

/// Recent vs previous window means and their relative changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub recent_ctr: f64,
    pub previous_ctr: f64,
    pub recent_roas: f64,
    pub previous_roas: f64,
    pub ctr_change_pct: f64,
    pub roas_change_pct: f64,
}

/// Output of the window comparison: the summary plus the raw samples the
/// validators need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowComparison {
    pub summary: WindowSummary,
    pub previous: WindowStats,
    pub recent: WindowStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Metric {
    Ctr,
    Roas,
    Cpc,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Ctr => write!(f, "CTR"),
            Metric::Roas => write!(f, "ROAS"),
            Metric::Cpc => write!(f, "CPC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    SignificantlyDropped,
    SignificantlyIncreased,
    Stable,
}

/// Narrative annotation of one metric's movement between windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInsight {
    pub metric: Metric,
    pub recent: f64,
    pub previous: f64,
    pub change_pct: f64,
    pub trend: Trend,
    pub interpretation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisKind {
    CreativeFatigue,
    SpendInefficiency,
    AudienceSaturation,
    NoMajorIssues,
}

/// A ranked explanation for the observed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub kind: HypothesisKind,
    #[serde(rename = "hypothesis")]
    pub text: String,
    /// Fixed per rule, in `[0, 1]`.
    pub confidence: f64,
    pub evidence: String,
}

/// Coarse classification of how much a campaign moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    /// `true` for medium and high.
    #[must_use]
    pub fn is_actionable(self) -> bool {
        matches!(self, Impact::Medium | Impact::High)
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Low => write!(f, "low"),
            Impact::Medium => write!(f, "medium"),
            Impact::High => write!(f, "high"),
        }
    }
}

/// Relative changes, recent vs baseline, backing an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub ctr_delta: f64,
    pub roas_delta: f64,
    pub cpc_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub impact: Impact,
    /// Number of rules that fired.
    pub severity: u32,
    pub reasons: Vec<String>,
    pub confidence: f64,
    /// `None` only on the degraded path.
    pub evidence: Option<Evidence>,
}

/// Two-sample z-test of one metric between the baseline and recent windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSignificance {
    pub metric: Metric,
    pub baseline: SampleStats,
    pub recent: SampleStats,
    pub z: f64,
    pub p_value: f64,
    pub severity: Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeTrigger {
    LowCtr,
    Impact,
}

/// Templated copy suggestions for an underperforming campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeBundle {
    pub campaign: String,
    pub trigger: CreativeTrigger,
    /// Aggregate CTR over the campaign's full history.
    pub ctr: f64,
    /// Most frequent first.
    pub keywords: Vec<String>,
    pub headline_variations: Vec<String>,
    pub hook_variations: Vec<String>,
    pub description_variations: Vec<String>,
    /// One test idea per triggered evaluation reason.
    pub issue_ideas: Vec<String>,
}

/// Everything the engine produced for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignAnalysis {
    pub campaign: String,
    pub days_analyzed: usize,
    pub window: WindowSummary,
    pub insights: Vec<MetricInsight>,
    pub hypotheses: Vec<Hypothesis>,
    pub evaluation: EvaluationResult,
    pub significance: Vec<MetricSignificance>,
    pub creative: Option<CreativeBundle>,
}

/// Why a campaign produced no analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    TooFewRows { rows: usize, required: usize },
    InsufficientHistory { days: usize, required: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewRows { rows, required } => {
                write!(f, "only {rows} rows, need {required}")
            }
            SkipReason::InsufficientHistory { days, required } => {
                write!(f, "only {days} days of history, need {required}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CampaignOutcome {
    Analyzed(Box<CampaignAnalysis>),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCampaign {
    pub campaign: String,
    pub reason: SkipReason,
}

/// Per-run collection of outcomes, in campaign discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunAnalysis {
    pub analyses: Vec<CampaignAnalysis>,
    pub skipped: Vec<SkippedCampaign>,
}

impl RunAnalysis {
    /// Collect `(campaign, outcome)` pairs, keeping their order.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, CampaignOutcome)>,
    {
        let mut run = Self::default();
        for (campaign, outcome) in outcomes {
            match outcome {
                CampaignOutcome::Analyzed(analysis) => run.analyses.push(*analysis),
                CampaignOutcome::Skipped(reason) => {
                    run.skipped.push(SkippedCampaign { campaign, reason });
                }
            }
        }
        run
    }

    /// Creative bundles in campaign order.
    pub fn creatives(&self) -> impl Iterator<Item = &CreativeBundle> {
        self.analyses.iter().filter_map(|a| a.creative.as_ref())
    }
}
