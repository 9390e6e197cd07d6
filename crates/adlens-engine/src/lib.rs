//! Campaign performance analysis engine for adlens.
//!
//! Turns one campaign's raw records into daily metrics, compares the last two
//! windows, ranks explanatory hypotheses, scores impact, and proposes
//! templated creative copy when performance has degraded. Pure computation:
//! no I/O, no global state.

pub mod creative;
pub mod error;
pub mod evaluate;
pub mod hypothesis;
pub mod metrics;
pub mod observer;
pub mod pipeline;
pub mod stats;
pub mod types;
pub mod window;

pub use error::EvaluationFailure;
pub use observer::{AnalysisEvent, AnalysisObserver, NoopObserver, TracingObserver};
pub use pipeline::{analyze_all, analyze_campaign};
pub use types::{
    CampaignAnalysis, CampaignOutcome, CampaignTotals, CreativeBundle, CreativeTrigger,
    DailyMetrics, EvaluationResult, Evidence, Hypothesis, HypothesisKind, Impact, Metric,
    MetricInsight, MetricSignificance, RunAnalysis, SampleStats, SkipReason, SkippedCampaign,
    Trend, WindowComparison, WindowStats, WindowSummary,
};
