use thiserror::Error;

use crate::types::Metric;

/// Why an evaluation could not produce a trustworthy result.
///
/// Callers that must always have a result go through
/// [`crate::evaluate::evaluate_or_degrade`], which turns any of these into the
/// degraded low-impact evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationFailure {
    #[error("{window} window has no days")]
    EmptyWindow { window: &'static str },

    #[error("no numeric values in either window")]
    NoNumericData,

    #[error("{metric} delta is not finite")]
    NonFiniteDelta { metric: Metric },
}
