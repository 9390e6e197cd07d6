//! Run artifacts: two JSON payloads and a Markdown summary per run.

mod json;
mod markdown;

use std::path::{Path, PathBuf};

use adlens_core::AnalysisConfig;
use adlens_engine::RunAnalysis;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use json::{creatives_json, insights_json};
pub use markdown::render_markdown;

/// Identity and provenance shared by every artifact of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub input_fingerprint: String,
    pub rows_read: usize,
    pub rows_rejected: usize,
    pub config: AnalysisConfig,
}

impl RunMetadata {
    /// Fresh run id stamped with the current time.
    #[must_use]
    pub fn new(
        input_path: &Path,
        input_fingerprint: String,
        rows_read: usize,
        rows_rejected: usize,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            input_path: input_path.display().to_string(),
            input_fingerprint,
            rows_read,
            rows_rejected,
            config,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub insights: PathBuf,
    pub creatives: PathBuf,
    pub markdown: PathBuf,
}

/// Write `insights_<run_id>.json`, `creatives_<run_id>.json` and
/// `report_<run_id>.md` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, serialization fails,
/// or any file cannot be written.
pub fn write_reports(
    dir: &Path,
    meta: &RunMetadata,
    run: &RunAnalysis,
) -> anyhow::Result<ReportPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating reports directory {}", dir.display()))?;

    let paths = ReportPaths {
        insights: dir.join(format!("insights_{}.json", meta.run_id)),
        creatives: dir.join(format!("creatives_{}.json", meta.run_id)),
        markdown: dir.join(format!("report_{}.md", meta.run_id)),
    };

    write_file(&paths.insights, &insights_json(meta, run)?)?;
    write_file(&paths.creatives, &creatives_json(meta, run)?)?;
    write_file(&paths.markdown, &render_markdown(meta, run))?;

    tracing::info!(
        run_id = %meta.run_id,
        dir = %dir.display(),
        campaigns = run.analyses.len(),
        skipped = run.skipped.len(),
        "reports written"
    );
    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
