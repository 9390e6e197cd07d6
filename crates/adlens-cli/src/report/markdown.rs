use adlens_engine::{CampaignAnalysis, CreativeBundle, CreativeTrigger, Evidence, RunAnalysis};

use super::RunMetadata;

/// Render the human-readable run report.
#[must_use]
pub fn render_markdown(meta: &RunMetadata, run: &RunAnalysis) -> String {
    let mut lines: Vec<String> = Vec::new();
    let generated = meta.generated_at.format("%Y-%m-%d %H:%M UTC");

    lines.push("# Campaign Performance Report".to_string());
    lines.push(String::new());
    lines.push(format!("**Run**: {}", meta.run_id));
    lines.push(format!("**Generated**: {generated}"));
    lines.push(format!("**Input**: {}", meta.input_path));
    lines.push(format!("**Fingerprint**: `{}`", meta.input_fingerprint));
    lines.push(format!(
        "**Rows**: {} read, {} rejected",
        meta.rows_read, meta.rows_rejected
    ));
    lines.push(format!(
        "**Settings**: window {} days, CTR threshold {}, strategy {}",
        meta.config.window_days, meta.config.ctr_threshold, meta.config.strategy
    ));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    if run.analyses.is_empty() {
        lines.push("No campaign had enough history to analyze.".to_string());
        lines.push(String::new());
    } else {
        lines.push("| Campaign | Days | Impact | Confidence | CTR change | ROAS change |".to_string());
        lines.push("|----------|------|--------|------------|------------|-------------|".to_string());
        for analysis in &run.analyses {
            lines.push(format!(
                "| {} | {} | {} | {:.2} | {} | {} |",
                analysis.campaign,
                analysis.days_analyzed,
                analysis.evaluation.impact,
                analysis.evaluation.confidence,
                percent(analysis.window.ctr_change_pct),
                percent(analysis.window.roas_change_pct),
            ));
        }
        lines.push(String::new());

        for analysis in &run.analyses {
            campaign_section(&mut lines, analysis);
        }
    }

    lines.push(format!("**Skipped campaigns**: {}", run.skipped.len()));
    for skipped in &run.skipped {
        lines.push(format!("- {}: {}", skipped.campaign, skipped.reason));
    }
    lines.push(String::new());

    lines.join("\n")
}

fn campaign_section(lines: &mut Vec<String>, analysis: &CampaignAnalysis) {
    let eval = &analysis.evaluation;

    lines.push(format!("## {}", analysis.campaign));
    lines.push(String::new());
    lines.push(format!(
        "**Impact**: {} (severity {}, confidence {:.2})",
        eval.impact, eval.severity, eval.confidence
    ));
    lines.push(String::new());

    lines.push("**Reasons**:".to_string());
    for reason in &eval.reasons {
        lines.push(format!("- {reason}"));
    }
    lines.push(String::new());

    lines.push("**Hypotheses**:".to_string());
    for hypothesis in &analysis.hypotheses {
        lines.push(format!(
            "- {} (confidence {:.2}): {}",
            hypothesis.text, hypothesis.confidence, hypothesis.evidence
        ));
    }
    lines.push(String::new());

    lines.push("**Trends**:".to_string());
    for insight in &analysis.insights {
        lines.push(format!(
            "- {}: {:.4} -> {:.4} ({}). {}",
            insight.metric,
            insight.previous,
            insight.recent,
            percent(insight.change_pct),
            insight.interpretation
        ));
    }
    lines.push(String::new());

    if let Some(evidence) = &eval.evidence {
        lines.push(evidence_line(evidence));
        lines.push(String::new());
    }

    if let Some(bundle) = &analysis.creative {
        creative_section(lines, bundle);
    }
}

fn evidence_line(evidence: &Evidence) -> String {
    format!(
        "**KPI evidence**: CTR {}, ROAS {}, CPC {}",
        percent(evidence.ctr_delta),
        percent(evidence.roas_delta),
        percent(evidence.cpc_delta)
    )
}

fn creative_section(lines: &mut Vec<String>, bundle: &CreativeBundle) {
    lines.push("### Creative suggestions".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Triggered by {} (campaign CTR {:.4}). Keywords: {}",
        match bundle.trigger {
            CreativeTrigger::LowCtr => "low CTR",
            CreativeTrigger::Impact => "impact",
        },
        bundle.ctr,
        bundle.keywords.join(", ")
    ));
    lines.push(String::new());

    let groups: [(&str, &[String]); 4] = [
        ("Headlines", &bundle.headline_variations),
        ("Hooks", &bundle.hook_variations),
        ("Descriptions", &bundle.description_variations),
        ("Test ideas", &bundle.issue_ideas),
    ];
    for (title, items) in groups {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("**{title}**:"));
        for item in items {
            lines.push(format!("- {item}"));
        }
        lines.push(String::new());
    }
}

fn percent(fraction: f64) -> String {
    format!("{:+.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use adlens_core::AnalysisConfig;
    use adlens_engine::{RunAnalysis, SkipReason, SkippedCampaign};

    use super::*;

    fn meta() -> RunMetadata {
        RunMetadata::new(
            Path::new("data/campaigns.csv"),
            "abc123".to_string(),
            42,
            2,
            AnalysisConfig::default(),
        )
    }

    #[test]
    fn empty_run_still_has_header_and_skip_count() {
        let run = RunAnalysis {
            analyses: Vec::new(),
            skipped: vec![SkippedCampaign {
                campaign: "New Launch".to_string(),
                reason: SkipReason::InsufficientHistory {
                    days: 10,
                    required: 14,
                },
            }],
        };
        let md = render_markdown(&meta(), &run);
        assert!(md.starts_with("# Campaign Performance Report"));
        assert!(md.contains("**Rows**: 42 read, 2 rejected"));
        assert!(md.contains("No campaign had enough history"));
        assert!(md.contains("**Skipped campaigns**: 1"));
        assert!(md.contains("- New Launch: only 10 days of history, need 14"));
    }

    #[test]
    fn percent_is_signed() {
        assert_eq!(percent(-0.4), "-40.00%");
        assert_eq!(percent(0.125), "+12.50%");
    }
}
