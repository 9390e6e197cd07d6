//! Deterministic creative-copy suggestions for underperforming campaigns.
//!
//! Keywords come from the campaign's existing creative messages; headlines,
//! hooks and descriptions are fixed templates around the top keyword.

use std::collections::HashMap;

use adlens_core::CreativeTriggerMode;

use crate::types::{CampaignTotals, CreativeBundle, CreativeTrigger, EvaluationResult, Impact};

/// Used when no message yields a qualifying token.
pub const FALLBACK_KEYWORDS: [&str; 3] = ["comfort", "fit", "premium"];

const MAX_KEYWORDS: usize = 5;
const MIN_KEYWORD_CHARS: usize = 4;
const STRIP_CHARS: &[char] = &['.', ',', '!', '?', ':', ';', '"', '\'', '(', ')'];

/// Extract up to five keywords, most frequent first.
///
/// Messages are lower-cased, split on whitespace and trimmed of surrounding
/// punctuation; tokens of four or more characters are counted. Ties keep
/// first-seen order.
#[must_use]
pub fn extract_keywords<S: AsRef<str>>(messages: &[S]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for message in messages {
        for word in message.as_ref().to_lowercase().split_whitespace() {
            let cleaned = word.trim_matches(STRIP_CHARS);
            if cleaned.chars().count() < MIN_KEYWORD_CHARS {
                continue;
            }
            let count = counts.entry(cleaned.to_string()).or_insert(0);
            if *count == 0 {
                order.push(cleaned.to_string());
            }
            *count += 1;
        }
    }

    if order.is_empty() {
        return FALLBACK_KEYWORDS.iter().map(|k| (*k).to_string()).collect();
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(MAX_KEYWORDS);
    order
}

#[must_use]
pub fn headlines(keyword: &str) -> Vec<String> {
    vec![
        format!("Experience true {keyword} today."),
        format!("Engineered for unmatched {keyword}."),
        format!("Your perfect {keyword} fit awaits."),
        "Designed for comfort. Built for performance.".to_string(),
    ]
}

#[must_use]
pub fn hooks(keyword: &str) -> Vec<String> {
    vec![
        "Feel the difference instantly.".to_string(),
        "Made for all–day confidence.".to_string(),
        format!("Upgrade your {keyword} experience."),
        format!("Say goodbye to discomfort — hello to {keyword}!"),
    ]
}

#[must_use]
pub fn descriptions(keyword: &str) -> Vec<String> {
    vec![
        format!("Our new collection combines premium fabric with everyday {keyword}."),
        format!("Engineered for durability, breathability, and maximum {keyword}."),
        format!("Perfect for workouts, daily wear, and long hours — enjoy pure {keyword}."),
    ]
}

/// Decide whether, and by which path, a campaign qualifies for creatives.
///
/// The low-CTR path is checked first when both are enabled.
#[must_use]
pub fn creative_trigger(
    mode: CreativeTriggerMode,
    ctr: f64,
    ctr_threshold: f64,
    impact: Option<Impact>,
) -> Option<CreativeTrigger> {
    let low_ctr = ctr < ctr_threshold;
    let actionable = impact.is_some_and(Impact::is_actionable);

    match mode {
        CreativeTriggerMode::LowCtr if low_ctr => Some(CreativeTrigger::LowCtr),
        CreativeTriggerMode::Impact if actionable => Some(CreativeTrigger::Impact),
        CreativeTriggerMode::Either if low_ctr => Some(CreativeTrigger::LowCtr),
        CreativeTriggerMode::Either if actionable => Some(CreativeTrigger::Impact),
        _ => None,
    }
}

/// Low-CTR entry point: produce a bundle only when the aggregate CTR is
/// below `ctr_threshold`.
#[must_use]
pub fn recommend_for_low_ctr<S: AsRef<str>>(
    campaign: &str,
    totals: &CampaignTotals,
    messages: &[S],
    ctr_threshold: f64,
) -> Option<CreativeBundle> {
    creative_trigger(CreativeTriggerMode::LowCtr, totals.ctr(), ctr_threshold, None)
        .map(|trigger| build_bundle(campaign, trigger, totals, messages, None))
}

/// Impact entry point: produce a bundle only for medium or high impact.
#[must_use]
pub fn recommend_for_impact<S: AsRef<str>>(
    campaign: &str,
    totals: &CampaignTotals,
    messages: &[S],
    evaluation: &EvaluationResult,
) -> Option<CreativeBundle> {
    evaluation
        .impact
        .is_actionable()
        .then(|| build_bundle(campaign, CreativeTrigger::Impact, totals, messages, Some(evaluation)))
}

/// Combined entry point driven by [`CreativeTriggerMode`].
#[must_use]
pub fn recommend<S: AsRef<str>>(
    mode: CreativeTriggerMode,
    campaign: &str,
    totals: &CampaignTotals,
    messages: &[S],
    ctr_threshold: f64,
    evaluation: Option<&EvaluationResult>,
) -> Option<CreativeBundle> {
    let trigger = creative_trigger(
        mode,
        totals.ctr(),
        ctr_threshold,
        evaluation.map(|e| e.impact),
    )?;
    Some(build_bundle(campaign, trigger, totals, messages, evaluation))
}

fn build_bundle<S: AsRef<str>>(
    campaign: &str,
    trigger: CreativeTrigger,
    totals: &CampaignTotals,
    messages: &[S],
    evaluation: Option<&EvaluationResult>,
) -> CreativeBundle {
    let keywords = extract_keywords(messages);
    let top = keywords
        .first()
        .map_or(FALLBACK_KEYWORDS[0], String::as_str)
        .to_string();

    let issue_ideas = evaluation
        .map(|e| {
            e.triggered_reasons()
                .iter()
                .map(|reason| format!("Test a new creative variation addressing: {reason}"))
                .collect()
        })
        .unwrap_or_default();

    CreativeBundle {
        campaign: campaign.to_string(),
        trigger,
        ctr: totals.ctr(),
        headline_variations: headlines(&top),
        hook_variations: hooks(&top),
        description_variations: descriptions(&top),
        keywords,
        issue_ideas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Evidence;

    fn totals(impressions: u64, clicks: u64) -> CampaignTotals {
        CampaignTotals {
            impressions,
            clicks,
            spend: 100.0,
            revenue: 150.0,
        }
    }

    fn evaluation(impact: Impact, reasons: &[&str]) -> EvaluationResult {
        EvaluationResult {
            impact,
            severity: u32::try_from(reasons.len()).unwrap(),
            reasons: reasons.iter().map(|r| (*r).to_string()).collect(),
            confidence: 0.7,
            evidence: Some(Evidence {
                ctr_delta: -0.3,
                roas_delta: 0.0,
                cpc_delta: 0.0,
            }),
        }
    }

    #[test]
    fn keywords_rank_by_frequency_then_first_seen() {
        let messages = [
            "Breathable cotton boxers",
            "Cotton comfort, all day!",
            "Soft cotton. Real comfort.",
        ];
        assert_eq!(
            extract_keywords(&messages),
            vec!["cotton", "comfort", "breathable", "boxers", "soft"]
        );
    }

    #[test]
    fn keywords_drop_short_tokens_and_punctuation() {
        let keywords = extract_keywords(&["Soft premium comfort fit daily wear"]);
        assert_eq!(keywords, vec!["soft", "premium", "comfort", "daily", "wear"]);
        assert!(!keywords.iter().any(|k| k == "fit"));
    }

    #[test]
    fn keywords_fall_back_when_nothing_qualifies() {
        let empty: [&str; 0] = [];
        assert_eq!(extract_keywords(&empty), vec!["comfort", "fit", "premium"]);
        assert_eq!(extract_keywords(&["a fit, to wow"]), vec!["comfort", "fit", "premium"]);
    }

    #[test]
    fn keyword_extraction_is_deterministic() {
        let messages = ["alpha beta gamma delta", "epsilon zeta alpha theta", "beta iota"];
        assert_eq!(extract_keywords(&messages), extract_keywords(&messages));
    }

    #[test]
    fn templates_interpolate_top_keyword() {
        assert_eq!(headlines("premium")[0], "Experience true premium today.");
        assert_eq!(headlines("premium").len(), 4);
        assert_eq!(hooks("premium")[2], "Upgrade your premium experience.");
        assert_eq!(hooks("premium").len(), 4);
        assert_eq!(descriptions("premium").len(), 3);
        assert_eq!(hooks("premium")[1], "Made for all–day confidence.");
        assert_eq!(
            hooks("premium")[3],
            "Say goodbye to discomfort — hello to premium!"
        );
        assert_eq!(
            descriptions("premium")[2],
            "Perfect for workouts, daily wear, and long hours — enjoy pure premium."
        );
    }

    #[test]
    fn low_ctr_path_builds_bundle() {
        let bundle = recommend_for_low_ctr(
            "Women Briefs",
            &totals(10_000, 50),
            &["Soft premium comfort fit daily wear"],
            0.01,
        )
        .expect("ctr 0.005 is below threshold");
        assert_eq!(bundle.trigger, CreativeTrigger::LowCtr);
        assert!((bundle.ctr - 0.005).abs() < 1e-12);
        assert_eq!(bundle.headline_variations[0], "Experience true soft today.");
        assert!(bundle.issue_ideas.is_empty());
    }

    #[test]
    fn low_ctr_path_is_absent_for_healthy_ctr() {
        let bundle = recommend_for_low_ctr("Women Briefs", &totals(1_000, 20), &["x"], 0.01);
        assert!(bundle.is_none());
    }

    #[test]
    fn ctr_equal_to_threshold_does_not_trigger() {
        let bundle = recommend_for_low_ctr("Women Briefs", &totals(1_000, 10), &["x"], 0.01);
        assert!(bundle.is_none());
    }

    #[test]
    fn impact_path_adds_issue_ideas() {
        let eval = evaluation(Impact::Medium, &["CTR dropped 30.00%"]);
        let bundle = recommend_for_impact("Men Boxers", &totals(1_000, 30), &["Cotton"], &eval)
            .expect("medium impact triggers");
        assert_eq!(bundle.trigger, CreativeTrigger::Impact);
        assert_eq!(
            bundle.issue_ideas,
            vec!["Test a new creative variation addressing: CTR dropped 30.00%".to_string()]
        );
        assert_eq!(bundle.keywords, vec!["comfort", "fit", "premium"]);
    }

    #[test]
    fn impact_path_skips_low_impact() {
        let eval = evaluation(Impact::Low, &[]);
        assert!(recommend_for_impact("Men Boxers", &totals(1_000, 5), &["Cotton"], &eval).is_none());
    }

    #[test]
    fn trigger_modes() {
        use CreativeTriggerMode::{Either, Impact as ByImpact, LowCtr};
        assert_eq!(creative_trigger(LowCtr, 0.005, 0.01, Some(Impact::Low)), Some(CreativeTrigger::LowCtr));
        assert_eq!(creative_trigger(LowCtr, 0.02, 0.01, Some(Impact::High)), None);
        assert_eq!(creative_trigger(ByImpact, 0.005, 0.01, Some(Impact::Low)), None);
        assert_eq!(creative_trigger(ByImpact, 0.02, 0.01, Some(Impact::High)), Some(CreativeTrigger::Impact));
        assert_eq!(creative_trigger(Either, 0.005, 0.01, Some(Impact::High)), Some(CreativeTrigger::LowCtr));
        assert_eq!(creative_trigger(Either, 0.02, 0.01, Some(Impact::Medium)), Some(CreativeTrigger::Impact));
        assert_eq!(creative_trigger(Either, 0.02, 0.01, None), None);
    }

    #[test]
    fn combined_entry_point_matches_mode() {
        let eval = evaluation(Impact::High, &["CTR dropped 30.00%", "ROAS fell 20.00%"]);
        let bundle = recommend(
            CreativeTriggerMode::Either,
            "Men Boxers",
            &totals(1_000, 30),
            &["Cotton waistband"],
            0.01,
            Some(&eval),
        )
        .unwrap();
        assert_eq!(bundle.trigger, CreativeTrigger::Impact);
        assert_eq!(bundle.issue_ideas.len(), 2);
        assert_eq!(bundle.keywords, vec!["cotton", "waistband"]);
    }
}
