use std::collections::HashMap;

use adlens_core::{CampaignRecord, CampaignRecords};

/// Group records by campaign name.
///
/// Groups appear in the order their campaign was first seen; each group is
/// stably sorted by date ascending.
#[must_use]
pub fn group_by_campaign(records: Vec<CampaignRecord>) -> Vec<CampaignRecords> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CampaignRecords> = Vec::new();

    for record in records {
        let slot = *index
            .entry(record.campaign_name.clone())
            .or_insert_with(|| {
                groups.push(CampaignRecords {
                    campaign_name: record.campaign_name.clone(),
                    records: Vec::new(),
                });
                groups.len() - 1
            });
        groups[slot].records.push(record);
    }

    for group in &mut groups {
        group.records.sort_by_key(|r| r.date);
    }
    groups
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(name: &str, day: u32, clicks: u64) -> CampaignRecord {
        let mut r = CampaignRecord::new(name, NaiveDate::from_ymd_opt(2025, 3, day).unwrap());
        r.clicks = Some(clicks);
        r
    }

    #[test]
    fn groups_keep_discovery_order() {
        let groups = group_by_campaign(vec![
            record("Zeta", 1, 1),
            record("Alpha", 1, 2),
            record("Zeta", 2, 3),
        ]);
        let names: Vec<&str> = groups.iter().map(|g| g.campaign_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(groups[0].row_count(), 2);
    }

    #[test]
    fn group_sort_is_stable_by_date() {
        let groups = group_by_campaign(vec![
            record("A", 3, 1),
            record("A", 1, 2),
            record("A", 3, 3),
            record("A", 2, 4),
        ]);
        let clicks: Vec<Option<u64>> = groups[0].records.iter().map(|r| r.clicks).collect();
        assert_eq!(clicks, vec![Some(2), Some(4), Some(1), Some(3)]);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_campaign(Vec::new()).is_empty());
    }
}
