use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw advertising observation, already coerced by the loader.
///
/// Numeric fields are `None` when the source value was missing or not a
/// number. Downstream aggregation treats `None` as a zero contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_name: String,
    pub adset_name: Option<String>,
    pub date: NaiveDate,
    pub impressions: Option<u64>,
    pub clicks: Option<u64>,
    pub spend: Option<f64>,
    /// Purchase value attributed to the row, resolved from whichever revenue
    /// alias the input carried.
    pub revenue: Option<f64>,
    pub purchases: Option<u64>,
    pub creative_message: Option<String>,
    pub audience_type: Option<String>,
    pub platform: Option<String>,
    pub country: Option<String>,
}

impl CampaignRecord {
    /// A record with only the identifying fields set.
    #[must_use]
    pub fn new(campaign_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            adset_name: None,
            date,
            impressions: None,
            clicks: None,
            spend: None,
            revenue: None,
            purchases: None,
            creative_message: None,
            audience_type: None,
            platform: None,
            country: None,
        }
    }
}

/// All records for one campaign, sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecords {
    pub campaign_name: String,
    pub records: Vec<CampaignRecord>,
}

impl CampaignRecords {
    /// Returns the number of raw rows for this campaign.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Non-empty creative messages in record order.
    pub fn creative_messages(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter_map(|r| r.creative_message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn creative_messages_skips_missing_and_blank() {
        let mut a = CampaignRecord::new("Spring", day(1));
        a.creative_message = Some("Breathable cotton".to_string());
        let b = CampaignRecord::new("Spring", day(2));
        let mut c = CampaignRecord::new("Spring", day(3));
        c.creative_message = Some("   ".to_string());

        let group = CampaignRecords {
            campaign_name: "Spring".to_string(),
            records: vec![a, b, c],
        };
        let messages: Vec<&str> = group.creative_messages().collect();
        assert_eq!(messages, vec!["Breathable cotton"]);
        assert_eq!(group.row_count(), 3);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = CampaignRecord::new("Spring", day(4));
        record.impressions = Some(1_000);
        record.spend = Some(12.5);
        let json = serde_json::to_string(&record).unwrap();
        let back: CampaignRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
