//! Column resolution for campaign input files.
//!
//! Header names are resolved to positions once, before any row is read, so
//! row conversion never searches by name.

use crate::error::IngestError;

/// Columns every input must carry.
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["campaign_name", "date", "impressions", "clicks", "spend"];

/// Accepted revenue column names, highest priority first.
pub const REVENUE_ALIASES: [&str; 5] = [
    "purchase_value",
    "revenue",
    "revenue_value",
    "total_revenue",
    "purchase_value_usd",
];

/// Positions of every known column within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub campaign_name: usize,
    pub date: usize,
    pub impressions: usize,
    pub clicks: usize,
    pub spend: usize,
    pub revenue: Option<usize>,
    /// Header name the revenue position was resolved from.
    pub revenue_column: Option<String>,
    pub adset_name: Option<usize>,
    pub purchases: Option<usize>,
    pub creative_message: Option<usize>,
    pub audience_type: Option<usize>,
    pub platform: Option<usize>,
    pub country: Option<usize>,
}

impl ColumnMap {
    /// Resolve positions from a header row. Header names are compared after
    /// trimming; the first occurrence of a duplicated name wins.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Schema`] listing every required column that is
    /// absent.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| (*name).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::Schema { missing });
        }

        let required = |name: &str| {
            find(name).ok_or_else(|| IngestError::Schema {
                missing: vec![name.to_string()],
            })
        };

        let revenue = REVENUE_ALIASES
            .iter()
            .find_map(|alias| find(alias).map(|idx| (idx, (*alias).to_string())));

        Ok(Self {
            campaign_name: required("campaign_name")?,
            date: required("date")?,
            impressions: required("impressions")?,
            clicks: required("clicks")?,
            spend: required("spend")?,
            revenue: revenue.as_ref().map(|(idx, _)| *idx),
            revenue_column: revenue.map(|(_, name)| name),
            adset_name: find("adset_name"),
            purchases: find("purchases"),
            creative_message: find("creative_message"),
            audience_type: find("audience_type"),
            platform: find("platform"),
            country: find("country"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_required_and_optional_columns() {
        let headers = [
            "date",
            " campaign_name ",
            "spend",
            "clicks",
            "impressions",
            "creative_message",
        ];
        let map = ColumnMap::resolve(&headers).expect("all required columns present");
        assert_eq!(map.campaign_name, 1);
        assert_eq!(map.date, 0);
        assert_eq!(map.creative_message, Some(5));
        assert_eq!(map.revenue, None);
        assert_eq!(map.country, None);
    }

    #[test]
    fn revenue_alias_priority() {
        let headers = [
            "campaign_name",
            "date",
            "impressions",
            "clicks",
            "spend",
            "total_revenue",
            "revenue",
        ];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.revenue, Some(6), "`revenue` outranks `total_revenue`");
        assert_eq!(map.revenue_column.as_deref(), Some("revenue"));
    }

    #[test]
    fn purchase_value_wins_over_everything() {
        let headers = [
            "campaign_name",
            "date",
            "impressions",
            "clicks",
            "spend",
            "revenue",
            "purchase_value",
        ];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.revenue_column.as_deref(), Some("purchase_value"));
    }

    #[test]
    fn missing_required_columns_are_listed() {
        let err = ColumnMap::resolve(&["campaign_name", "date", "spend"]).unwrap_err();
        match err {
            IngestError::Schema { missing } => {
                assert_eq!(missing, vec!["impressions".to_string(), "clicks".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
