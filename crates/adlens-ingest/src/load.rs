//! Reading campaign input files into [`CampaignRecord`]s.

use std::path::Path;

use adlens_core::CampaignRecord;
use sha2::{Digest, Sha256};

use crate::error::IngestError;
use crate::parse::{parse_count, parse_date, parse_float, parse_text};
use crate::schema::ColumnMap;

/// Supported input encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] for anything other than a
    /// `.csv` or `.json` extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Records loaded from one input, plus bookkeeping for the run report.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<CampaignRecord>,
    /// Data rows seen, excluding the header.
    pub rows_read: usize,
    /// Rows dropped for a blank campaign name or an unparseable date.
    pub rows_rejected: usize,
    /// Header the revenue figures were taken from, if any.
    pub revenue_column: Option<String>,
    /// Lowercase hex SHA-256 of the raw input bytes.
    pub fingerprint: String,
}

/// Read and parse the file at `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the extension is unsupported, the file cannot
/// be read, the content is malformed, or a required column is missing.
pub fn load_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let format = InputFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = parse_dataset(&bytes, format)?;

    tracing::info!(
        path = %path.display(),
        rows = dataset.rows_read,
        rejected = dataset.rows_rejected,
        revenue_column = dataset.revenue_column.as_deref().unwrap_or("none"),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse in-memory input of a known format.
///
/// # Errors
///
/// Returns [`IngestError`] on malformed content or missing required columns.
pub fn parse_dataset(bytes: &[u8], format: InputFormat) -> Result<Dataset, IngestError> {
    let table = match format {
        InputFormat::Csv => read_csv(bytes)?,
        InputFormat::Json => read_json(bytes)?,
    };
    let columns = ColumnMap::resolve(table.headers.as_slice())?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut rows_rejected = 0usize;
    for (idx, row) in table.rows.iter().enumerate() {
        if let Some(record) = convert_row(row, &columns) {
            records.push(record);
        } else {
            rows_rejected += 1;
            tracing::debug!(row = idx + 1, "row rejected: blank campaign name or bad date");
        }
    }

    Ok(Dataset {
        records,
        rows_read: table.rows.len(),
        rows_rejected,
        revenue_column: columns.revenue_column,
        fingerprint: fingerprint(bytes),
    })
}

#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Header names plus rows of raw cell text.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn read_csv(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(RawTable { headers, rows })
}

fn read_json(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let serde_json::Value::Object(object) = item else {
            return Err(IngestError::JsonShape { row: idx + 1 });
        };
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(object);
    }

    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|h| object.get(h).map(json_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn convert_row(row: &[String], columns: &ColumnMap) -> Option<CampaignRecord> {
    let cell = |idx: usize| row.get(idx).map_or("", String::as_str);
    let optional = |idx: Option<usize>| idx.map_or("", cell);

    let campaign_name = parse_text(cell(columns.campaign_name))?;
    let date = parse_date(cell(columns.date))?;

    let mut record = CampaignRecord::new(campaign_name, date);
    record.impressions = parse_count(cell(columns.impressions));
    record.clicks = parse_count(cell(columns.clicks));
    record.spend = parse_float(cell(columns.spend));
    record.revenue = parse_float(optional(columns.revenue));
    record.purchases = parse_count(optional(columns.purchases));
    record.adset_name = parse_text(optional(columns.adset_name));
    record.creative_message = parse_text(optional(columns.creative_message));
    record.audience_type = parse_text(optional(columns.audience_type));
    record.platform = parse_text(optional(columns.platform));
    record.country = parse_text(optional(columns.country));
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
campaign_name,date,impressions,clicks,spend,revenue,creative_message
Men Boxers,2025-03-01,\"1,000\",20,10.5,30,Cotton comfort
Men Boxers,bad-date,1000,20,10.5,30,Cotton comfort
,2025-03-02,1000,20,10.5,30,Orphan row
Women Briefs,03/02/2025,n/a,5,,12.0,
";

    #[test]
    fn csv_rows_are_coerced_and_rejects_counted() {
        let dataset = parse_dataset(CSV.as_bytes(), InputFormat::Csv).unwrap();
        assert_eq!(dataset.rows_read, 4);
        assert_eq!(dataset.rows_rejected, 2);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.revenue_column.as_deref(), Some("revenue"));

        let boxers = &dataset.records[0];
        assert_eq!(boxers.impressions, Some(1000));
        assert_eq!(boxers.spend, Some(10.5));
        assert_eq!(boxers.creative_message.as_deref(), Some("Cotton comfort"));

        let briefs = &dataset.records[1];
        assert_eq!(briefs.impressions, None, "non-numeric impressions");
        assert_eq!(briefs.spend, None, "empty spend");
        assert_eq!(briefs.creative_message, None);
    }

    #[test]
    fn missing_revenue_column_leaves_revenue_unset() {
        let csv = "campaign_name,date,impressions,clicks,spend\nA,2025-03-01,10,1,2\n";
        let dataset = parse_dataset(csv.as_bytes(), InputFormat::Csv).unwrap();
        assert_eq!(dataset.revenue_column, None);
        assert_eq!(dataset.records[0].revenue, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "campaign_name,date,clicks\nA,2025-03-01,1\n";
        let err = parse_dataset(csv.as_bytes(), InputFormat::Csv).unwrap_err();
        assert!(matches!(err, IngestError::Schema { .. }), "got {err:?}");
    }

    #[test]
    fn json_array_of_objects() {
        let json = r#"[
            {"campaign_name": "A", "date": "2025-03-01", "impressions": 100,
             "clicks": 3, "spend": 5.5, "purchase_value": 12.25, "platform": "meta"},
            {"campaign_name": "A", "date": "2025-03-02T00:00:00Z", "impressions": "200",
             "clicks": 4, "spend": null, "purchase_value": 8}
        ]"#;
        let dataset = parse_dataset(json.as_bytes(), InputFormat::Json).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.revenue_column.as_deref(), Some("purchase_value"));
        assert_eq!(dataset.records[0].revenue, Some(12.25));
        assert_eq!(dataset.records[0].platform.as_deref(), Some("meta"));
        assert_eq!(dataset.records[1].impressions, Some(200));
        assert_eq!(dataset.records[1].spend, None);
    }

    #[test]
    fn json_non_object_row_is_rejected() {
        let json = r#"[{"campaign_name": "A"}, 3]"#;
        let err = parse_dataset(json.as_bytes(), InputFormat::Json).unwrap_err();
        assert!(matches!(err, IngestError::JsonShape { row: 2 }), "got {err:?}");
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("data/campaigns.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("x.json")).unwrap(),
            InputFormat::Json
        );
        assert!(InputFormat::from_path(Path::new("x.xlsx")).is_err());
    }
}
