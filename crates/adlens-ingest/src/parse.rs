//! Field coercion for raw cell text.
//!
//! Every helper is total: unparseable input becomes `None`, never an error.

use chrono::NaiveDate;

/// Parse a numeric cell, stripping thousands separators and surrounding
/// whitespace. Empty, non-numeric and non-finite values give `None`.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a non-negative count. Integral floats such as `"12.0"` are
/// accepted; fractional or negative values give `None`.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let value = parse_float(raw)?;
    if value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    // saturates above u64::MAX
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(value as u64)
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`, and timestamps whose
/// first ten characters are `YYYY-MM-DD` (e.g. `2025-03-01T08:00:00Z`).
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Trimmed text, or `None` when blank.
#[must_use]
pub fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
