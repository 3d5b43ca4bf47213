//! Update record model and defensive feed decoding.
//!
//! An [`Update`] is one reported item from the operations feed. The feed is an
//! untrusted JSON array, so decoding is done element by element: a malformed
//! record is skipped or decoded with absent fields, and never takes the rest
//! of the feed down with it.

use crate::domain::error::{DashboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heading used for updates that carry no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder shown for updates without a title.
pub const UNTITLED: &str = "(untitled)";

/// Risk classification of an update.
///
/// Drives both the risk facet filter and the card styling. Labels outside the
/// three known values decode as [`RiskLevel::Unrated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Unrated")]
    Unrated,
}

impl RiskLevel {
    /// Parses a feed label such as `"High Risk"`, ignoring case and padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use trustboard::domain::RiskLevel;
    ///
    /// assert_eq!(RiskLevel::from_label("High Risk"), RiskLevel::High);
    /// assert_eq!(RiskLevel::from_label(" low risk "), RiskLevel::Low);
    /// assert_eq!(RiskLevel::from_label("Critical"), RiskLevel::Unrated);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label))
            .unwrap_or(Self::Unrated)
    }

    /// Returns the display label used by the feed and the risk facet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Risk",
            Self::Medium => "Medium Risk",
            Self::Low => "Low Risk",
            Self::Unrated => "Unrated",
        }
    }

    /// Whether this level is one of the three known classifications.
    #[must_use]
    pub const fn is_rated(self) -> bool {
        !matches!(self, Self::Unrated)
    }
}

/// One reported item from the operations feed.
///
/// Every text attribute is optional because the feed gives no guarantees.
/// Updates are immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub title: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub risk_level: RiskLevel,
    pub gender: Option<String>,
    pub impact: Option<String>,
    pub media_attention: Option<String>,
    pub sentiment: Option<String>,
    /// Share of sentiment in percent, clamped to `0..=100`.
    pub sentiment_percentage: Option<f64>,
    pub published: Option<DateTime<Utc>>,
}

impl Update {
    /// Creates an update with the given title and category and nothing else.
    ///
    /// Mostly useful for building fixtures.
    #[must_use]
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            source: None,
            category: Some(category.into()),
            country: None,
            risk_level: RiskLevel::Unrated,
            gender: None,
            impact: None,
            media_attention: None,
            sentiment: None,
            sentiment_percentage: None,
            published: None,
        }
    }

    /// Title for display, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Category used for grouping, falling back to [`UNCATEGORIZED`].
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Formats the sentiment share the way cards show it (`72%`, `72.5%`, `n/a`).
    #[must_use]
    pub fn sentiment_share(&self) -> String {
        match self.sentiment_percentage {
            Some(pct) if pct.fract() == 0.0 => format!("{pct:.0}%"),
            Some(pct) => format!("{pct}%"),
            None => "n/a".to_string(),
        }
    }
}

/// Result of decoding a feed body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecodedFeed {
    /// Decoded updates in feed order.
    pub updates: Vec<Update>,
    /// Number of array elements that were not JSON objects.
    pub skipped: usize,
}

/// Decodes a feed body into updates.
///
/// The body must be a JSON array. Elements that are not objects are skipped
/// and counted; fields that are missing or of the wrong type decode as absent.
///
/// # Errors
///
/// Returns [`DashboardError::Decode`] if the body is not JSON and
/// [`DashboardError::Feed`] if the top-level value is not an array.
///
/// # Examples
///
/// ```
/// use trustboard::domain::{decode_feed, RiskLevel};
///
/// let feed = decode_feed(br#"[{"title": "Spam Wave", "risk_level": "Low Risk"}, 42]"#)?;
/// assert_eq!(feed.updates.len(), 1);
/// assert_eq!(feed.updates[0].risk_level, RiskLevel::Low);
/// assert_eq!(feed.skipped, 1);
/// # Ok::<(), trustboard::DashboardError>(())
/// ```
pub fn decode_feed(body: &[u8]) -> Result<DecodedFeed> {
    let value: Value = serde_json::from_slice(body)?;

    let Value::Array(elements) = value else {
        return Err(DashboardError::Feed(format!(
            "expected a JSON array of updates, got {}",
            json_kind(&value)
        )));
    };

    let mut feed = DecodedFeed::default();
    for (index, element) in elements.iter().enumerate() {
        if let Value::Object(record) = element {
            feed.updates.push(decode_record(record));
        } else {
            tracing::debug!(
                index = index,
                kind = json_kind(element),
                "skipping non-object feed element"
            );
            feed.skipped += 1;
        }
    }

    tracing::debug!(
        decoded = feed.updates.len(),
        skipped = feed.skipped,
        "feed decoded"
    );
    Ok(feed)
}

fn decode_record(record: &Map<String, Value>) -> Update {
    Update {
        title: text_field(record, "title"),
        source: text_field(record, "source"),
        category: text_field(record, "category"),
        country: text_field(record, "country"),
        risk_level: text_field(record, "risk_level")
            .map_or(RiskLevel::Unrated, |label| RiskLevel::from_label(&label)),
        gender: text_field(record, "gender"),
        impact: text_field(record, "impact"),
        media_attention: text_field(record, "media_attention"),
        sentiment: text_field(record, "sentiment"),
        sentiment_percentage: record.get("sentiment_percentage").and_then(percentage),
        published: record.get("published").and_then(published_at),
    }
}

/// Non-blank string fields only; anything else is absent.
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn percentage(value: &Value) -> Option<f64> {
    let pct = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    pct.is_finite().then(|| pct.clamp(0.0, 100.0))
}

fn published_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Parses a timestamp in one of the accepted feed formats.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (either `T` or a space as
/// separator, read as UTC) and bare `YYYY-MM-DD` (UTC midnight).
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    parse_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)).map(|naive| naive.and_utc())
}

/// Parses a bare calendar date (`YYYY-MM-DD`).
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_a_complete_record() {
        let body = br#"[{
            "title": "Fraud Alert",
            "source": "Reuters",
            "category": "Fraud",
            "country": "US",
            "risk_level": "High Risk",
            "gender": "Female",
            "impact": "High Impact",
            "media_attention": "High",
            "sentiment": "Negative",
            "sentiment_percentage": 72,
            "published": "2024-01-10T08:30:00Z"
        }]"#;

        let feed = decode_feed(body).unwrap();
        assert_eq!(feed.skipped, 0);
        let update = &feed.updates[0];
        assert_eq!(update.display_title(), "Fraud Alert");
        assert_eq!(update.source.as_deref(), Some("Reuters"));
        assert_eq!(update.risk_level, RiskLevel::High);
        assert_eq!(update.sentiment_share(), "72%");
        assert_eq!(
            update.published,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn rejects_non_array_bodies() {
        let err = decode_feed(br#"{"updates": []}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Feed(_)));

        let err = decode_feed(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)));
    }

    #[test]
    fn bad_records_do_not_spoil_the_feed() {
        let body = br#"[
            "garbage",
            {"title": 17, "category": "", "risk_level": "Critical", "published": "last tuesday"},
            null,
            {"title": "Spam Wave", "category": "Spam"}
        ]"#;

        let feed = decode_feed(body).unwrap();
        assert_eq!(feed.skipped, 2);
        assert_eq!(feed.updates.len(), 2);

        let broken = &feed.updates[0];
        assert_eq!(broken.title, None);
        assert_eq!(broken.display_title(), UNTITLED);
        assert_eq!(broken.category_name(), UNCATEGORIZED);
        assert_eq!(broken.risk_level, RiskLevel::Unrated);
        assert_eq!(broken.published, None);

        assert_eq!(feed.updates[1].display_title(), "Spam Wave");
    }

    #[test]
    fn sentiment_percentage_is_lenient_and_clamped() {
        let feed = decode_feed(
            br#"[
                {"sentiment_percentage": "45.5%"},
                {"sentiment_percentage": 140},
                {"sentiment_percentage": "lots"},
                {"sentiment_percentage": -3}
            ]"#,
        )
        .unwrap();

        let shares: Vec<String> = feed.updates.iter().map(Update::sentiment_share).collect();
        assert_eq!(shares, vec!["45.5%", "100%", "n/a", "0%"]);
    }

    #[test]
    fn accepts_common_timestamp_shapes() {
        let midnight = Utc.with_ymd_and_hms(2024, 2, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-02-05"), Some(midnight));
        assert_eq!(parse_timestamp("2024-02-05T00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2024-02-05 00:00:00.000"), Some(midnight));
        assert_eq!(parse_timestamp("2024-02-05T01:00:00+01:00"), Some(midnight));
        assert_eq!(parse_timestamp("05/02/2024"), None);

        let feed = decode_feed(br#"[{"published": 1707091200000}]"#).unwrap();
        assert_eq!(feed.updates[0].published, Some(midnight));
    }

    #[test]
    fn risk_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium Risk\"");
        assert!(RiskLevel::Medium.is_rated());
        assert!(!RiskLevel::Unrated.is_rated());
    }
}
