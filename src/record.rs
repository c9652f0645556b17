//! Input posts and output analysis records.
//!
//! A [`RawPost`] is what arrives from an ingestion source. An
//! [`AnalysisRecord`] is what the pipeline produces for a post that made it
//! through every stage; records are immutable once built.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentigeoError};
use crate::geo::GeoPoint;

/// An unprocessed social-media post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    /// Author handle
    pub author: String,

    /// Post body
    pub text: String,

    /// Longitude in degrees
    pub longitude: f64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Creation time, RFC 3339 or integer unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Language override; skips detection when present and non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl RawPost {
    /// Create a post without timestamp or language override.
    pub fn new<A: Into<String>, T: Into<String>>(
        author: A,
        text: T,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        RawPost {
            author: author.into(),
            text: text.into(),
            longitude,
            latitude,
            timestamp: None,
            language: None,
        }
    }

    /// Set the creation timestamp.
    pub fn with_timestamp<S: Into<String>>(mut self, timestamp: S) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the language override.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The validated location of this post.
    pub fn location(&self) -> Result<GeoPoint> {
        GeoPoint::new(self.longitude, self.latitude)
    }

    /// The parsed creation time, if the post carries one.
    pub fn created_on(&self) -> Result<Option<DateTime<Utc>>> {
        self.timestamp.as_deref().map(parse_timestamp).transpose()
    }
}

/// Parse an RFC 3339 timestamp or a count of unix seconds.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let seconds: i64 = value.parse().map_err(|_| {
        SentigeoError::malformed_timestamp(format!(
            "'{value}' is neither RFC 3339 nor unix seconds"
        ))
    })?;

    Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
        SentigeoError::malformed_timestamp(format!("unix seconds {seconds} out of range"))
    })
}

/// The analysis result of one post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    author: String,
    created_on: DateTime<Utc>,
    words: Vec<String>,
    location: GeoPoint,
    polarity: f64,
    language: String,
}

impl AnalysisRecord {
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    /// Filtered words and hashtags in first-appearance order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Mean polarity of the sentences that carried sentiment.
    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    /// Language code of the backend that analysed the post.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Hashtag entries of [`words`](Self::words).
    pub fn hashtags(&self) -> impl Iterator<Item = &str> + '_ {
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| w.starts_with('#'))
    }
}

/// Assembles [`AnalysisRecord`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordBuilder;

impl RecordBuilder {
    pub fn new() -> Self {
        RecordBuilder
    }

    pub fn build<A: Into<String>, L: Into<String>>(
        &self,
        author: A,
        created_on: DateTime<Utc>,
        location: GeoPoint,
        words: Vec<String>,
        polarity: f64,
        language: L,
    ) -> AnalysisRecord {
        AnalysisRecord {
            author: author.into(),
            created_on,
            words,
            location,
            polarity,
            language: language.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_timestamp("2021-03-04T05:06:07+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2021-03-04T03:06:07+00:00");
    }

    #[test]
    fn test_parse_unix_seconds() {
        let parsed = parse_timestamp("1600000000").unwrap();
        assert_eq!(parsed.timestamp(), 1_600_000_000);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedTimestamp);
    }

    #[test]
    fn test_raw_post_serde_defaults() {
        let post: RawPost = serde_json::from_str(
            r#"{"author":"alice","text":"hi","longitude":1.0,"latitude":2.0}"#,
        )
        .unwrap();
        assert_eq!(post, RawPost::new("alice", "hi", 1.0, 2.0));
        assert_eq!(post.created_on().unwrap(), None);

        let json = serde_json::to_string(&post.clone().with_language("en")).unwrap();
        assert!(json.contains(r#""language":"en""#));
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_build_record() {
        let created_on = parse_timestamp("2020-01-01T00:00:00Z").unwrap();
        let record = RecordBuilder::new().build(
            "alice",
            created_on,
            GeoPoint::new(13.4, 52.5).unwrap(),
            vec!["love".to_string(), "#cats".to_string()],
            0.8,
            "en",
        );

        assert_eq!(record.author(), "alice");
        assert_eq!(record.created_on(), created_on);
        assert_eq!(record.hashtags().collect::<Vec<_>>(), vec!["#cats"]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["location"], serde_json::json!([13.4, 52.5]));
        assert_eq!(json["polarity"], serde_json::json!(0.8));

        let back: AnalysisRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
