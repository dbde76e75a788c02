//! Data models for the feed aggregator.
//!
//! This module contains the core data structures used throughout
//! the application for representing sources, model records, and the
//! aggregated feed document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Model architecture family tracked by the feed.
///
/// The variants form a closed set; the serialized labels match what the
/// upstream API uses and what the frontend expects in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "GPT")]
    Gpt,
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "Gemini")]
    Gemini,
}

impl Source {
    /// All sources, in endpoint-visit order.
    pub const ALL: [Source; 3] = [Source::Gpt, Source::Claude, Source::Gemini];

    /// Returns the upstream label for this source.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Gpt => "GPT",
            Source::Claude => "Claude",
            Source::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed upstream endpoint: which source it serves and where to fetch it.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Source label attached to every record from this endpoint.
    pub source: Source,
    /// Full request URL.
    pub url: String,
}

/// A model record after annotation.
///
/// The upstream record shape is not controlled by this tool, so all original
/// fields are carried through untouched in `extra`. The four annotated fields
/// are always present; raw fields with the same names are replaced rather
/// than duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedModel {
    /// Which source produced this record.
    pub architecture: Source,
    /// Creation timestamp, resolved from the record or defaulted.
    pub created: DateTime<Utc>,
    /// Human-readable name, resolved from the record or defaulted.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// When this record was normalized.
    #[serde(rename = "fetchedAt")]
    pub fetched_at: DateTime<Utc>,
    /// All remaining raw fields, passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A failed endpoint fetch, recorded into the output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchError {
    /// Source whose fetch failed.
    pub architecture: Source,
    /// Human-readable failure description.
    pub error: String,
}

/// Per-source record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureCounts {
    #[serde(rename = "GPT")]
    pub gpt: usize,
    #[serde(rename = "Claude")]
    pub claude: usize,
    #[serde(rename = "Gemini")]
    pub gemini: usize,
}

impl ArchitectureCounts {
    /// Returns the count for one source.
    pub fn get(&self, source: Source) -> usize {
        match source {
            Source::Gpt => self.gpt,
            Source::Claude => self.claude,
            Source::Gemini => self.gemini,
        }
    }

    /// Sum over all sources. Always equals the feed's total model count.
    #[allow(dead_code)] // Utility used in tests
    pub fn total(&self) -> usize {
        self.gpt + self.claude + self.gemini
    }
}

/// Metadata block of the feed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Total number of records in the feed.
    #[serde(rename = "totalModels")]
    pub total_models: usize,
    /// Record counts broken down by source.
    pub architectures: ArchitectureCounts,
    /// When this document was assembled.
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
    /// Endpoints that failed during this run.
    pub errors: Vec<FetchError>,
}

/// The complete aggregated feed document, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFeed {
    /// All records, sorted by creation time descending.
    pub models: Vec<NormalizedModel>,
    /// Run metadata.
    pub metadata: FeedMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::Gpt.label(), "GPT");
        assert_eq!(Source::Claude.label(), "Claude");
        assert_eq!(Source::Gemini.label(), "Gemini");
        assert_eq!(Source::Gpt.to_string(), "GPT");
    }

    #[test]
    fn test_source_serde_roundtrip() {
        let json = serde_json::to_string(&Source::Claude).unwrap();
        assert_eq!(json, "\"Claude\"");
        let back: Source = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Source::Claude);
    }

    #[test]
    fn test_architecture_counts_total() {
        let counts = ArchitectureCounts {
            gpt: 3,
            claude: 2,
            gemini: 1,
        };
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get(Source::Gpt), 3);
        assert_eq!(counts.get(Source::Gemini), 1);
    }

    #[test]
    fn test_architecture_counts_serialized_keys() {
        let counts = ArchitectureCounts {
            gpt: 1,
            claude: 0,
            gemini: 2,
        };
        let value = serde_json::to_value(counts).unwrap();
        assert_eq!(value, json!({"GPT": 1, "Claude": 0, "Gemini": 2}));
    }

    #[test]
    fn test_normalized_model_flattens_extra_fields() {
        let mut extra = Map::new();
        extra.insert("id".to_string(), json!("anthropic/claude-3"));
        extra.insert("context_length".to_string(), json!(200000));

        let model = NormalizedModel {
            architecture: Source::Claude,
            created: Utc::now(),
            display_name: "Claude 3".to_string(),
            fetched_at: Utc::now(),
            extra,
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["architecture"], json!("Claude"));
        assert_eq!(value["displayName"], json!("Claude 3"));
        assert_eq!(value["id"], json!("anthropic/claude-3"));
        assert_eq!(value["context_length"], json!(200000));
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_fetch_error_serialized_keys() {
        let err = FetchError {
            architecture: Source::Gpt,
            error: "HTTP 500: Internal Server Error".to_string(),
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({"architecture": "GPT", "error": "HTTP 500: Internal Server Error"})
        );
    }
}
